//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::{CredentialsValidationError, Error, MarkerValidationError};

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("missing required field: {field}")).with_details(json!({
        "field": field,
        "code": "missing_field",
    }))
}

/// Unwrap a required body field.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

pub(crate) fn marker_validation_error(err: MarkerValidationError) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": err.field(),
        "reason": err.reason(),
    }))
}

pub(crate) fn credentials_validation_error(err: CredentialsValidationError) -> Error {
    let field = match err {
        CredentialsValidationError::Username(_) => "username",
        CredentialsValidationError::EmptyPassword
        | CredentialsValidationError::PasswordTooLong { .. } => "password",
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field }))
}
