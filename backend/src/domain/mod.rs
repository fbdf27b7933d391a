//! Domain primitives, services, and ports.
//!
//! Purpose: define the strongly typed entities shared by the HTTP adapter and
//! the persistence adapters, plus the services that enforce ownership rules.
//! Nothing in this module knows about actix, Diesel, or bcrypt.
//!
//! Public surface:
//! - [`Error`] and [`ErrorCode`]: transport-agnostic failure payload.
//! - [`User`], [`UserId`], [`Username`], [`PasswordHash`]: account identity.
//! - [`Credentials`]: validated login/registration input.
//! - [`Marker`], [`MarkerDraft`], [`MarkerPatch`], [`MarkerId`]: map markers.
//! - [`ExportFormat`] and [`render_export`]: JSON, CSV, and GPX output.
//! - [`AccountService`] and [`MarkerService`]: driving-port implementations.

pub mod account_service;
pub mod auth;
pub mod error;
pub mod export;
pub mod marker;
pub mod marker_service;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{
    Credentials, CredentialsValidationError, INVALID_CREDENTIALS_MESSAGE, PASSWORD_MAX_BYTES,
};
pub use self::error::{Error, ErrorCode};
pub use self::export::{
    CSV_HEADER, ExportDocument, ExportFormat, ExportRecord, UnsupportedFormat, render_export,
};
pub use self::marker::{
    DEFAULT_MARKER_COLOR, MARKER_COLOR_MAX, MARKER_DESCRIPTION_MAX, MARKER_NAME_MAX, Marker,
    MarkerDraft, MarkerId, MarkerPatch, MarkerValidationError,
};
pub use self::marker_service::MarkerService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{PasswordHash, USERNAME_MAX, User, UserId, UserValidationError, Username};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use markers::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::forbidden("not your marker"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
