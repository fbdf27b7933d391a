//! Credentials submitted to the login and registration forms.
//!
//! Keep form parsing outside the domain by exposing a constructor that
//! validates raw strings before a handler talks to the account service.

use std::fmt;

use zeroize::Zeroizing;

use super::{UserValidationError, Username};

/// Generic message for every failed login, whether the user is unknown or the
/// password is wrong.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password";

/// Longest password accepted, in UTF-8 bytes. bcrypt only reads this many, so
/// longer inputs would verify on their prefix alone.
pub const PASSWORD_MAX_BYTES: usize = 72;

/// Domain error returned when credential payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Username was missing, blank, or too long.
    Username(UserValidationError),
    /// Password was blank.
    EmptyPassword,
    /// Password exceeded [`PASSWORD_MAX_BYTES`].
    PasswordTooLong { max: usize },
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Username(err) => err.fmt(f),
            Self::EmptyPassword => f.write_str("password must not be empty"),
            Self::PasswordTooLong { max } => {
                write!(f, "password must be at most {max} bytes")
            }
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

/// Validated username/password pair.
///
/// ## Invariants
/// - `username` satisfies [`Username`] validation.
/// - `password` is non-empty, at most [`PASSWORD_MAX_BYTES`] bytes, and
///   keeps caller-provided whitespace; it is zeroised on drop.
///
/// # Examples
/// ```
/// use markers::domain::Credentials;
///
/// let creds = Credentials::try_from_parts("alice", "hunter2").expect("valid");
/// assert_eq!(creds.username().as_ref(), "alice");
/// assert_eq!(creds.password(), "hunter2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    username: Username,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Construct credentials from raw form inputs.
    pub fn try_from_parts(
        username: &str,
        password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        let username = Username::new(username).map_err(CredentialsValidationError::Username)?;
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        if password.len() > PASSWORD_MAX_BYTES {
            return Err(CredentialsValidationError::PasswordTooLong {
                max: PASSWORD_MAX_BYTES,
            });
        }
        Ok(Self {
            username,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username used for lookups.
    #[must_use]
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Plain-text password as supplied.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", CredentialsValidationError::Username(UserValidationError::EmptyUsername))]
    #[case("   ", "pw", CredentialsValidationError::Username(UserValidationError::EmptyUsername))]
    #[case("bob", "", CredentialsValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: CredentialsValidationError,
    ) {
        let err = Credentials::try_from_parts(username, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn passwords_past_the_bcrypt_limit_are_rejected() {
        let at_limit = "a".repeat(PASSWORD_MAX_BYTES);
        assert!(Credentials::try_from_parts("dave", &at_limit).is_ok());

        let long = format!("{at_limit}correct");
        assert_eq!(
            Credentials::try_from_parts("dave", &long),
            Err(CredentialsValidationError::PasswordTooLong {
                max: PASSWORD_MAX_BYTES
            })
        );
    }

    #[rstest]
    fn password_limit_counts_bytes_not_chars() {
        let multibyte = "é".repeat(PASSWORD_MAX_BYTES / 2 + 1);
        assert!(matches!(
            Credentials::try_from_parts("erin", &multibyte),
            Err(CredentialsValidationError::PasswordTooLong { .. })
        ));
    }

    #[rstest]
    fn password_whitespace_is_preserved() {
        let creds = Credentials::try_from_parts("carol", "  spaced  ").expect("valid");
        assert_eq!(creds.password(), "  spaced  ");
    }
}
