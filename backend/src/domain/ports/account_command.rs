//! Driving port for registration and login.
//!
//! Inbound adapters call this port to create accounts and authenticate
//! credentials without knowing which repository or hasher backs it.

use async_trait::async_trait;

use crate::domain::{Credentials, Error, UserId};

/// Account use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Create an account. A taken username fails with
    /// [`crate::domain::ErrorCode::Conflict`]; the caller is not logged in.
    async fn register(&self, credentials: &Credentials) -> Result<UserId, Error>;

    /// Validate credentials and return the authenticated user id.
    ///
    /// Unknown usernames and wrong passwords fail with the same
    /// [`crate::domain::ErrorCode::Unauthorized`] error.
    async fn authenticate(&self, credentials: &Credentials) -> Result<UserId, Error>;
}
