//! Account domain service.
//!
//! Implements [`AccountCommand`] over a [`UserRepository`] and a
//! [`PasswordHasher`].

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::domain::ports::{
    AccountCommand, PasswordHasher, PasswordHasherError, UserPersistenceError, UserRepository,
};
use crate::domain::{
    Credentials, Error, INVALID_CREDENTIALS_MESSAGE, PasswordHash, User, UserId,
};

/// Hashed once per service and verified against when the username is unknown,
/// so both login failures pay the same hashing cost.
const TIMING_DUMMY_PASSWORD: &str = "markers-timing-equaliser";

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateUsername { username } => duplicate_username(&username),
    }
}

fn map_hasher_error(error: PasswordHasherError) -> Error {
    Error::internal(error.to_string())
}

fn duplicate_username(username: &str) -> Error {
    Error::conflict("Username already exists").with_details(json!({
        "field": "username",
        "value": username,
        "code": "duplicate_username",
    }))
}

/// Registration and login over injected storage and hashing adapters.
#[derive(Clone)]
pub struct AccountService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
    dummy_hash: Arc<OnceCell<PasswordHash>>,
}

impl<U, H> AccountService<U, H> {
    /// Create a service from its adapters.
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self {
            users,
            hasher,
            dummy_hash: Arc::new(OnceCell::new()),
        }
    }
}

impl<U, H: PasswordHasher> AccountService<U, H> {
    /// Burn one verification for an unknown username.
    async fn verify_against_dummy(&self, password: &str) -> Result<(), Error> {
        let dummy = self
            .dummy_hash
            .get_or_try_init(|| self.hasher.hash(TIMING_DUMMY_PASSWORD))
            .await
            .map_err(map_hasher_error)?;
        self.hasher
            .verify(password, dummy)
            .await
            .map_err(map_hasher_error)?;
        Ok(())
    }
}

#[async_trait]
impl<U, H> AccountCommand for AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn register(&self, credentials: &Credentials) -> Result<UserId, Error> {
        let username = credentials.username();
        if self
            .users
            .find_by_username(username)
            .await
            .map_err(map_user_error)?
            .is_some()
        {
            return Err(duplicate_username(username.as_ref()));
        }

        let hash = self
            .hasher
            .hash(credentials.password())
            .await
            .map_err(map_hasher_error)?;
        let user = User::new(UserId::random(), username.clone(), hash);
        self.users.insert(&user).await.map_err(map_user_error)?;
        debug!(user_id = %user.id(), "registered user");
        Ok(*user.id())
    }

    async fn authenticate(&self, credentials: &Credentials) -> Result<UserId, Error> {
        let Some(user) = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(map_user_error)?
        else {
            self.verify_against_dummy(credentials.password()).await?;
            debug!("login rejected: unknown username");
            return Err(Error::unauthorized(INVALID_CREDENTIALS_MESSAGE));
        };

        let matches = self
            .hasher
            .verify(credentials.password(), user.password_hash())
            .await
            .map_err(map_hasher_error)?;
        if !matches {
            debug!(user_id = %user.id(), "login rejected: password mismatch");
            return Err(Error::unauthorized(INVALID_CREDENTIALS_MESSAGE));
        }
        Ok(*user.id())
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
