//! Password hashing adapter backed by `bcrypt`.

use async_trait::async_trait;
use tracing::warn;
use zeroize::Zeroizing;

use crate::domain::{PASSWORD_MAX_BYTES, PasswordHash};
use crate::domain::ports::{PasswordHasher, PasswordHasherError};

/// bcrypt implementation of [`PasswordHasher`].
///
/// Hashing runs on the blocking thread pool so request workers stay
/// responsive.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Hasher using `bcrypt::DEFAULT_COST`.
    pub fn new() -> Self {
        Self::with_cost(bcrypt::DEFAULT_COST)
    }

    /// Hasher with an explicit work factor, clamped to bcrypt's valid range.
    /// Tests use the minimum.
    pub fn with_cost(cost: u32) -> Self {
        Self {
            cost: cost.clamp(4, 31),
        }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

fn join_error(err: tokio::task::JoinError) -> PasswordHasherError {
    PasswordHasherError::hashing(format!("hashing task failed: {err}"))
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHasherError> {
        if password.len() > PASSWORD_MAX_BYTES {
            return Err(PasswordHasherError::hashing(format!(
                "password exceeds {PASSWORD_MAX_BYTES} bytes"
            )));
        }
        let cost = self.cost;
        let password = Zeroizing::new(password.to_owned());
        let encoded = tokio::task::spawn_blocking(move || bcrypt::hash(password.as_bytes(), cost))
            .await
            .map_err(join_error)?
            .map_err(|err| PasswordHasherError::hashing(err.to_string()))?;
        PasswordHash::new(encoded).map_err(|err| PasswordHasherError::hashing(err.to_string()))
    }

    async fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHasherError> {
        // bcrypt ignores everything past the limit; such input never matches.
        if password.len() > PASSWORD_MAX_BYTES {
            return Ok(false);
        }
        let password = Zeroizing::new(password.to_owned());
        let encoded = hash.as_str().to_owned();
        let outcome = tokio::task::spawn_blocking(move || bcrypt::verify(password.as_bytes(), &encoded))
            .await
            .map_err(join_error)?;
        match outcome {
            Ok(matches) => Ok(matches),
            Err(err) => {
                warn!(error = %err, "stored password hash is malformed");
                Ok(false)
            }
        }
    }
}
