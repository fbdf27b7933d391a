//! Port for marker persistence.
//!
//! Mutating operations take the owner alongside the identifier so adapters can
//! filter on both in the statement that writes; a `false` result means no row
//! matched.

use async_trait::async_trait;

use crate::domain::{Marker, MarkerDraft, MarkerId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by marker repository adapters.
    pub enum MarkerRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "marker repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "marker repository query failed: {message}",
    }
}

/// Storage for map markers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarkerRepository: Send + Sync {
    /// All markers owned by `owner`, ordered by id.
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Marker>, MarkerRepositoryError>;

    /// Markers owned by `owner` whose id appears in `ids`, ordered by id.
    async fn list_by_owner_and_ids(
        &self,
        owner: &UserId,
        ids: &[MarkerId],
    ) -> Result<Vec<Marker>, MarkerRepositoryError>;

    /// Fetch a marker regardless of owner.
    async fn find_by_id(&self, id: MarkerId) -> Result<Option<Marker>, MarkerRepositoryError>;

    /// Persist a new marker and return it with its assigned id.
    async fn insert(
        &self,
        owner: &UserId,
        draft: &MarkerDraft,
    ) -> Result<Marker, MarkerRepositoryError>;

    /// Overwrite the mutable fields of `marker` where both id and owner match.
    async fn update(&self, marker: &Marker) -> Result<bool, MarkerRepositoryError>;

    /// Remove the marker where both id and owner match.
    async fn delete(&self, owner: &UserId, id: MarkerId) -> Result<bool, MarkerRepositoryError>;
}
