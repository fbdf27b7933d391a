//! Driving port for marker mutations.

use async_trait::async_trait;

use crate::domain::{Error, Marker, MarkerDraft, MarkerId, MarkerPatch, UserId};

/// Request to create a marker for `owner`.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateMarkerRequest {
    pub owner: UserId,
    pub draft: MarkerDraft,
}

/// Request to change some fields of an existing marker.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateMarkerRequest {
    pub owner: UserId,
    pub marker_id: MarkerId,
    pub patch: MarkerPatch,
}

/// Request to remove a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteMarkerRequest {
    pub owner: UserId,
    pub marker_id: MarkerId,
}

/// Driving port for marker write operations.
///
/// Update and delete report `NotFound` for unknown ids before checking
/// ownership, then `Forbidden` when the caller is not the owner. Storage is
/// untouched on either path.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarkerCommand: Send + Sync {
    /// Persist a new marker and return it with its assigned id.
    async fn create_marker(&self, request: CreateMarkerRequest) -> Result<Marker, Error>;

    /// Apply a partial update and return the full record.
    async fn update_marker(&self, request: UpdateMarkerRequest) -> Result<Marker, Error>;

    /// Permanently remove a marker.
    async fn delete_marker(&self, request: DeleteMarkerRequest) -> Result<(), Error>;
}
