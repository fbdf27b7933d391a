//! Driving port for marker reads and exports.

use async_trait::async_trait;

use crate::domain::{Error, ExportDocument, ExportFormat, Marker, MarkerId, UserId};

/// Request to export the caller's markers.
///
/// `marker_ids` of `None` or an empty list selects every marker the caller
/// owns; otherwise ids the caller does not own are silently skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportMarkersRequest {
    pub owner: UserId,
    pub format: ExportFormat,
    pub marker_ids: Option<Vec<MarkerId>>,
}

/// Driving port for marker read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarkerQuery: Send + Sync {
    /// Every marker owned by `owner`.
    async fn list_markers(&self, owner: UserId) -> Result<Vec<Marker>, Error>;

    /// The caller's markers, optionally narrowed to `ids`.
    async fn find_for_export(
        &self,
        owner: UserId,
        ids: Option<Vec<MarkerId>>,
    ) -> Result<Vec<Marker>, Error>;

    /// Render the selected markers in the requested format.
    async fn export_markers(&self, request: ExportMarkersRequest) -> Result<ExportDocument, Error>;
}
