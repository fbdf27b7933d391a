//! Marker domain service.
//!
//! Implements the marker driving ports over a [`MarkerRepository`]. Every
//! operation is scoped to the calling user; the ownership check happens here
//! and again in the adapter's write statement.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{
    CreateMarkerRequest, DeleteMarkerRequest, ExportMarkersRequest, MarkerCommand, MarkerQuery,
    MarkerRepository, MarkerRepositoryError, UpdateMarkerRequest,
};
use crate::domain::{Error, ExportDocument, Marker, MarkerId, UserId, render_export};

fn map_repository_error(error: MarkerRepositoryError) -> Error {
    match error {
        MarkerRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("marker repository unavailable: {message}"))
        }
        MarkerRepositoryError::Query { message } => {
            Error::internal(format!("marker repository error: {message}"))
        }
    }
}

fn marker_not_found(id: MarkerId) -> Error {
    Error::not_found(format!("marker {id} not found"))
}

/// Marker service implementing [`MarkerCommand`] and [`MarkerQuery`].
#[derive(Clone)]
pub struct MarkerService<R> {
    markers: Arc<R>,
}

impl<R> MarkerService<R> {
    /// Create a service backed by `markers`.
    pub fn new(markers: Arc<R>) -> Self {
        Self { markers }
    }
}

impl<R> MarkerService<R>
where
    R: MarkerRepository,
{
    /// Load a marker the caller owns; unknown ids are reported before
    /// ownership.
    async fn owned_marker(&self, owner: &UserId, id: MarkerId) -> Result<Marker, Error> {
        let marker = self
            .markers
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| marker_not_found(id))?;
        if !marker.is_owned_by(owner) {
            debug!(marker_id = %id, user_id = %owner, "marker access denied");
            return Err(Error::forbidden("You do not own this marker"));
        }
        Ok(marker)
    }
}

#[async_trait]
impl<R> MarkerCommand for MarkerService<R>
where
    R: MarkerRepository,
{
    async fn create_marker(&self, request: CreateMarkerRequest) -> Result<Marker, Error> {
        let marker = self
            .markers
            .insert(&request.owner, &request.draft)
            .await
            .map_err(map_repository_error)?;
        debug!(marker_id = %marker.id(), user_id = %request.owner, "marker created");
        Ok(marker)
    }

    async fn update_marker(&self, request: UpdateMarkerRequest) -> Result<Marker, Error> {
        let current = self
            .owned_marker(&request.owner, request.marker_id)
            .await?;
        if request.patch.is_empty() {
            return Ok(current);
        }
        let updated = current.apply(request.patch);
        let written = self
            .markers
            .update(&updated)
            .await
            .map_err(map_repository_error)?;
        if !written {
            return Err(marker_not_found(request.marker_id));
        }
        Ok(updated)
    }

    async fn delete_marker(&self, request: DeleteMarkerRequest) -> Result<(), Error> {
        self.owned_marker(&request.owner, request.marker_id)
            .await?;
        let removed = self
            .markers
            .delete(&request.owner, request.marker_id)
            .await
            .map_err(map_repository_error)?;
        if !removed {
            return Err(marker_not_found(request.marker_id));
        }
        debug!(marker_id = %request.marker_id, "marker deleted");
        Ok(())
    }
}

#[async_trait]
impl<R> MarkerQuery for MarkerService<R>
where
    R: MarkerRepository,
{
    async fn list_markers(&self, owner: UserId) -> Result<Vec<Marker>, Error> {
        self.markers
            .list_by_owner(&owner)
            .await
            .map_err(map_repository_error)
    }

    async fn find_for_export(
        &self,
        owner: UserId,
        ids: Option<Vec<MarkerId>>,
    ) -> Result<Vec<Marker>, Error> {
        match ids {
            Some(ids) if !ids.is_empty() => self
                .markers
                .list_by_owner_and_ids(&owner, &ids)
                .await
                .map_err(map_repository_error),
            _ => self.list_markers(owner).await,
        }
    }

    async fn export_markers(&self, request: ExportMarkersRequest) -> Result<ExportDocument, Error> {
        let markers = self
            .find_for_export(request.owner, request.marker_ids)
            .await?;
        debug!(format = %request.format, count = markers.len(), "exporting markers");
        render_export(request.format, &markers)
    }
}

#[cfg(test)]
#[path = "marker_service_tests.rs"]
mod tests;
