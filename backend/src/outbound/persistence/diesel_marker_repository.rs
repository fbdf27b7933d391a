//! PostgreSQL-backed `MarkerRepository` implementation using Diesel ORM.
//!
//! Updates and deletes filter on `id` and `owner_id` in the same statement so
//! a non-owner can never write, even if ownership changed after the service
//! checked it.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{MarkerRepository, MarkerRepositoryError};
use crate::domain::{Marker, MarkerDraft, MarkerId, UserId};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, pool_failure_message};
use super::models::{MarkerChangeset, MarkerRow, NewMarkerRow};
use super::pool::{DbPool, PoolError};
use super::schema::markers;

/// Diesel-backed marker storage.
#[derive(Clone)]
pub struct DieselMarkerRepository {
    pool: DbPool,
}

impl DieselMarkerRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> MarkerRepositoryError {
    MarkerRepositoryError::connection(pool_failure_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> MarkerRepositoryError {
    match classify_diesel_error(&error) {
        DieselFailure::Connection(message) => MarkerRepositoryError::connection(message),
        DieselFailure::Query(message) => MarkerRepositoryError::query(message),
        DieselFailure::UniqueViolation => MarkerRepositoryError::query("duplicate marker id"),
    }
}

/// Rebuild a domain marker, revalidating the stored fields.
fn row_to_marker(row: MarkerRow) -> Result<Marker, MarkerRepositoryError> {
    let draft = MarkerDraft::new(
        row.lat,
        row.lon,
        &row.name,
        Some(row.description.as_str()),
        Some(row.color.as_str()),
    )
    .map_err(|err| {
        warn!(marker_id = row.id, error = %err, "stored marker fails validation");
        MarkerRepositoryError::query("stored marker record is invalid")
    })?;
    Ok(Marker::from_draft(
        MarkerId::new(row.id),
        UserId::from_uuid(row.owner_id),
        draft,
    ))
}

fn rows_to_markers(rows: Vec<MarkerRow>) -> Result<Vec<Marker>, MarkerRepositoryError> {
    rows.into_iter().map(row_to_marker).collect()
}

#[async_trait]
impl MarkerRepository for DieselMarkerRepository {
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Marker>, MarkerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<MarkerRow> = markers::table
            .filter(markers::owner_id.eq(owner.as_uuid()))
            .order(markers::id.asc())
            .select(MarkerRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_markers(rows)
    }

    async fn list_by_owner_and_ids(
        &self,
        owner: &UserId,
        ids: &[MarkerId],
    ) -> Result<Vec<Marker>, MarkerRepositoryError> {
        let raw_ids: Vec<i64> = ids.iter().map(|id| id.get()).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<MarkerRow> = markers::table
            .filter(markers::owner_id.eq(owner.as_uuid()))
            .filter(markers::id.eq_any(raw_ids))
            .order(markers::id.asc())
            .select(MarkerRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_markers(rows)
    }

    async fn find_by_id(&self, id: MarkerId) -> Result<Option<Marker>, MarkerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<MarkerRow> = markers::table
            .find(id.get())
            .select(MarkerRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_marker).transpose()
    }

    async fn insert(
        &self,
        owner: &UserId,
        draft: &MarkerDraft,
    ) -> Result<Marker, MarkerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewMarkerRow {
            lat: draft.lat(),
            lon: draft.lon(),
            name: draft.name(),
            description: draft.description(),
            color: draft.color(),
            owner_id: *owner.as_uuid(),
        };
        let id: i64 = diesel::insert_into(markers::table)
            .values(&row)
            .returning(markers::id)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(Marker::from_draft(MarkerId::new(id), *owner, draft.clone()))
    }

    async fn update(&self, marker: &Marker) -> Result<bool, MarkerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = MarkerChangeset {
            lat: marker.lat(),
            lon: marker.lon(),
            name: marker.name(),
            description: marker.description(),
            color: marker.color(),
        };
        let affected = diesel::update(
            markers::table
                .filter(markers::id.eq(marker.id().get()))
                .filter(markers::owner_id.eq(marker.owner().as_uuid())),
        )
        .set(&changes)
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(affected > 0)
    }

    async fn delete(&self, owner: &UserId, id: MarkerId) -> Result<bool, MarkerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let affected = diesel::delete(
            markers::table
                .filter(markers::id.eq(id.get()))
                .filter(markers::owner_id.eq(owner.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(affected > 0)
    }
}
