//! Marker API handlers.
//!
//! ```text
//! GET    /api/markers
//! POST   /api/markers      {"lat":48.85,"lon":2.35,"name":"Paris"}
//! PUT    /api/markers/{id} {"color":"blue"}
//! DELETE /api/markers/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{CreateMarkerRequest, DeleteMarkerRequest, UpdateMarkerRequest};
use crate::domain::{ApiResult, Error, Marker, MarkerDraft, MarkerId, MarkerPatch};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, marker_validation_error, require};

/// Marker as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MarkerResponse {
    pub id: i64,
    pub lat: f64,
    pub lon: f64,
    pub name: String,
    pub description: String,
    pub color: String,
}

impl From<&Marker> for MarkerResponse {
    fn from(marker: &Marker) -> Self {
        Self {
            id: marker.id().get(),
            lat: marker.lat(),
            lon: marker.lon(),
            name: marker.name().to_owned(),
            description: marker.description().to_owned(),
            color: marker.color().to_owned(),
        }
    }
}

/// Marker fields accepted on create and update.
///
/// `lat`, `lon`, and `name` are required on create; every field is optional
/// on update.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct MarkerBody {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
}

fn parse_draft(body: MarkerBody) -> Result<MarkerDraft, Error> {
    let lat = require(body.lat, FieldName::new("lat"))?;
    let lon = require(body.lon, FieldName::new("lon"))?;
    let name = require(body.name, FieldName::new("name"))?;
    MarkerDraft::new(
        lat,
        lon,
        &name,
        body.description.as_deref(),
        body.color.as_deref(),
    )
    .map_err(marker_validation_error)
}

fn parse_patch(body: MarkerBody) -> Result<MarkerPatch, Error> {
    MarkerPatch::new(
        body.lat,
        body.lon,
        body.name.as_deref(),
        body.description.as_deref(),
        body.color.as_deref(),
    )
    .map_err(marker_validation_error)
}

/// List the caller's markers.
#[utoipa::path(
    get,
    path = "/api/markers",
    responses(
        (status = 200, description = "Markers owned by the caller", body = [MarkerResponse]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["markers"],
    operation_id = "listMarkers"
)]
#[get("/markers")]
pub async fn list_markers(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<MarkerResponse>>> {
    let owner = session.require_user_id()?;
    let markers = state.markers_query.list_markers(owner).await?;
    Ok(web::Json(markers.iter().map(MarkerResponse::from).collect()))
}

/// Create a marker owned by the caller.
#[utoipa::path(
    post,
    path = "/api/markers",
    request_body = MarkerBody,
    responses(
        (status = 200, description = "Created marker", body = MarkerResponse),
        (status = 400, description = "Missing or invalid field", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["markers"],
    operation_id = "createMarker"
)]
#[post("/markers")]
pub async fn create_marker(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<MarkerBody>,
) -> ApiResult<web::Json<MarkerResponse>> {
    let owner = session.require_user_id()?;
    let draft = parse_draft(payload.into_inner())?;
    let marker = state
        .markers
        .create_marker(CreateMarkerRequest { owner, draft })
        .await?;
    Ok(web::Json(MarkerResponse::from(&marker)))
}

/// Replace the supplied fields of a marker the caller owns.
#[utoipa::path(
    put,
    path = "/api/markers/{id}",
    params(("id" = i64, Path, description = "Marker identifier")),
    request_body = MarkerBody,
    responses(
        (status = 200, description = "Updated marker", body = MarkerResponse),
        (status = 400, description = "Invalid field", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Marker owned by another user", body = Error),
        (status = 404, description = "Unknown marker", body = Error)
    ),
    tags = ["markers"],
    operation_id = "updateMarker"
)]
#[put("/markers/{id}")]
pub async fn update_marker(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
    payload: web::Json<MarkerBody>,
) -> ApiResult<web::Json<MarkerResponse>> {
    let owner = session.require_user_id()?;
    let patch = parse_patch(payload.into_inner())?;
    let marker = state
        .markers
        .update_marker(UpdateMarkerRequest {
            owner,
            marker_id: MarkerId::new(path.into_inner()),
            patch,
        })
        .await?;
    Ok(web::Json(MarkerResponse::from(&marker)))
}

/// Delete a marker the caller owns.
#[utoipa::path(
    delete,
    path = "/api/markers/{id}",
    params(("id" = i64, Path, description = "Marker identifier")),
    responses(
        (status = 204, description = "Marker deleted"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Marker owned by another user", body = Error),
        (status = 404, description = "Unknown marker", body = Error)
    ),
    tags = ["markers"],
    operation_id = "deleteMarker"
)]
#[delete("/markers/{id}")]
pub async fn delete_marker(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    state
        .markers
        .delete_marker(DeleteMarkerRequest {
            owner,
            marker_id: MarkerId::new(path.into_inner()),
        })
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "markers_tests.rs"]
mod tests;
