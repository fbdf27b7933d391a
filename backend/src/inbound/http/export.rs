//! Marker export handler.
//!
//! ```text
//! POST /api/export {"format":"csv","markers":[1,2]}
//! ```
//!
//! JSON exports are returned inline; CSV and GPX are offered as downloads.

use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::ExportMarkersRequest;
use crate::domain::{ApiResult, Error, ExportDocument, ExportFormat, ExportRecord, MarkerId};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Export request body.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct ExportBody {
    /// `json` (default), `csv`, or `gpx`; case-insensitive.
    pub format: Option<String>,
    /// Marker ids to export; absent or empty exports every marker the caller
    /// owns. Ids the caller does not own are skipped.
    pub markers: Option<Vec<i64>>,
}

fn attachment(format: ExportFormat, body: Vec<u8>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(format.content_type())
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(format.file_name().to_owned())],
        })
        .body(body)
}

/// Export the caller's markers.
#[utoipa::path(
    post,
    path = "/api/export",
    request_body = ExportBody,
    responses(
        (status = 200, description = "JSON records, or a CSV/GPX attachment", body = [ExportRecord]),
        (status = 400, description = "Unsupported format", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["markers"],
    operation_id = "exportMarkers"
)]
#[post("/export")]
pub async fn export_markers(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ExportBody>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let ExportBody { format, markers } = payload.into_inner();
    let format = format
        .as_deref()
        .map(str::parse::<ExportFormat>)
        .transpose()?
        .unwrap_or_default();
    let marker_ids = markers.map(|ids| ids.into_iter().map(MarkerId::new).collect());

    let document = state
        .markers_query
        .export_markers(ExportMarkersRequest {
            owner,
            format,
            marker_ids,
        })
        .await?;
    Ok(match document {
        ExportDocument::Json(records) => HttpResponse::Ok().json(records),
        ExportDocument::Attachment { format, body } => attachment(format, body),
    })
}
