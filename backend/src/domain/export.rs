//! Rendering marker sets as JSON, CSV, or GPX documents.
//!
//! Export records use the canonical names `latitude` and `longitude`; the
//! marker API itself keeps the short `lat`/`lon` names.

use std::fmt;
use std::str::FromStr;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use super::{Error, Marker};

/// CSV header row, in column order.
pub const CSV_HEADER: [&str; 5] = ["Latitude", "Longitude", "Name", "Description", "Color"];

const GPX_NAMESPACE: &str = "http://www.topografix.com/GPX/1/1";
const GPX_CREATOR: &str = "markers";

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// JSON array returned inline.
    #[default]
    Json,
    /// Comma-separated values attachment.
    Csv,
    /// GPX 1.1 waypoints attachment.
    Gpx,
}

impl ExportFormat {
    /// Media type of the rendered document.
    #[must_use]
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Csv => "text/csv; charset=utf-8",
            Self::Gpx => "application/gpx+xml",
        }
    }

    /// Download file name offered for attachments.
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Json => "markers.json",
            Self::Csv => "markers.csv",
            Self::Gpx => "markers.gpx",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Gpx => "gpx",
        })
    }
}

/// Error returned when a format tag is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported export format: {0}")]
pub struct UnsupportedFormat(pub String);

impl FromStr for ExportFormat {
    type Err = UnsupportedFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "gpx" => Ok(Self::Gpx),
            _ => Err(UnsupportedFormat(s.to_owned())),
        }
    }
}

impl From<UnsupportedFormat> for Error {
    fn from(value: UnsupportedFormat) -> Self {
        Self::invalid_request("Invalid format").with_details(json!({
            "field": "format",
            "value": value.0,
            "code": "unsupported_format",
        }))
    }
}

/// One exported marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ExportRecord {
    pub name: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub color: String,
}

impl From<&Marker> for ExportRecord {
    fn from(marker: &Marker) -> Self {
        Self {
            name: marker.name().to_owned(),
            description: marker.description().to_owned(),
            latitude: marker.lat(),
            longitude: marker.lon(),
            color: marker.color().to_owned(),
        }
    }
}

/// Rendered export.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportDocument {
    /// Records to be returned as a JSON body.
    Json(Vec<ExportRecord>),
    /// Byte payload to be offered as a download.
    Attachment {
        format: ExportFormat,
        body: Vec<u8>,
    },
}

/// Render `markers` in the requested format, preserving input order.
///
/// # Errors
/// Returns an internal error if a writer fails; no partial document is
/// produced.
///
/// # Examples
/// ```
/// use markers::domain::{ExportDocument, ExportFormat, render_export};
///
/// let doc = render_export(ExportFormat::Csv, &[]).expect("render");
/// let ExportDocument::Attachment { body, .. } = doc else { panic!("csv is an attachment") };
/// assert_eq!(body, b"Latitude,Longitude,Name,Description,Color\n");
/// ```
pub fn render_export(format: ExportFormat, markers: &[Marker]) -> Result<ExportDocument, Error> {
    match format {
        ExportFormat::Json => Ok(ExportDocument::Json(
            markers.iter().map(ExportRecord::from).collect(),
        )),
        ExportFormat::Csv => Ok(ExportDocument::Attachment {
            format,
            body: render_csv(markers)?,
        }),
        ExportFormat::Gpx => Ok(ExportDocument::Attachment {
            format,
            body: render_gpx(markers)?,
        }),
    }
}

fn render_csv(markers: &[Marker]) -> Result<Vec<u8>, Error> {
    let csv_error = |err: csv::Error| Error::internal(format!("csv export failed: {err}"));
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER).map_err(csv_error)?;
    for marker in markers {
        writer
            .write_record([
                marker.lat().to_string().as_str(),
                marker.lon().to_string().as_str(),
                marker.name(),
                marker.description(),
                marker.color(),
            ])
            .map_err(csv_error)?;
    }
    writer
        .into_inner()
        .map_err(|err| Error::internal(format!("csv export failed: {}", err.error())))
}

fn render_gpx(markers: &[Marker]) -> Result<Vec<u8>, Error> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    write_gpx(&mut writer, markers)
        .map_err(|err| Error::internal(format!("gpx export failed: {err}")))?;
    Ok(writer.into_inner())
}

type WriteResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

fn write_gpx(writer: &mut Writer<Vec<u8>>, markers: &[Marker]) -> WriteResult {
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    let mut root = BytesStart::new("gpx");
    root.push_attribute(("version", "1.1"));
    root.push_attribute(("creator", GPX_CREATOR));
    root.push_attribute(("xmlns", GPX_NAMESPACE));
    writer.write_event(Event::Start(root))?;

    for marker in markers {
        let lat = marker.lat().to_string();
        let lon = marker.lon().to_string();
        let mut waypoint = BytesStart::new("wpt");
        waypoint.push_attribute(("lat", lat.as_str()));
        waypoint.push_attribute(("lon", lon.as_str()));
        writer.write_event(Event::Start(waypoint))?;
        write_text_element(writer, "name", marker.name())?;
        if !marker.description().is_empty() {
            write_text_element(writer, "desc", marker.description())?;
        }
        write_text_element(writer, "type", marker.color())?;
        writer.write_event(Event::End(BytesEnd::new("wpt")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("gpx")))?;
    Ok(())
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, tag: &str, text: &str) -> WriteResult {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}
