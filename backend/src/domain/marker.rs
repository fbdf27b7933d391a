//! Map markers and the validated inputs used to create or change them.
//!
//! A marker is a named point owned by exactly one user. Ownership is fixed at
//! creation; [`MarkerPatch`] deliberately has no owner field.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::UserId;

/// Colour assigned when a marker is created without one.
pub const DEFAULT_MARKER_COLOR: &str = "red";
/// Maximum marker name length.
pub const MARKER_NAME_MAX: usize = 100;
/// Maximum marker description length.
pub const MARKER_DESCRIPTION_MAX: usize = 500;
/// Maximum marker colour length.
pub const MARKER_COLOR_MAX: usize = 20;

/// Validation errors for marker fields.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MarkerValidationError {
    #[error("lat must be a finite number between -90 and 90")]
    LatitudeOutOfRange { value: f64 },
    #[error("lon must be a finite number between -180 and 180")]
    LongitudeOutOfRange { value: f64 },
    #[error("name must not be empty")]
    EmptyName,
    #[error("name must be at most {max} characters")]
    NameTooLong { max: usize },
    #[error("description must be at most {max} characters")]
    DescriptionTooLong { max: usize },
    #[error("color must not be empty")]
    EmptyColor,
    #[error("color must be at most {max} characters")]
    ColorTooLong { max: usize },
    #[error("{field} must not contain control characters")]
    InvalidCharacter { field: &'static str },
}

impl MarkerValidationError {
    /// API field name the error refers to.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::LatitudeOutOfRange { .. } => "lat",
            Self::LongitudeOutOfRange { .. } => "lon",
            Self::EmptyName | Self::NameTooLong { .. } => "name",
            Self::DescriptionTooLong { .. } => "description",
            Self::EmptyColor | Self::ColorTooLong { .. } => "color",
            Self::InvalidCharacter { field } => *field,
        }
    }

    /// Stable machine-readable reason.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            Self::LatitudeOutOfRange { .. } | Self::LongitudeOutOfRange { .. } => "out_of_range",
            Self::EmptyName | Self::EmptyColor => "empty",
            Self::NameTooLong { .. }
            | Self::DescriptionTooLong { .. }
            | Self::ColorTooLong { .. } => "too_long",
            Self::InvalidCharacter { .. } => "invalid_character",
        }
    }
}

/// Storage-assigned marker identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkerId(i64);

impl MarkerId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

fn validate_latitude(value: f64) -> Result<f64, MarkerValidationError> {
    if value.is_finite() && (-90.0..=90.0).contains(&value) {
        Ok(value)
    } else {
        Err(MarkerValidationError::LatitudeOutOfRange { value })
    }
}

fn validate_longitude(value: f64) -> Result<f64, MarkerValidationError> {
    if value.is_finite() && (-180.0..=180.0).contains(&value) {
        Ok(value)
    } else {
        Err(MarkerValidationError::LongitudeOutOfRange { value })
    }
}

/// Reject characters XML 1.0 cannot carry: C0 controls other than tab, line
/// feed, and carriage return.
fn reject_control_chars(value: &str, field: &'static str) -> Result<(), MarkerValidationError> {
    let forbidden = |c: char| c < '\u{20}' && !matches!(c, '\t' | '\n' | '\r');
    if value.chars().any(forbidden) {
        return Err(MarkerValidationError::InvalidCharacter { field });
    }
    Ok(())
}

fn validate_name(value: &str) -> Result<String, MarkerValidationError> {
    reject_control_chars(value, "name")?;
    if value.trim().is_empty() {
        return Err(MarkerValidationError::EmptyName);
    }
    if value.chars().count() > MARKER_NAME_MAX {
        return Err(MarkerValidationError::NameTooLong {
            max: MARKER_NAME_MAX,
        });
    }
    Ok(value.to_owned())
}

fn validate_description(value: &str) -> Result<String, MarkerValidationError> {
    reject_control_chars(value, "description")?;
    if value.chars().count() > MARKER_DESCRIPTION_MAX {
        return Err(MarkerValidationError::DescriptionTooLong {
            max: MARKER_DESCRIPTION_MAX,
        });
    }
    Ok(value.to_owned())
}

fn validate_color(value: &str) -> Result<String, MarkerValidationError> {
    reject_control_chars(value, "color")?;
    if value.trim().is_empty() {
        return Err(MarkerValidationError::EmptyColor);
    }
    if value.chars().count() > MARKER_COLOR_MAX {
        return Err(MarkerValidationError::ColorTooLong {
            max: MARKER_COLOR_MAX,
        });
    }
    Ok(value.to_owned())
}

/// Persisted marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    id: MarkerId,
    owner: UserId,
    lat: f64,
    lon: f64,
    name: String,
    description: String,
    color: String,
}

impl Marker {
    /// Combine a storage-assigned id with the draft it was created from.
    #[must_use]
    pub fn from_draft(id: MarkerId, owner: UserId, draft: MarkerDraft) -> Self {
        let MarkerDraft {
            lat,
            lon,
            name,
            description,
            color,
        } = draft;
        Self {
            id,
            owner,
            lat,
            lon,
            name,
            description,
            color,
        }
    }

    /// Identifier.
    #[must_use]
    pub fn id(&self) -> MarkerId {
        self.id
    }

    /// Owning user.
    #[must_use]
    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    /// Latitude in decimal degrees.
    #[must_use]
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in decimal degrees.
    #[must_use]
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-form description; empty when none was given.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Display colour.
    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Whether `user` owns this marker.
    #[must_use]
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.owner == user
    }

    /// Return a copy with the supplied patch fields replaced.
    ///
    /// # Examples
    /// ```
    /// use markers::domain::{Marker, MarkerDraft, MarkerId, MarkerPatch, UserId};
    ///
    /// let draft = MarkerDraft::new(48.85, 2.35, "Paris", None, None).expect("draft");
    /// let marker = Marker::from_draft(MarkerId::new(1), UserId::random(), draft);
    /// let patch = MarkerPatch::new(None, None, Some("Paris, FR"), None, None).expect("patch");
    /// let updated = marker.apply(patch);
    /// assert_eq!(updated.name(), "Paris, FR");
    /// assert_eq!(updated.color(), "red");
    /// ```
    #[must_use]
    pub fn apply(&self, patch: MarkerPatch) -> Self {
        let MarkerPatch {
            lat,
            lon,
            name,
            description,
            color,
        } = patch;
        Self {
            id: self.id,
            owner: self.owner,
            lat: lat.unwrap_or(self.lat),
            lon: lon.unwrap_or(self.lon),
            name: name.unwrap_or_else(|| self.name.clone()),
            description: description.unwrap_or_else(|| self.description.clone()),
            color: color.unwrap_or_else(|| self.color.clone()),
        }
    }
}

/// Validated input for creating a marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerDraft {
    lat: f64,
    lon: f64,
    name: String,
    description: String,
    color: String,
}

impl MarkerDraft {
    /// Validate create inputs, filling in the default description and colour.
    pub fn new(
        lat: f64,
        lon: f64,
        name: &str,
        description: Option<&str>,
        color: Option<&str>,
    ) -> Result<Self, MarkerValidationError> {
        Ok(Self {
            lat: validate_latitude(lat)?,
            lon: validate_longitude(lon)?,
            name: validate_name(name)?,
            description: validate_description(description.unwrap_or_default())?,
            color: validate_color(color.unwrap_or(DEFAULT_MARKER_COLOR))?,
        })
    }

    /// Latitude in decimal degrees.
    #[must_use]
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in decimal degrees.
    #[must_use]
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Description, possibly empty.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Display colour.
    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }
}

/// Validated partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerPatch {
    lat: Option<f64>,
    lon: Option<f64>,
    name: Option<String>,
    description: Option<String>,
    color: Option<String>,
}

impl MarkerPatch {
    /// Validate the supplied fields.
    pub fn new(
        lat: Option<f64>,
        lon: Option<f64>,
        name: Option<&str>,
        description: Option<&str>,
        color: Option<&str>,
    ) -> Result<Self, MarkerValidationError> {
        Ok(Self {
            lat: lat.map(validate_latitude).transpose()?,
            lon: lon.map(validate_longitude).transpose()?,
            name: name.map(validate_name).transpose()?,
            description: description.map(validate_description).transpose()?,
            color: color.map(validate_color).transpose()?,
        })
    }

    /// Whether no field was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
