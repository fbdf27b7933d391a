//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer; repositories convert them
//! to domain values at the boundary.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{markers, users};

/// Row read from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    #[expect(dead_code, reason = "audit column is read but not surfaced")]
    pub created_at: DateTime<Utc>,
}

/// Insertable user record; `created_at` uses the column default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub password_hash: &'a str,
}

/// Row read from the markers table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = markers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MarkerRow {
    pub id: i64,
    pub lat: f64,
    pub lon: f64,
    pub name: String,
    pub description: String,
    pub color: String,
    pub owner_id: Uuid,
}

/// Insertable marker record; `id` comes from the sequence.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = markers)]
pub(crate) struct NewMarkerRow<'a> {
    pub lat: f64,
    pub lon: f64,
    pub name: &'a str,
    pub description: &'a str,
    pub color: &'a str,
    pub owner_id: Uuid,
}

/// Mutable marker columns. The owner is deliberately absent.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = markers)]
pub(crate) struct MarkerChangeset<'a> {
    pub lat: f64,
    pub lon: f64,
    pub name: &'a str,
    pub description: &'a str,
    pub color: &'a str,
}
