//! Diesel table definitions for the PostgreSQL schema.
//!
//! These must match `backend/migrations` exactly; `diesel print-schema`
//! regenerates them from a live database.

diesel::table! {
    /// Registered accounts. `username` carries a unique constraint.
    users (id) {
        id -> Uuid,
        username -> Varchar,
        password_hash -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Map markers; `owner_id` cascades on user deletion.
    markers (id) {
        id -> Int8,
        lat -> Float8,
        lon -> Float8,
        name -> Varchar,
        description -> Varchar,
        color -> Varchar,
        owner_id -> Uuid,
    }
}

diesel::joinable!(markers -> users (owner_id));
diesel::allow_tables_to_appear_in_same_query!(markers, users);
