//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories are thin translators between Diesel rows (`models.rs`,
//! `schema.rs`, both private) and domain types. Connections come from a
//! `bb8` pool through `diesel-async`; failures become port errors.
//!
//! # Example
//!
//! ```ignore
//! use markers::outbound::persistence::{DbPool, DieselMarkerRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/markers")).await?;
//! let markers = DieselMarkerRepository::new(pool);
//! ```

mod diesel_error_mapping;
mod diesel_marker_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_marker_repository::DieselMarkerRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
