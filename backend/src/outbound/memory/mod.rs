//! In-memory repositories.
//!
//! Used when no database URL is configured and by HTTP integration tests.
//! Each repository guards its state with a single mutex, so every operation
//! is atomic with respect to the others.

mod marker_repository;
mod user_repository;

pub use marker_repository::InMemoryMarkerRepository;
pub use user_repository::InMemoryUserRepository;
