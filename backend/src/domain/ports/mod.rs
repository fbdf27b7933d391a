//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`PasswordHasher`]) are implemented by
//! outbound adapters; driving ports ([`AccountCommand`], [`MarkerCommand`],
//! [`MarkerQuery`]) are implemented by domain services and called by the HTTP
//! adapter.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod marker_command;
mod marker_query;
mod marker_repository;
mod password_hasher;
mod user_repository;

pub use account_command::AccountCommand;
#[cfg(test)]
pub use account_command::MockAccountCommand;
pub use marker_command::{
    CreateMarkerRequest, DeleteMarkerRequest, MarkerCommand, UpdateMarkerRequest,
};
#[cfg(test)]
pub use marker_command::MockMarkerCommand;
pub use marker_query::{ExportMarkersRequest, MarkerQuery};
#[cfg(test)]
pub use marker_query::MockMarkerQuery;
#[cfg(test)]
pub use marker_repository::MockMarkerRepository;
pub use marker_repository::{MarkerRepository, MarkerRepositoryError};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
