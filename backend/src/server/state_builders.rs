//! Builders wiring repositories into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use markers::domain::ports::{MarkerRepository, PasswordHasher, UserRepository};
use markers::domain::{AccountService, MarkerService};
use markers::inbound::http::state::HttpState;
use markers::outbound::memory::{InMemoryMarkerRepository, InMemoryUserRepository};
use markers::outbound::persistence::{DieselMarkerRepository, DieselUserRepository};
use markers::outbound::security::BcryptPasswordHasher;

use super::ServerConfig;

/// Assemble the account and marker services over the given adapters.
pub(crate) fn build_services<U, M, H>(users: U, markers: M, hasher: H) -> HttpState
where
    U: UserRepository + 'static,
    M: MarkerRepository + 'static,
    H: PasswordHasher + 'static,
{
    let accounts = Arc::new(AccountService::new(Arc::new(users), Arc::new(hasher)));
    let markers = Arc::new(MarkerService::new(Arc::new(markers)));
    HttpState::new(accounts, markers.clone(), markers)
}

/// Build HTTP state backed by PostgreSQL when a pool is configured, otherwise
/// by process-local memory.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let hasher = BcryptPasswordHasher::new();
    let state = match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL repositories");
            build_services(
                DieselUserRepository::new(pool.clone()),
                DieselMarkerRepository::new(pool.clone()),
                hasher,
            )
        }
        None => {
            info!("using in-memory repositories; data is lost on restart");
            build_services(
                InMemoryUserRepository::new(),
                InMemoryMarkerRepository::new(),
                hasher,
            )
        }
    };
    web::Data::new(state)
}
