//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on driving ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AccountCommand, MarkerCommand, MarkerQuery};

/// Dependency bundle for HTTP handlers.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use markers::domain::{AccountService, MarkerService};
/// use markers::inbound::http::state::HttpState;
/// use markers::outbound::memory::{InMemoryMarkerRepository, InMemoryUserRepository};
/// use markers::outbound::security::BcryptPasswordHasher;
///
/// let accounts = AccountService::new(
///     Arc::new(InMemoryUserRepository::default()),
///     Arc::new(BcryptPasswordHasher::with_cost(4)),
/// );
/// let markers = Arc::new(MarkerService::new(Arc::new(InMemoryMarkerRepository::default())));
/// let state = HttpState::new(Arc::new(accounts), markers.clone(), markers);
/// let _accounts = state.accounts.clone();
/// ```
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountCommand>,
    pub markers: Arc<dyn MarkerCommand>,
    pub markers_query: Arc<dyn MarkerQuery>,
}

impl HttpState {
    /// Bundle the driving ports.
    pub fn new(
        accounts: Arc<dyn AccountCommand>,
        markers: Arc<dyn MarkerCommand>,
        markers_query: Arc<dyn MarkerQuery>,
    ) -> Self {
        Self {
            accounts,
            markers,
            markers_query,
        }
    }
}
