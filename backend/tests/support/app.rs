//! Application assembly shared by the integration suites.
//!
//! Storage is in-memory and bcrypt runs at its minimum cost so scenarios stay
//! fast. Each request builds a fresh service over the same shared state; the
//! cookie session carries identity between them.

use std::sync::Arc;

use actix_session::SessionMiddleware;
use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::{Cookie, Key, SameSite, time::Duration as CookieDuration};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use markers::Trace;
use markers::domain::{AccountService, MarkerService};
use markers::inbound::http::accounts::{
    index, login, login_page, logout, register, register_page,
};
use markers::inbound::http::export::export_markers;
use markers::inbound::http::markers::{create_marker, delete_marker, list_markers, update_marker};
use markers::inbound::http::session_config::SESSION_COOKIE_NAME;
use markers::inbound::http::state::HttpState;
use markers::inbound::http::{form_error_handler, json_error_handler, path_error_handler};
use markers::outbound::memory::{InMemoryMarkerRepository, InMemoryUserRepository};
use markers::outbound::security::BcryptPasswordHasher;

/// Shared state and signing key for one test.
#[derive(Clone)]
pub(crate) struct TestBackend {
    pub(crate) state: web::Data<HttpState>,
    pub(crate) key: Key,
}

impl TestBackend {
    pub(crate) fn new() -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let hasher = Arc::new(BcryptPasswordHasher::with_cost(4));
        let accounts = Arc::new(AccountService::new(users, hasher));
        let markers = Arc::new(MarkerService::new(Arc::new(InMemoryMarkerRepository::new())));
        Self {
            state: web::Data::new(HttpState::new(accounts, markers.clone(), markers)),
            key: Key::generate(),
        }
    }

    pub(crate) fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        let session = SessionMiddleware::builder(CookieSessionStore::default(), self.key.clone())
            .cookie_name(SESSION_COOKIE_NAME.to_owned())
            .cookie_secure(false)
            .cookie_http_only(true)
            .cookie_content_security(CookieContentSecurity::Private)
            .cookie_same_site(SameSite::Lax)
            .session_lifecycle(PersistentSession::default().session_ttl(CookieDuration::hours(2)))
            .build();

        App::new()
            .app_data(self.state.clone())
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::FormConfig::default().error_handler(form_error_handler))
            .app_data(web::PathConfig::default().error_handler(path_error_handler))
            .wrap(session)
            .wrap(Trace)
            .service(
                web::scope("/api")
                    .service(list_markers)
                    .service(create_marker)
                    .service(update_marker)
                    .service(delete_marker)
                    .service(export_markers),
            )
            .service(index)
            .service(login_page)
            .service(login)
            .service(register_page)
            .service(register)
            .service(logout)
    }
}

/// Session cookie set by a response, if any.
pub(crate) fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(Cookie::into_owned)
}

/// `Location` header of a redirect.
pub(crate) fn location<B>(res: &ServiceResponse<B>) -> Option<String> {
    res.headers()
        .get(actix_web::http::header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}
