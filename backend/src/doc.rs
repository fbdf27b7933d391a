//! OpenAPI documentation for the HTTP surface.
//!
//! [`ApiDoc`] registers every handler path, the request and response bodies
//! they use, and the session cookie security scheme. Swagger UI serves it in
//! debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode, ExportRecord};
use crate::inbound::http::accounts::{CredentialsForm, IndexResponse, PageResponse};
use crate::inbound::http::export::ExportBody;
use crate::inbound::http::markers::{MarkerBody, MarkerResponse};

/// Adds the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);
        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Map markers API",
        description = "Per-user map markers with JSON, CSV, and GPX export."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::markers::list_markers,
        crate::inbound::http::markers::create_marker,
        crate::inbound::http::markers::update_marker,
        crate::inbound::http::markers::delete_marker,
        crate::inbound::http::export::export_markers,
        crate::inbound::http::accounts::login_page,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::register_page,
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::logout,
        crate::inbound::http::accounts::index,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        ExportRecord,
        ExportBody,
        MarkerBody,
        MarkerResponse,
        CredentialsForm,
        PageResponse,
        IndexResponse
    )),
    tags(
        (name = "markers", description = "Marker CRUD and export"),
        (name = "accounts", description = "Registration, login, and session pages"),
        (name = "health", description = "Orchestration probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/api/markers")]
    #[case("/api/markers/{id}")]
    #[case("/api/export")]
    #[case("/login")]
    #[case("/register")]
    #[case("/logout")]
    #[case("/health/ready")]
    fn document_lists_paths(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn document_registers_session_cookie_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
        assert!(components.schemas.contains_key("MarkerResponse"));
    }
}
