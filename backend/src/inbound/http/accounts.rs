//! Account and page handlers.
//!
//! ```text
//! GET  /login     -> {"messages": [...]}
//! POST /login     username=alice&password=...  -> 303 /
//! GET  /register  -> {"messages": [...]}
//! POST /register  username=alice&password=...  -> 303 /login
//! GET  /logout    -> 303 /login
//! GET  /          -> {"userId": "..."} or 303 /login
//! ```
//!
//! Form submissions follow POST/Redirect/GET: outcomes the user can act on
//! (bad credentials, taken username, invalid input) are flashed and the
//! browser is sent back to the form. Infrastructure failures surface as JSON
//! errors.

use actix_web::http::header;
use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{
    ApiResult, Credentials, Error, ErrorCode, INVALID_CREDENTIALS_MESSAGE,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::credentials_validation_error;

const LOGIN_PAGE: &str = "/login";
const REGISTER_PAGE: &str = "/register";
const HOME_PAGE: &str = "/";
const REGISTERED_MESSAGE: &str = "Registration successful. Please login.";

/// Login and registration form fields.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct CredentialsForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Page payload carrying drained flash messages.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct PageResponse {
    pub messages: Vec<String>,
}

/// Landing page payload for an authenticated user.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IndexResponse {
    pub user_id: String,
}

fn see_other(location: &'static str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Flash user-facing failures and redirect to `page`; propagate the rest.
fn flash_or_fail(
    session: &SessionContext,
    error: Error,
    page: &'static str,
) -> ApiResult<HttpResponse> {
    match error.code() {
        ErrorCode::InvalidRequest | ErrorCode::Unauthorized | ErrorCode::Conflict => {
            session.flash(error.message())?;
            Ok(see_other(page))
        }
        _ => Err(error),
    }
}

fn page(session: &SessionContext) -> ApiResult<web::Json<PageResponse>> {
    Ok(web::Json(PageResponse {
        messages: session.take_flashes()?,
    }))
}

/// Login page state.
#[utoipa::path(
    get,
    path = "/login",
    responses((status = 200, description = "Pending messages", body = PageResponse)),
    tags = ["accounts"],
    operation_id = "loginPage",
    security([])
)]
#[get("/login")]
pub async fn login_page(session: SessionContext) -> ApiResult<web::Json<PageResponse>> {
    page(&session)
}

/// Authenticate and bind the session to the user.
#[utoipa::path(
    post,
    path = "/login",
    request_body(content = CredentialsForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect to / on success, back to /login otherwise",
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<CredentialsForm>,
) -> ApiResult<HttpResponse> {
    let CredentialsForm { username, password } = form.into_inner();
    let Ok(credentials) = Credentials::try_from_parts(&username, &password) else {
        return flash_or_fail(
            &session,
            Error::unauthorized(INVALID_CREDENTIALS_MESSAGE),
            LOGIN_PAGE,
        );
    };
    match state.accounts.authenticate(&credentials).await {
        Ok(user_id) => {
            session.persist_user(&user_id)?;
            info!(%user_id, "user logged in");
            Ok(see_other(HOME_PAGE))
        }
        Err(error) => flash_or_fail(&session, error, LOGIN_PAGE),
    }
}

/// Registration page state.
#[utoipa::path(
    get,
    path = "/register",
    responses((status = 200, description = "Pending messages", body = PageResponse)),
    tags = ["accounts"],
    operation_id = "registerPage",
    security([])
)]
#[get("/register")]
pub async fn register_page(session: SessionContext) -> ApiResult<web::Json<PageResponse>> {
    page(&session)
}

/// Create an account; the user logs in separately afterwards.
#[utoipa::path(
    post,
    path = "/register",
    request_body(content = CredentialsForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect to /login on success, back to /register otherwise"),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<CredentialsForm>,
) -> ApiResult<HttpResponse> {
    let CredentialsForm { username, password } = form.into_inner();
    let credentials = match Credentials::try_from_parts(&username, &password) {
        Ok(credentials) => credentials,
        Err(err) => {
            return flash_or_fail(&session, credentials_validation_error(err), REGISTER_PAGE);
        }
    };
    match state.accounts.register(&credentials).await {
        Ok(user_id) => {
            info!(%user_id, "user registered");
            session.flash(REGISTERED_MESSAGE)?;
            Ok(see_other(LOGIN_PAGE))
        }
        Err(error) => flash_or_fail(&session, error, REGISTER_PAGE),
    }
}

/// End the session.
#[utoipa::path(
    get,
    path = "/logout",
    responses((status = 303, description = "Redirect to /login")),
    tags = ["accounts"],
    operation_id = "logout"
)]
#[get("/logout")]
pub async fn logout(session: SessionContext) -> ApiResult<HttpResponse> {
    if let Some(user_id) = session.user_id()? {
        info!(%user_id, "user logged out");
    }
    session.end();
    Ok(see_other(LOGIN_PAGE))
}

/// Landing page; anonymous visitors are sent to the login page.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Authenticated user", body = IndexResponse),
        (status = 303, description = "Redirect to /login without a session")
    ),
    tags = ["accounts"],
    operation_id = "index"
)]
#[get("/")]
pub async fn index(session: SessionContext) -> ApiResult<HttpResponse> {
    Ok(match session.user_id()? {
        Some(user_id) => HttpResponse::Ok().json(IndexResponse {
            user_id: user_id.to_string(),
        }),
        None => see_other(LOGIN_PAGE),
    })
}

#[cfg(test)]
#[path = "accounts_tests.rs"]
mod tests;
