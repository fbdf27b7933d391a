//! End-to-end tests over the fully wired application with in-memory storage.

use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::http::StatusCode;
use actix_web::{test as actix_test, web};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use markers::domain::TRACE_ID_HEADER;
use markers::inbound::http::markers::MarkerResponse;
use markers::outbound::memory::{InMemoryMarkerRepository, InMemoryUserRepository};
use markers::outbound::security::BcryptPasswordHasher;

use super::state_builders::build_services;
use super::{AppDependencies, HealthState, build_app, create_server};

#[fixture]
fn deps() -> AppDependencies {
    let state = build_services(
        InMemoryUserRepository::new(),
        InMemoryMarkerRepository::new(),
        BcryptPasswordHasher::with_cost(4),
    );
    AppDependencies {
        health_state: web::Data::new(HealthState::new()),
        http_state: web::Data::new(state),
        key: Key::generate(),
        cookie_secure: false,
        same_site: SameSite::Lax,
    }
}

fn credentials(username: &str) -> [(&str, &str); 2] {
    [("username", username), ("password", "correct horse")]
}

fn cookie_from(res: &actix_web::dev::ServiceResponse) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie")
}

#[rstest]
#[actix_web::test]
async fn markers_are_scoped_to_their_owner(deps: AppDependencies) {
    let app = actix_test::init_service(build_app(deps)).await;

    let mut sessions = Vec::new();
    for username in ["alice", "bob"] {
        let registered = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/register")
                .set_form(credentials(username))
                .to_request(),
        )
        .await;
        assert_eq!(registered.status(), StatusCode::SEE_OTHER);
        let logged_in = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/login")
                .set_form(credentials(username))
                .to_request(),
        )
        .await;
        assert_eq!(
            logged_in.headers().get("location").and_then(|v| v.to_str().ok()),
            Some("/")
        );
        sessions.push(cookie_from(&logged_in));
    }
    let [alice, bob] = <[Cookie<'static>; 2]>::try_from(sessions).expect("two sessions");

    let created = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/markers")
            .cookie(alice.clone())
            .set_json(json!({ "lat": 48.85, "lon": 2.35, "name": "Paris" }))
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::OK);
    let created: MarkerResponse = actix_test::read_body_json(created).await;

    let as_alice: Vec<MarkerResponse> = actix_test::read_body_json(
        actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/markers")
                .cookie(alice)
                .to_request(),
        )
        .await,
    )
    .await;
    assert_eq!(as_alice, vec![created.clone()]);
    assert_eq!(as_alice[0].name, "Paris");

    let as_bob: Vec<MarkerResponse> = actix_test::read_body_json(
        actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/markers")
                .cookie(bob.clone())
                .to_request(),
        )
        .await,
    )
    .await;
    assert!(as_bob.is_empty());

    let stolen = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/api/markers/{}", created.id))
            .cookie(bob)
            .to_request(),
    )
    .await;
    assert_eq!(stolen.status(), StatusCode::FORBIDDEN);
}

#[rstest]
#[actix_web::test]
async fn responses_carry_a_trace_id(deps: AppDependencies) {
    let app = actix_test::init_service(build_app(deps)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/markers").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let header = res
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .expect("trace id header");
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["traceId"], header.as_str());
}

#[rstest]
#[actix_web::test]
async fn malformed_json_is_a_bad_request(deps: AppDependencies) {
    let app = actix_test::init_service(build_app(deps)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/markers")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"lat\":")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
}

#[rstest]
#[actix_web::test]
async fn create_server_marks_the_service_ready() {
    let health_state = web::Data::new(HealthState::new());
    let config = super::ServerConfig::new(
        Key::generate(),
        false,
        SameSite::Lax,
        "127.0.0.1:0".parse().expect("loopback address"),
    );

    let server = create_server(health_state.clone(), config).expect("server binds");
    assert!(health_state.is_ready());
    drop(server);
}
