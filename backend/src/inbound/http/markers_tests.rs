//! Handler tests for the marker API, backed by port mocks.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{MockAccountCommand, MockMarkerCommand, MockMarkerQuery};
use crate::domain::{ErrorCode, UserId};
use crate::inbound::http::error::{json_error_handler, path_error_handler};
use crate::inbound::http::test_utils::{
    TEST_LOGIN_PATH, session_cookie, test_login, test_session_middleware,
};

#[fixture]
fn owner() -> UserId {
    UserId::random()
}

fn login_request(user: &UserId) -> actix_test::TestRequest {
    actix_test::TestRequest::get().uri(&TEST_LOGIN_PATH.replace("{id}", &user.to_string()))
}

fn state(command: MockMarkerCommand, query: MockMarkerQuery) -> HttpState {
    HttpState::new(
        Arc::new(MockAccountCommand::new()),
        Arc::new(command),
        Arc::new(query),
    )
}

fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .wrap(test_session_middleware())
        .route(TEST_LOGIN_PATH, web::get().to(test_login))
        .service(
            web::scope("/api")
                .service(list_markers)
                .service(create_marker)
                .service(update_marker)
                .service(delete_marker),
        )
}

fn paris(id: i64, owner: UserId) -> Marker {
    let draft = MarkerDraft::new(48.85, 2.35, "Paris", None, None).expect("draft");
    Marker::from_draft(MarkerId::new(id), owner, draft)
}

#[rstest]
#[actix_web::test]
async fn listing_without_a_session_is_unauthorised() {
    let mut query = MockMarkerQuery::new();
    query.expect_list_markers().times(0);
    let app = actix_test::init_service(test_app(state(MockMarkerCommand::new(), query))).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/markers").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "unauthorized");
}

#[rstest]
#[actix_web::test]
async fn listing_returns_api_field_names(owner: UserId) {
    let mut query = MockMarkerQuery::new();
    query
        .expect_list_markers()
        .withf(move |requested| *requested == owner)
        .return_once(move |owner| Ok(vec![paris(3, owner)]));
    let app = actix_test::init_service(test_app(state(MockMarkerCommand::new(), query))).await;

    let login = actix_test::call_service(&app, login_request(&owner).to_request()).await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/markers")
            .cookie(session_cookie(&login))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(
        body,
        json!([{
            "id": 3,
            "lat": 48.85,
            "lon": 2.35,
            "name": "Paris",
            "description": "",
            "color": "red"
        }])
    );
}

#[rstest]
#[case(json!({ "lon": 2.35, "name": "Paris" }), "lat")]
#[case(json!({ "lat": 48.85, "name": "Paris" }), "lon")]
#[case(json!({ "lat": 48.85, "lon": 2.35 }), "name")]
#[actix_web::test]
async fn create_requires_coordinates_and_name(
    owner: UserId,
    #[case] body: Value,
    #[case] field: &str,
) {
    let mut command = MockMarkerCommand::new();
    command.expect_create_marker().times(0);
    let app = actix_test::init_service(test_app(state(command, MockMarkerQuery::new()))).await;

    let login = actix_test::call_service(&app, login_request(&owner).to_request()).await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/markers")
            .cookie(session_cookie(&login))
            .set_json(body)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["details"]["field"], field);
    assert_eq!(body["details"]["code"], "missing_field");
}

#[rstest]
#[actix_web::test]
async fn create_rejects_out_of_range_latitude(owner: UserId) {
    let mut command = MockMarkerCommand::new();
    command.expect_create_marker().times(0);
    let app = actix_test::init_service(test_app(state(command, MockMarkerQuery::new()))).await;

    let login = actix_test::call_service(&app, login_request(&owner).to_request()).await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/markers")
            .cookie(session_cookie(&login))
            .set_json(json!({ "lat": 91.0, "lon": 0.0, "name": "North of north" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["details"], json!({ "field": "lat", "reason": "out_of_range" }));
}

#[rstest]
#[actix_web::test]
async fn create_passes_the_caller_as_owner(owner: UserId) {
    let mut command = MockMarkerCommand::new();
    command
        .expect_create_marker()
        .withf(move |request| request.owner == owner && request.draft.name() == "Paris")
        .return_once(|request| {
            Ok(Marker::from_draft(
                MarkerId::new(1),
                request.owner,
                request.draft,
            ))
        });
    let app = actix_test::init_service(test_app(state(command, MockMarkerQuery::new()))).await;

    let login = actix_test::call_service(&app, login_request(&owner).to_request()).await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/markers")
            .cookie(session_cookie(&login))
            .set_json(json!({ "lat": 48.85, "lon": 2.35, "name": "Paris" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: MarkerResponse = actix_test::read_body_json(res).await;
    assert_eq!(body.id, 1);
    assert_eq!(body.color, "red");
}

#[rstest]
#[case(Error::forbidden("You do not own this marker"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("marker 9 not found"), StatusCode::NOT_FOUND)]
#[actix_web::test]
async fn update_surfaces_ownership_and_lookup_failures(
    owner: UserId,
    #[case] failure: Error,
    #[case] status: StatusCode,
) {
    let mut command = MockMarkerCommand::new();
    command
        .expect_update_marker()
        .withf(|request| request.marker_id == MarkerId::new(9))
        .return_once(move |_| Err(failure));
    let app = actix_test::init_service(test_app(state(command, MockMarkerQuery::new()))).await;

    let login = actix_test::call_service(&app, login_request(&owner).to_request()).await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri("/api/markers/9")
            .cookie(session_cookie(&login))
            .set_json(json!({ "color": "blue" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), status);
}

#[rstest]
#[actix_web::test]
async fn delete_returns_no_content(owner: UserId) {
    let mut command = MockMarkerCommand::new();
    command
        .expect_delete_marker()
        .withf(move |request| request.owner == owner && request.marker_id == MarkerId::new(4))
        .return_once(|_| Ok(()));
    let app = actix_test::init_service(test_app(state(command, MockMarkerQuery::new()))).await;

    let login = actix_test::call_service(&app, login_request(&owner).to_request()).await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri("/api/markers/4")
            .cookie(session_cookie(&login))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert!(actix_test::read_body(res).await.is_empty());
}

#[rstest]
#[actix_web::test]
async fn non_numeric_ids_are_invalid_requests(owner: UserId) {
    let mut command = MockMarkerCommand::new();
    command.expect_delete_marker().times(0);
    let app = actix_test::init_service(test_app(state(command, MockMarkerQuery::new()))).await;

    let login = actix_test::call_service(&app, login_request(&owner).to_request()).await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri("/api/markers/paris")
            .cookie(session_cookie(&login))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Error = actix_test::read_body_json(res).await;
    assert_eq!(body.code(), ErrorCode::InvalidRequest);
}
