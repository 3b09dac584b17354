//! Tests for HTTP error mapping.

use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::{fixture, rstest};
use serde_json::json;

use super::*;
use crate::domain::Error;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn internal_error_case() -> Error {
    Error::internal("store exploded")
        .with_trace_id(TRACE_ID)
        .with_details(json!({ "secret": "x" }))
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::duplicate_email("taken"), StatusCode::CONFLICT)]
#[case(Error::invalid_credentials("nope"), StatusCode::UNAUTHORIZED)]
#[case(Error::pending_approval("wait"), StatusCode::FORBIDDEN)]
#[case(Error::unauthorized("login"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("denied"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::lead_time_violation("late"), StatusCode::UNPROCESSABLE_ENTITY)]
#[case(Error::self_request("own"), StatusCode::CONFLICT)]
#[case(Error::duplicate_request("again"), StatusCode::CONFLICT)]
#[case(Error::persistence("disk"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

async fn response_payload(error: Error) -> (StatusCode, Option<String>, Error) {
    let response = ResponseError::error_response(&error);
    let status = response.status();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .map(|value| value.to_str().expect("ascii header").to_owned());
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let payload = serde_json::from_slice(&bytes).expect("Error JSON deserialisation succeeds");
    (status, header, payload)
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted(internal_error_case: Error) {
    let (status, header, payload) = response_payload(internal_error_case).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(payload.message(), "Internal server error");
    assert!(payload.details().is_none());
}

#[rstest]
#[actix_web::test]
async fn workflow_errors_keep_message_and_details() {
    let error = Error::duplicate_request("carpool already requested")
        .with_details(json!({ "booking": { "id": "b1" } }));
    let (status, header, payload) = response_payload(error).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(header.is_none());
    assert_eq!(payload.code(), ErrorCode::DuplicateRequest);
    assert_eq!(payload.message(), "carpool already requested");
    assert_eq!(payload.details(), Some(&json!({ "booking": { "id": "b1" } })));
}

#[rstest]
fn actix_errors_become_redacted_internal_errors() {
    let err: Error = actix_web::error::ErrorBadRequest("boom").into();
    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Internal server error");
}

#[actix_web::test]
async fn malformed_json_is_an_invalid_request() {
    let app = actix_test::init_service(App::new().app_data(json_config()).route(
        "/",
        web::post().to(|_body: web::Json<serde_json::Value>| async { "ok" }),
    ))
    .await;
    let req = actix_test::TestRequest::post()
        .uri("/")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();

    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Error = actix_test::read_body_json(res).await;
    assert_eq!(body.code(), ErrorCode::InvalidRequest);
}
