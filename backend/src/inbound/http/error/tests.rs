//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use actix_web::test::TestRequest;
use rstest::rstest;
use serde_json::{Value, json};

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("taken"), StatusCode::CONFLICT)]
#[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
}

#[actix_web::test]
async fn error_response_echoes_trace_id_and_message() {
    let error = Error::conflict("Email already in use by another user").with_trace_id("abc");

    let response = ResponseError::error_response(&error);

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|v| v.to_str().ok()),
        Some("abc")
    );
    let bytes = to_bytes(response.into_body()).await.expect("body");
    let body: Value = serde_json::from_slice(&bytes).expect("json body");
    assert_eq!(body, json!("Email already in use by another user"));
}

#[actix_web::test]
async fn error_body_hides_code_and_details() {
    let error = Error::invalid_request("Invalid input: Name is required and Email must be valid")
        .with_details(json!({ "field": "name", "code": "empty_name" }))
        .with_trace_id("abc");

    let response = ResponseError::error_response(&error);

    let bytes = to_bytes(response.into_body()).await.expect("body");
    assert_eq!(
        bytes.as_ref(),
        br#""Invalid input: Name is required and Email must be valid""#
    );
}

#[actix_web::test]
async fn error_without_trace_id_omits_header() {
    let response = ResponseError::error_response(&Error::not_found("User not found"));
    assert!(response.headers().get(TRACE_ID_HEADER).is_none());
}

#[actix_web::test]
async fn payload_errors_become_invalid_request() {
    let req = TestRequest::post().uri("/users").to_http_request();

    let err = json_payload_error(JsonPayloadError::ContentType, &req);

    let response = err.error_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body()).await.expect("body");
    let body: Value = serde_json::from_slice(&bytes).expect("json body");
    assert_eq!(body, json!(INVALID_PAYLOAD));
}
