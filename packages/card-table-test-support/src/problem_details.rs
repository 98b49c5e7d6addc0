//! Assertions over Problem Details error bodies and `{"data": ...}` envelopes.

use actix_web::body::{to_bytes, BoxBody};
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Mirror of the application's Problem Details body
#[derive(Debug, Deserialize, Serialize)]
pub struct ProblemDetailsLike {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
    pub trace_id: String,
}

/// Assert that `resp` is a Problem Details response with the given status and
/// code, whose `trace_id` matches the `x-trace-id` header, and whose detail
/// contains `detail_contains` when given. Returns the parsed body.
pub async fn assert_problem_details(
    resp: ServiceResponse<BoxBody>,
    expected_status: StatusCode,
    expected_code: &str,
    detail_contains: Option<&str>,
) -> ProblemDetailsLike {
    assert_eq!(resp.status(), expected_status);

    let content_type = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert_eq!(content_type, "application/problem+json");

    let trace_id_header = resp
        .headers()
        .get("x-trace-id")
        .expect("x-trace-id header should be present")
        .to_str()
        .expect("x-trace-id header should be valid UTF-8")
        .to_string();

    let body = to_bytes(resp.into_body())
        .await
        .unwrap_or_else(|_| panic!("response body should be readable"));
    let problem: ProblemDetailsLike =
        serde_json::from_slice(&body).expect("body should be Problem Details JSON");

    assert_eq!(problem.trace_id, trace_id_header, "body trace_id should match header");
    assert_eq!(problem.code, expected_code);
    assert_eq!(problem.status, expected_status.as_u16());
    if let Some(expected) = detail_contains {
        assert!(
            problem.detail.contains(expected),
            "expected detail to contain '{expected}', got '{}'",
            problem.detail
        );
    }
    problem
}

/// Assert the status of a successful response and return its `data` payload.
pub async fn read_data(resp: ServiceResponse<BoxBody>, expected_status: StatusCode) -> Value {
    let status = resp.status();
    let body = to_bytes(resp.into_body())
        .await
        .unwrap_or_else(|_| panic!("response body should be readable"));
    assert_eq!(
        status,
        expected_status,
        "unexpected status; body: {}",
        String::from_utf8_lossy(&body)
    );

    let mut envelope: Value = serde_json::from_slice(&body).expect("body should be JSON");
    envelope
        .get_mut("data")
        .map(Value::take)
        .expect("body should carry a data envelope")
}
