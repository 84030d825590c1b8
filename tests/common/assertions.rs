//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status,
        expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert response is a valid PNG image
pub fn assert_png(response: &TestResponse) {
    assert_ok(response);
    assert!(
        response.is_png(),
        "Expected PNG image, got {} bytes starting with {:?}",
        response.body.len(),
        &response.body[..8.min(response.body.len())]
    );
    assert_eq!(
        response.content_type(),
        Some("image/png"),
        "Expected Content-Type: image/png"
    );
}

/// Assert an error response carries the expected status in its JSON body
pub fn assert_json_status(response: &TestResponse, expected: StatusCode) {
    assert_status(response, expected);
    let json: serde_json::Value = response.json();
    assert_eq!(
        json["status"].as_u64(),
        Some(expected.as_u16() as u64),
        "Expected JSON status {}, got {:?}. Full response: {}",
        expected.as_u16(),
        json["status"],
        serde_json::to_string_pretty(&json).unwrap()
    );
    assert!(json["error"].is_string(), "Expected error message");
}

/// Assert a CSV shopping list and return its data rows
pub fn assert_csv(response: &TestResponse) -> Vec<String> {
    assert_ok(response);
    assert!(
        response
            .content_type()
            .is_some_and(|ct| ct.starts_with("text/csv")),
        "Expected text/csv, got {:?}",
        response.content_type()
    );
    let text = response.text();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("Color Name,Quantity"));
    lines.map(str::to_string).collect()
}
