//! Custom assertion helpers over recorded requests.

use axum::http::Method;

use crate::mock_server::RecordedRequest;

fn describe(requests: &[RecordedRequest]) -> Vec<String> {
    requests
        .iter()
        .map(|r| format!("{} {}", r.method, r.path))
        .collect()
}

/// Number of recorded requests matching `method path`.
pub fn request_count(requests: &[RecordedRequest], method: &Method, path: &str) -> usize {
    requests
        .iter()
        .filter(|r| r.method == *method && r.path == path)
        .count()
}

/// Returns the first request matching `method path`.
///
/// # Panics
///
/// Panics if no such request was recorded.
pub fn assert_requested<'a>(
    requests: &'a [RecordedRequest],
    method: &Method,
    path: &str,
) -> &'a RecordedRequest {
    requests
        .iter()
        .find(|r| r.method == *method && r.path == path)
        .unwrap_or_else(|| {
            panic!(
                "Expected {method} {path}, got: {:?}",
                describe(requests)
            )
        })
}

/// Asserts that `method path` was never requested.
///
/// # Panics
///
/// Panics if a matching request was recorded.
pub fn assert_not_requested(requests: &[RecordedRequest], method: &Method, path: &str) {
    assert_eq!(
        request_count(requests, method, path),
        0,
        "Expected no {method} {path}, got: {:?}",
        describe(requests)
    );
}

/// Asserts that `method path` was requested exactly `expected` times.
///
/// # Panics
///
/// Panics on a different count.
pub fn assert_request_count(
    requests: &[RecordedRequest],
    method: &Method,
    path: &str,
    expected: usize,
) {
    assert_eq!(
        request_count(requests, method, path),
        expected,
        "Unexpected number of {method} {path} requests in {:?}",
        describe(requests)
    );
}

/// Asserts the bearer token and versioned `Accept` header every call carries.
///
/// # Panics
///
/// Panics if either header is missing or wrong.
pub fn assert_platform_headers(request: &RecordedRequest, api_key: &str) {
    let expected = format!("Bearer {api_key}");
    assert_eq!(
        request.authorization.as_deref(),
        Some(expected.as_str()),
        "Authorization header on {} {}",
        request.method,
        request.path
    );
    assert_eq!(
        request.accept.as_deref(),
        Some("application/vnd.heroku+json; version=3"),
        "Accept header on {} {}",
        request.method,
        request.path
    );
}

/// Asserts `Content-Type: application/json` is present exactly for verbs
/// that carry a body.
///
/// # Panics
///
/// Panics if the header is present on GET/DELETE or missing on
/// PATCH/POST/PUT.
pub fn assert_content_type_matches_method(request: &RecordedRequest) {
    let carries_body = [Method::PATCH, Method::POST, Method::PUT].contains(&request.method);
    if carries_body {
        assert_eq!(
            request.content_type.as_deref(),
            Some("application/json"),
            "Content-Type on {} {}",
            request.method,
            request.path
        );
    } else {
        assert!(
            request.content_type.is_none(),
            "Unexpected Content-Type {:?} on {} {}",
            request.content_type,
            request.method,
            request.path
        );
    }
}
