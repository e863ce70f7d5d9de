//! Decoded results paired with the response headers they came with.

use reqwest::header::HeaderMap;

/// Result of one client call: the decoded data plus the headers of the last
/// response the call received.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    /// Decoded payload.
    pub data: T,
    /// Response headers.
    pub headers: HeaderMap,
}

impl<T> ApiResponse<T> {
    /// Pairs data with headers.
    #[must_use]
    pub fn new(data: T, headers: HeaderMap) -> Self {
        Self { data, headers }
    }

    /// Discards the headers.
    #[must_use]
    pub fn into_data(self) -> T {
        self.data
    }

    /// Transforms the payload, keeping the headers.
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            data: f(self.data),
            headers: self.headers,
        }
    }

    /// Returns a header value when it is present and valid ASCII.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Request id the platform assigned to the response.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("request-id")
    }

    /// Remaining calls in the current rate-limit window.
    #[must_use]
    pub fn rate_limit_remaining(&self) -> Option<u64> {
        self.header("ratelimit-remaining")
            .and_then(|v| v.trim().parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn reads_rate_limit_and_request_id() {
        let mut headers = HeaderMap::new();
        headers.insert("ratelimit-remaining", HeaderValue::from_static("4499"));
        headers.insert("request-id", HeaderValue::from_static("req-123"));

        let response = ApiResponse::new(true, headers);
        assert_eq!(response.rate_limit_remaining(), Some(4499));
        assert_eq!(response.request_id(), Some("req-123"));
    }

    #[test]
    fn map_keeps_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("request-id", HeaderValue::from_static("req-1"));

        let response = ApiResponse::new(vec![1, 2, 3], headers).map(|v| v.len());
        assert_eq!(response.data, 3);
        assert_eq!(response.request_id(), Some("req-1"));
    }

    #[test]
    fn missing_or_malformed_rate_limit_is_none() {
        let response = ApiResponse::new((), HeaderMap::new());
        assert_eq!(response.rate_limit_remaining(), None);

        let mut headers = HeaderMap::new();
        headers.insert("ratelimit-remaining", HeaderValue::from_static("lots"));
        let response = ApiResponse::new((), headers);
        assert_eq!(response.rate_limit_remaining(), None);
    }
}
