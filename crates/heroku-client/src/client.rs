//! HTTP client for the Heroku Platform API.
//!
//! Builds every request the same way: bearer authorization, the versioned
//! `Accept` header, and a JSON `Content-Type` only for verbs that carry a
//! body. Any non-success status is raised as [`Error::Status`].

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap};
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use heroku_core::{Error, Redacted, Result, lookup};

use crate::config::{ACCEPT_VERSION_3, ClientConfig};
use crate::response::ApiResponse;

/// Typed client for the Heroku Platform API.
///
/// Cloning is cheap: clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HerokuClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: Redacted,
}

/// Raw response before status handling and decoding.
struct RawResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

#[derive(Debug, Deserialize)]
struct PlatformError {
    id: Option<String>,
    message: Option<String>,
}

impl HerokuClient {
    /// Creates a client for the public API with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is blank or the HTTP client cannot be
    /// constructed.
    pub fn new(api_key: impl Into<Redacted>) -> Result<Self> {
        Self::with_config(ClientConfig::new(api_key))
    }

    /// Creates a client from explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be constructed.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let base_url = Url::parse(&config.base_url)
            .map_err(|e| Error::configuration(format!("invalid base URL: {e}")))?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| Error::configuration(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url,
            api_key: config.api_key,
        })
    }

    /// Creates a client from `HEROKU_API_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment is incomplete or malformed.
    pub fn from_env() -> Result<Self> {
        Self::with_config(ClientConfig::from_env()?)
    }

    /// Origin requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Builds the absolute URL for a route, percent-encoding each segment.
    pub(crate) fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| Error::configuration("base URL cannot carry a path"))?;
            path.pop_if_empty();
            path.extend(segments);
        }
        Ok(url)
    }

    /// Sends a request and decodes a JSON response body.
    pub(crate) async fn fetch_json<T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<Vec<u8>>,
    ) -> Result<ApiResponse<T>> {
        let raw = self.execute(method, segments, body).await?.error_for_status()?;
        let data = serde_json::from_slice(&raw.body)
            .map_err(|e| Error::serialization(format!("invalid response body: {e}")))?;
        Ok(ApiResponse::new(data, raw.headers))
    }

    /// Sends a request whose only interesting outcome is success.
    pub(crate) async fn fetch_bool(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<Vec<u8>>,
    ) -> Result<ApiResponse<bool>> {
        let raw = self.execute(method, segments, body).await?.error_for_status()?;
        Ok(ApiResponse::new(true, raw.headers))
    }

    /// Looks a record up by name; the not-found sentinel yields `None`.
    pub(crate) async fn fetch_lookup<T: DeserializeOwned>(
        &self,
        segments: &[&str],
    ) -> Result<ApiResponse<Option<T>>> {
        let raw = self.execute(Method::GET, segments, None).await?;
        let headers = raw.headers.clone();
        let data = lookup::resolve(raw.into_value())?;
        Ok(ApiResponse::new(data, headers))
    }

    async fn execute(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<Vec<u8>>,
    ) -> Result<RawResponse> {
        let url = self.url(segments)?;
        let path = url.path().to_string();

        let mut request = self
            .http
            .request(method.clone(), url)
            .bearer_auth(self.api_key.expose())
            .header(ACCEPT, ACCEPT_VERSION_3);
        if carries_body(&method) {
            request = request.header(CONTENT_TYPE, "application/json");
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        tracing::debug!(method = %method, path = %path, "sending request");

        let response = request
            .send()
            .await
            .map_err(|e| Error::transport_with_source(format!("{method} {path} failed"), e))?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| {
                Error::transport_with_source(format!("failed reading {method} {path} response"), e)
            })?
            .to_vec();

        tracing::debug!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            "received response"
        );

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

impl RawResponse {
    fn error_for_status(self) -> Result<Self> {
        if self.status.is_success() {
            Ok(self)
        } else {
            Err(self.status_error())
        }
    }

    fn into_value(self) -> Result<Value> {
        let raw = self.error_for_status()?;
        serde_json::from_slice(&raw.body)
            .map_err(|e| Error::serialization(format!("invalid response body: {e}")))
    }

    fn status_error(&self) -> Error {
        let detail = serde_json::from_slice::<PlatformError>(&self.body).ok();
        let (id, message) = detail.map_or((None, None), |d| (d.id, d.message));
        let error = Error::status(
            self.status.as_u16(),
            self.status.canonical_reason().unwrap_or_default(),
            id,
            message,
        );
        if !error.is_not_found() {
            tracing::warn!(status = self.status.as_u16(), error = %error, "request rejected");
        }
        error
    }
}

/// Verbs that send a JSON body and therefore a `Content-Type`.
pub(crate) fn carries_body(method: &Method) -> bool {
    [Method::PATCH, Method::POST, Method::PUT].contains(method)
}

/// Encodes a request body.
pub(crate) fn encode<B: Serialize>(body: &B) -> Result<Vec<u8>> {
    serde_json::to_vec(body)
        .map_err(|e| Error::serialization(format!("failed to encode request body: {e}")))
}

/// Rejects blank resource names before any call is made.
pub(crate) fn require<'a>(value: &'a str, what: &str) -> Result<&'a str> {
    if value.trim().is_empty() {
        return Err(Error::InvalidInput(format!("{what} must not be empty")));
    }
    Ok(value)
}
