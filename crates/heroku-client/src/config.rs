//! Client configuration.

use std::time::Duration;

use heroku_core::{Error, Redacted, Result};

/// Origin of the Heroku Platform API.
pub const DEFAULT_BASE_URL: &str = "https://api.heroku.com";

/// Versioned media type sent as `Accept` on every request.
pub const ACCEPT_VERSION_3: &str = "application/vnd.heroku+json; version=3";

/// Per-request timeout used unless overridden.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "HEROKU_API_KEY";
/// Environment variable overriding the API origin.
pub const ENV_API_URL: &str = "HEROKU_API_URL";
/// Environment variable overriding the request timeout, in seconds.
pub const ENV_TIMEOUT_SECONDS: &str = "HEROKU_API_TIMEOUT_SECONDS";

/// Settings for a [`HerokuClient`](crate::HerokuClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Bearer token sent on every request.
    pub api_key: Redacted,
    /// API origin. Only tests and proxies need to change it.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// `User-Agent` header value.
    pub user_agent: String,
}

impl ClientConfig {
    /// Creates a configuration targeting the public API.
    #[must_use]
    pub fn new(api_key: impl Into<Redacted>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!("heroku-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Overrides the API origin.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `HEROKU_API_KEY` is missing or any override is
    /// malformed.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or any override is
    /// malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let api_key = read(ENV_API_KEY)
            .ok_or_else(|| Error::configuration(format!("{ENV_API_KEY} is not set")))?;
        let mut config = Self::new(api_key);

        if let Some(url) = read(ENV_API_URL) {
            config.base_url = url;
        }
        if let Some(raw) = read(ENV_TIMEOUT_SECONDS) {
            let seconds: u64 = raw.trim().parse().map_err(|e| {
                Error::configuration(format!("{ENV_TIMEOUT_SECONDS} must be an integer: {e}"))
            })?;
            config.timeout = Duration::from_secs(seconds);
        }

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is blank, the timeout is zero, or the
    /// base URL is not an absolute http(s) URL.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_blank() {
            return Err(Error::configuration("API key must not be empty"));
        }
        if self.timeout.is_zero() {
            return Err(Error::configuration("timeout must be greater than zero"));
        }
        let url = reqwest::Url::parse(&self.base_url).map_err(|e| {
            Error::configuration(format!("invalid base URL '{}': {e}", self.base_url))
        })?;
        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            return Err(Error::configuration(format!(
                "base URL must be an absolute http(s) URL, got '{}'",
                self.base_url
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_target_public_api() {
        let config = ClientConfig::new("token");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert!(config.user_agent.starts_with("heroku-client/"));
        config.validate().unwrap();
    }

    #[test]
    fn from_lookup_reads_key_and_overrides() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            (ENV_API_KEY, "token-abc"),
            (ENV_API_URL, "http://127.0.0.1:9999"),
            (ENV_TIMEOUT_SECONDS, "5"),
        ]))
        .unwrap();

        assert_eq!(config.api_key.expose(), "token-abc");
        assert_eq!(config.base_url, "http://127.0.0.1:9999");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn from_lookup_requires_api_key() {
        let err = ClientConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));

        let err = ClientConfig::from_lookup(lookup_from(&[(ENV_API_KEY, "   ")])).unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn from_lookup_rejects_bad_timeout() {
        let err = ClientConfig::from_lookup(lookup_from(&[
            (ENV_API_KEY, "token"),
            (ENV_TIMEOUT_SECONDS, "soon"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains(ENV_TIMEOUT_SECONDS));

        let err = ClientConfig::from_lookup(lookup_from(&[
            (ENV_API_KEY, "token"),
            (ENV_TIMEOUT_SECONDS, "0"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("timeout"));
    }

    #[test]
    fn validate_rejects_non_http_base_url() {
        let config = ClientConfig::new("token").with_base_url("ftp://example.com");
        assert!(config.validate().is_err());

        let config = ClientConfig::new("token").with_base_url("not a url");
        assert!(config.validate().is_err());
    }

    #[test]
    fn debug_output_hides_api_key() {
        let config = ClientConfig::new("super-secret");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
