//! Observability helpers for the Heroku client crates.
//!
//! Structured logging with consistent spans, plus a wrapper that keeps the
//! API key out of `Debug` output and logs.

use std::fmt;
use std::sync::Once;

use tracing::Span;
use tracing_subscriber::{EnvFilter, fmt as fmt_layer, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// JSON structured logs.
    Json,
    /// Pretty-printed logs.
    #[default]
    Pretty,
}

/// Initializes the logging subsystem.
///
/// Safe to call multiple times; subsequent calls are no-ops. Logs go to
/// stderr so command output on stdout stays machine readable.
///
/// # Environment Variables
///
/// - `RUST_LOG`: Controls log levels (e.g., `warn`, `heroku_client=debug`)
///
/// # Example
///
/// ```rust
/// use heroku_core::observability::{init_logging, LogFormat};
///
/// init_logging(LogFormat::Pretty);
/// ```
pub fn init_logging(format: LogFormat) {
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

        match format {
            LogFormat::Json => {
                let _ = tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt_layer::layer().json().with_writer(std::io::stderr))
                    .try_init();
            }
            LogFormat::Pretty => {
                let _ = tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        fmt_layer::layer()
                            .with_target(false)
                            .with_writer(std::io::stderr),
                    )
                    .try_init();
            }
        }
    });
}

/// Creates a span for one client operation.
///
/// # Example
///
/// ```rust
/// use heroku_core::observability::api_span;
///
/// let span = api_span("get_app", "my-app");
/// let _guard = span.enter();
/// ```
#[must_use]
pub fn api_span(operation: &str, resource: &str) -> Span {
    tracing::info_span!("heroku_api", op = operation, resource = resource)
}

/// A secret string that never prints its value.
#[derive(Clone, PartialEq, Eq)]
pub struct Redacted(String);

impl Redacted {
    /// Wraps a secret.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Returns the secret value.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns true when the secret is empty or whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Redacted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for Redacted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for Redacted {
    fn from(secret: String) -> Self {
        Self(secret)
    }
}

impl From<&str> for Redacted {
    fn from(secret: &str) -> Self {
        Self(secret.to_string())
    }
}
