//! Error types and result aliases for Heroku API calls.
//!
//! Every failure a client method can produce is one of these variants. A
//! non-success HTTP status is always raised as [`Error::Status`]; no method
//! reports a failed status as a `false` result.

use crate::lookup;

/// The result type used throughout the client crates.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when talking to the Heroku Platform API.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request never produced a response (connection refused, DNS,
    /// timeout, reset).
    #[error("transport error: {message}")]
    Transport {
        /// Description of the transport failure.
        message: String,
        /// The underlying cause, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The platform answered with a non-success status.
    #[error("HTTP {status} {status_text}{}", detail_suffix(.id, .message))]
    Status {
        /// HTTP status code.
        status: u16,
        /// Canonical reason phrase for the status code.
        status_text: String,
        /// Platform error identifier (e.g. `not_found`, `forbidden`).
        id: Option<String>,
        /// Human readable message from the platform.
        message: Option<String>,
    },

    /// A request body could not be encoded or a response body decoded.
    #[error("serialization error: {message}")]
    Serialization {
        /// Description of the serialization failure.
        message: String,
    },

    /// Invalid input was provided by the caller.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The client could not be configured.
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
    },
}

impl Error {
    /// Creates a new transport error with the given message.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new transport error with a source cause.
    #[must_use]
    pub fn transport_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Transport {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new status error.
    #[must_use]
    pub fn status(
        status: u16,
        status_text: impl Into<String>,
        id: Option<String>,
        message: Option<String>,
    ) -> Self {
        Self::Status {
            status,
            status_text: status_text.into(),
            id,
            message,
        }
    }

    /// Creates a new serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Creates a new configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Returns the HTTP status code for [`Error::Status`].
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true when the platform reported the `not_found` sentinel.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { id: Some(id), .. } if lookup::is_not_found_id(id))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

fn detail_suffix(id: &Option<String>, message: &Option<String>) -> String {
    let mut out = String::new();
    if let Some(id) = id {
        out.push_str(&format!(" [{id}]"));
    }
    if let Some(message) = message {
        out.push_str(&format!(": {message}"));
    }
    out
}
