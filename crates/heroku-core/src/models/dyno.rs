//! Dyno records.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Extra;

/// Lifecycle state of a dyno.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DynoState {
    /// Process exited unexpectedly.
    Crashed,
    /// Process is stopped.
    Down,
    /// Free dyno sleeping.
    Idle,
    /// Process is booting.
    Starting,
    /// Process is running.
    Up,
}

impl DynoState {
    /// Wire name of the state.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Crashed => "crashed",
            Self::Down => "down",
            Self::Idle => "idle",
            Self::Starting => "starting",
            Self::Up => "up",
        }
    }
}

impl fmt::Display for DynoState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Size class of a dyno.
///
/// Sizes the platform introduces later are kept verbatim in
/// [`DynoSize::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DynoSize {
    /// `free`
    Free,
    /// `hobby`
    Hobby,
    /// `standard-1x`
    Standard1x,
    /// `standard-2x`
    Standard2x,
    /// `performance-m`
    PerformanceM,
    /// `performance-l`
    PerformanceL,
    /// Any other size, as sent by the platform.
    Other(String),
}

impl DynoSize {
    /// Wire name of the size.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Free => "free",
            Self::Hobby => "hobby",
            Self::Standard1x => "standard-1x",
            Self::Standard2x => "standard-2x",
            Self::PerformanceM => "performance-m",
            Self::PerformanceL => "performance-l",
            Self::Other(size) => size,
        }
    }
}

impl From<String> for DynoSize {
    fn from(size: String) -> Self {
        match size.to_ascii_lowercase().as_str() {
            "free" => Self::Free,
            "hobby" => Self::Hobby,
            "standard-1x" => Self::Standard1x,
            "standard-2x" => Self::Standard2x,
            "performance-m" => Self::PerformanceM,
            "performance-l" => Self::PerformanceL,
            _ => Self::Other(size),
        }
    }
}

impl From<DynoSize> for String {
    fn from(size: DynoSize) -> Self {
        match size {
            DynoSize::Other(size) => size,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for DynoSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// App a dyno belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynoApp {
    /// App id.
    pub id: String,
    /// App name.
    pub name: String,
}

/// Release a dyno is running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynoRelease {
    /// Release id.
    pub id: String,
    /// Release version number.
    pub version: u64,
}

/// A running process of an app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dyno {
    /// Unique identifier.
    pub id: String,
    /// Dyno name, e.g. `web.1`.
    pub name: String,
    /// Rendezvous URL for attached one-off dynos.
    #[serde(default)]
    pub attach_url: Option<String>,
    /// Command the dyno runs.
    #[serde(default)]
    pub command: Option<String>,
    /// App the dyno belongs to.
    #[serde(default)]
    pub app: Option<DynoApp>,
    /// Release the dyno runs.
    #[serde(default)]
    pub release: Option<DynoRelease>,
    /// Size class.
    #[serde(default)]
    pub size: Option<DynoSize>,
    /// Current state.
    #[serde(default)]
    pub state: Option<DynoState>,
    /// Process type, e.g. `web`.
    #[serde(rename = "type", default)]
    pub process_type: Option<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Unmodelled fields.
    #[serde(flatten)]
    pub extra: Extra,
}
