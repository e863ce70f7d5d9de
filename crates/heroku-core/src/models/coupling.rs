//! Pipeline couplings.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Extra;
use crate::error::Error;

/// Stage an app occupies inside a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CouplingStage {
    /// Test stage (CI).
    Test,
    /// Review apps.
    Review,
    /// Development stage.
    Development,
    /// Staging stage.
    Staging,
    /// Production stage.
    Production,
}

impl CouplingStage {
    /// All stages, in pipeline order.
    pub const ALL: [Self; 5] = [
        Self::Test,
        Self::Review,
        Self::Development,
        Self::Staging,
        Self::Production,
    ];

    /// Wire name of the stage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Test => "test",
            Self::Review => "review",
            Self::Development => "development",
            Self::Staging => "staging",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for CouplingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CouplingStage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| {
                Error::InvalidInput(format!(
                    "unknown pipeline stage '{s}' (expected test, review, development, staging or production)"
                ))
            })
    }
}

/// Bare id reference used inside couplings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceId {
    /// Referenced id.
    pub id: String,
}

/// Join record between an app and a pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coupling {
    /// Unique identifier.
    pub id: String,
    /// Coupled app.
    pub app: ResourceId,
    /// Pipeline the app is coupled to.
    pub pipeline: ResourceId,
    /// Stage of the app in the pipeline.
    pub stage: CouplingStage,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_parses_wire_names() {
        for stage in CouplingStage::ALL {
            assert_eq!(stage.as_str().parse::<CouplingStage>().unwrap(), stage);
        }
    }

    #[test]
    fn stage_rejects_unknown_names() {
        let err = "prod".parse::<CouplingStage>().unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn stage_serializes_lowercase() {
        let json = serde_json::to_string(&CouplingStage::Staging).unwrap();
        assert_eq!(json, "\"staging\"");
    }
}
