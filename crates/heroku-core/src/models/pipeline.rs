//! Pipeline records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Extra;

/// A pipeline grouping apps into stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    /// Unique identifier.
    pub id: String,
    /// Pipeline name.
    pub name: String,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Owner of the pipeline.
    #[serde(default)]
    pub owner: Option<PipelineOwner>,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Unmodelled fields.
    #[serde(flatten)]
    pub extra: Extra,
}

/// Owner of a pipeline (a user or a team).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineOwner {
    /// Owner id.
    pub id: String,
    /// Owner kind, `user` or `team`.
    #[serde(rename = "type")]
    pub kind: String,
}
