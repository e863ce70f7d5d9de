//! Domain records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Extra, NamedRef};

/// Whether a domain is platform-provided or custom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainKind {
    /// `*.herokuapp.com` domain.
    Heroku,
    /// Custom hostname.
    Custom,
}

/// A hostname attached to an app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    /// Unique identifier.
    pub id: String,
    /// Full hostname.
    pub hostname: String,
    /// Domain kind.
    #[serde(default)]
    pub kind: Option<DomainKind>,
    /// App the domain belongs to.
    #[serde(default)]
    pub app: Option<NamedRef>,
    /// DNS target for custom domains.
    #[serde(default)]
    pub cname: Option<String>,
    /// Domain status.
    #[serde(default)]
    pub status: Option<String>,
    /// Automated Certificate Management status.
    #[serde(default)]
    pub acm_status: Option<String>,
    /// Reason for the ACM status.
    #[serde(default)]
    pub acm_status_reason: Option<String>,
    /// SNI endpoint serving the domain.
    #[serde(default)]
    pub sni_endpoint: Option<NamedRef>,
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
