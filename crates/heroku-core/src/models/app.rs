//! App records.
//!
//! Only `id` and `name` are required; the platform may omit or null any other
//! field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Extra, NamedRef};

/// An app on the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct App {
    /// Unique identifier.
    pub id: String,
    /// Unique name.
    pub name: String,
    /// Whether Automated Certificate Management is enabled.
    #[serde(default)]
    pub acm: Option<bool>,
    /// When the app was archived, if ever.
    #[serde(default)]
    pub archived_at: Option<DateTime<Utc>>,
    /// Stack used by the next build.
    #[serde(default)]
    pub build_stack: Option<NamedRef>,
    /// Description from the buildpack of the app.
    #[serde(default)]
    pub buildpack_provided_description: Option<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Git repository URL.
    #[serde(default)]
    pub git_url: Option<String>,
    /// Whether the app is routed only inside its space.
    #[serde(default)]
    pub internal_routing: Option<bool>,
    /// Whether maintenance mode is on.
    #[serde(default)]
    pub maintenance: Option<bool>,
    /// Legacy organization owning the app.
    #[serde(default)]
    pub organization: Option<NamedRef>,
    /// Account owning the app.
    #[serde(default)]
    pub owner: Option<AppOwner>,
    /// Region the app runs in.
    #[serde(default)]
    pub region: Option<NamedRef>,
    /// When the app was last released.
    #[serde(default)]
    pub released_at: Option<DateTime<Utc>>,
    /// Git repository size in bytes.
    #[serde(default)]
    pub repo_size: Option<u64>,
    /// Slug size in bytes.
    #[serde(default)]
    pub slug_size: Option<u64>,
    /// Private space the app belongs to.
    #[serde(default)]
    pub space: Option<AppSpace>,
    /// Stack the app runs on.
    #[serde(default)]
    pub stack: Option<NamedRef>,
    /// Team owning the app.
    #[serde(default)]
    pub team: Option<NamedRef>,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Web URL of the app.
    #[serde(default)]
    pub web_url: Option<String>,
    /// Unmodelled fields.
    #[serde(flatten)]
    pub extra: Extra,
}

/// Owner of an app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppOwner {
    /// Owner email address.
    pub email: String,
    /// Owner account id.
    pub id: String,
}

/// Private space of an app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSpace {
    /// Space id.
    pub id: String,
    /// Space name.
    pub name: String,
    /// Whether the space is a Shield space.
    #[serde(default)]
    pub shield: bool,
}

impl App {
    /// Name of the region the app runs in.
    #[must_use]
    pub fn region_name(&self) -> Option<&str> {
        self.region.as_ref().map(|r| r.name.as_str())
    }

    /// Name of the stack the app runs on.
    #[must_use]
    pub fn stack_name(&self) -> Option<&str> {
        self.stack.as_ref().map(|r| r.name.as_str())
    }

    /// Email address of the owning account.
    #[must_use]
    pub fn owner_email(&self) -> Option<&str> {
        self.owner.as_ref().map(|o| o.email.as_str())
    }

    /// Name of the team owning the app, falling back to the legacy
    /// organization.
    #[must_use]
    pub fn team_name(&self) -> Option<&str> {
        self.team
            .as_ref()
            .or(self.organization.as_ref())
            .map(|r| r.name.as_str())
    }
}
