//! Typed records returned by the Heroku Platform API.
//!
//! Records are passed through verbatim: fields the platform sends that are not
//! modelled here are kept in each record's `extra` map and written back out
//! when the record is serialized.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

mod app;
mod coupling;
mod domain;
mod dyno;
mod pipeline;

pub use app::{App, AppOwner, AppSpace};
pub use coupling::{Coupling, CouplingStage, ResourceId};
pub use domain::{Domain, DomainKind};
pub use dyno::{Dyno, DynoApp, DynoRelease, DynoSize, DynoState};
pub use pipeline::{Pipeline, PipelineOwner};

/// Config vars of one app, keyed by variable name.
pub type EnvVars = BTreeMap<String, String>;

/// Unmodelled fields carried alongside a record.
pub type Extra = serde_json::Map<String, serde_json::Value>;

/// Reference to another platform resource by id and name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    /// Unique identifier of the referenced resource.
    pub id: String,
    /// Name of the referenced resource.
    pub name: String,
}

impl NamedRef {
    /// Creates a reference from an id and a name.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
