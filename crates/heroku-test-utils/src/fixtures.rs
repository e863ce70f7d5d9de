//! Pre-built records for common test scenarios.
//!
//! Factories produce platform-shaped records with fresh ids and sensible
//! defaults; tests override only the fields they care about.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use uuid::Uuid;

use heroku_core::models::{AppSpace, DynoApp, DynoRelease, PipelineOwner, ResourceId};
use heroku_core::{
    App, AppOwner, Coupling, CouplingStage, Domain, DomainKind, Dyno, DynoSize, DynoState,
    NamedRef, Pipeline,
};

/// Fixed timestamp used for every generated record.
pub fn fixture_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Builder for [`App`] records.
#[derive(Debug, Clone)]
pub struct AppFactory {
    app: App,
}

impl AppFactory {
    /// Starts a personal app in the `us` region on `heroku-22`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let stack = NamedRef::new(new_id(), "heroku-22");
        Self {
            app: App {
                id: new_id(),
                acm: Some(false),
                archived_at: None,
                build_stack: Some(stack.clone()),
                buildpack_provided_description: None,
                created_at: Some(fixture_time()),
                git_url: Some(format!("https://git.heroku.com/{name}.git")),
                internal_routing: None,
                maintenance: Some(false),
                organization: None,
                owner: Some(AppOwner {
                    email: "owner@example.com".to_string(),
                    id: new_id(),
                }),
                region: Some(NamedRef::new(new_id(), "us")),
                released_at: None,
                repo_size: None,
                slug_size: None,
                space: None,
                stack: Some(stack),
                team: None,
                updated_at: Some(fixture_time()),
                web_url: Some(format!("https://{name}.herokuapp.com/")),
                extra: serde_json::Map::new(),
                name,
            },
        }
    }

    /// Starts an app carrying only its id and name, as the platform may
    /// send for partially provisioned apps.
    #[must_use]
    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            app: App {
                id: new_id(),
                name: name.into(),
                acm: None,
                archived_at: None,
                build_stack: None,
                buildpack_provided_description: None,
                created_at: None,
                git_url: None,
                internal_routing: None,
                maintenance: None,
                organization: None,
                owner: None,
                region: None,
                released_at: None,
                repo_size: None,
                slug_size: None,
                space: None,
                stack: None,
                team: None,
                updated_at: None,
                web_url: None,
                extra: serde_json::Map::new(),
            },
        }
    }

    /// Sets the region.
    #[must_use]
    pub fn region(mut self, region: &str) -> Self {
        self.app.region = Some(NamedRef::new(new_id(), region));
        self
    }

    /// Sets both the runtime and build stack.
    #[must_use]
    pub fn stack(mut self, stack: &str) -> Self {
        let stack = NamedRef::new(new_id(), stack);
        self.app.build_stack = Some(stack.clone());
        self.app.stack = Some(stack);
        self
    }

    /// Makes the app team-owned.
    #[must_use]
    pub fn team(mut self, team: &str) -> Self {
        self.app.team = Some(NamedRef::new(new_id(), team));
        self
    }

    /// Sets the legacy organization.
    #[must_use]
    pub fn organization(mut self, organization: &str) -> Self {
        self.app.organization = Some(NamedRef::new(new_id(), organization));
        self
    }

    /// Sets the owner email.
    #[must_use]
    pub fn owner_email(mut self, email: &str) -> Self {
        let id = self.app.owner.take().map_or_else(new_id, |owner| owner.id);
        self.app.owner = Some(AppOwner {
            email: email.to_string(),
            id,
        });
        self
    }

    /// Places the app in a private space.
    #[must_use]
    pub fn space(mut self, space: &str, shield: bool) -> Self {
        self.app.space = Some(AppSpace {
            id: new_id(),
            name: space.to_string(),
            shield,
        });
        self.app.internal_routing = Some(false);
        self
    }

    /// Sets the maintenance flag.
    #[must_use]
    pub fn maintenance(mut self, maintenance: bool) -> Self {
        self.app.maintenance = Some(maintenance);
        self
    }

    /// Sets the ACM flag.
    #[must_use]
    pub fn acm(mut self, acm: bool) -> Self {
        self.app.acm = Some(acm);
        self
    }

    /// Sets the internal routing flag.
    #[must_use]
    pub fn internal_routing(mut self, internal_routing: bool) -> Self {
        self.app.internal_routing = Some(internal_routing);
        self
    }

    /// Adds a field the data model does not name.
    #[must_use]
    pub fn extra(mut self, key: &str, value: Value) -> Self {
        self.app.extra.insert(key.to_string(), value);
        self
    }

    /// Finishes the record.
    #[must_use]
    pub fn build(self) -> App {
        self.app
    }
}

/// Factory for pipeline records.
pub struct PipelineFactory;

impl PipelineFactory {
    /// Creates a user-owned pipeline.
    #[must_use]
    pub fn named(name: &str) -> Pipeline {
        Pipeline {
            id: new_id(),
            name: name.to_string(),
            created_at: Some(fixture_time()),
            owner: Some(PipelineOwner {
                id: new_id(),
                kind: "user".to_string(),
            }),
            updated_at: Some(fixture_time()),
            extra: serde_json::Map::new(),
        }
    }
}

/// Factory for coupling records.
pub struct CouplingFactory;

impl CouplingFactory {
    /// Couples `app` to `pipeline` at `stage`.
    #[must_use]
    pub fn couple(app: &App, pipeline: &Pipeline, stage: CouplingStage) -> Coupling {
        Coupling {
            id: new_id(),
            app: ResourceId { id: app.id.clone() },
            pipeline: ResourceId {
                id: pipeline.id.clone(),
            },
            stage,
            created_at: Some(fixture_time()),
            updated_at: Some(fixture_time()),
            extra: serde_json::Map::new(),
        }
    }
}

/// Factory for domain records.
pub struct DomainFactory;

impl DomainFactory {
    /// Creates a custom hostname on `app`.
    #[must_use]
    pub fn custom(app: &App, hostname: &str) -> Domain {
        Domain {
            id: new_id(),
            hostname: hostname.to_string(),
            kind: Some(DomainKind::Custom),
            app: Some(NamedRef::new(app.id.clone(), app.name.clone())),
            cname: Some(format!("{}.herokudns.com", hostname.replace('.', "-"))),
            status: Some("pending".to_string()),
            acm_status: None,
            acm_status_reason: None,
            sni_endpoint: None,
            created_at: Some(fixture_time()),
            updated_at: Some(fixture_time()),
            extra: serde_json::Map::new(),
        }
    }

    /// Creates the default `*.herokuapp.com` domain of `app`.
    #[must_use]
    pub fn platform(app: &App) -> Domain {
        Domain {
            kind: Some(DomainKind::Heroku),
            cname: None,
            status: Some("none".to_string()),
            ..Self::custom(app, &format!("{}.herokuapp.com", app.name))
        }
    }
}

/// Factory for dyno records.
pub struct DynoFactory;

impl DynoFactory {
    /// Creates a running dyno; the process type is the part of `name` before
    /// the first dot.
    #[must_use]
    pub fn running(app: &App, name: &str) -> Dyno {
        let process_type = name.split('.').next().unwrap_or(name).to_string();
        Dyno {
            id: new_id(),
            name: name.to_string(),
            attach_url: None,
            command: Some(format!("bin/{process_type}")),
            app: Some(DynoApp {
                id: app.id.clone(),
                name: app.name.clone(),
            }),
            release: Some(DynoRelease {
                id: new_id(),
                version: 1,
            }),
            size: Some(DynoSize::Standard1x),
            state: Some(DynoState::Up),
            process_type: Some(process_type),
            created_at: Some(fixture_time()),
            updated_at: Some(fixture_time()),
            extra: serde_json::Map::new(),
        }
    }
}
