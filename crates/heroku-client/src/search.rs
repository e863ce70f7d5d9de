//! Composite app search.
//!
//! A search narrows a candidate list (every app, or the production apps of
//! one pipeline) in two stages:
//!
//! 1. an [`AppFilter`] compares app fields by exact equality, with no
//!    further calls
//! 2. an [`EnvVarFilter`] fetches the config vars of each surviving app, one
//!    at a time and in order, and requires every named variable to match its
//!    pattern
//!
//! Survivors keep their original order. A failed config var lookup aborts the
//! whole search.

use std::collections::BTreeMap;

use regex::Regex;
use tracing::Instrument;

use heroku_core::{App, CouplingStage, EnvVars, Error, Result, api_span};

use crate::client::HerokuClient;
use crate::response::ApiResponse;

/// Partial app record; every field that is set must equal the app's.
///
/// Reference fields (`region`, `stack`, `team`, `organization`) are compared
/// by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppFilter {
    /// App id.
    pub id: Option<String>,
    /// App name.
    pub name: Option<String>,
    /// Region name.
    pub region: Option<String>,
    /// Stack name.
    pub stack: Option<String>,
    /// Team name.
    pub team: Option<String>,
    /// Legacy organization name.
    pub organization: Option<String>,
    /// Owner email.
    pub owner_email: Option<String>,
    /// ACM enabled.
    pub acm: Option<bool>,
    /// Maintenance mode.
    pub maintenance: Option<bool>,
    /// Internal routing.
    pub internal_routing: Option<bool>,
}

impl AppFilter {
    /// Creates an empty filter that matches every app.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires the app id.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Requires the app name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Requires the region name.
    #[must_use]
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Requires the stack name.
    #[must_use]
    pub fn stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// Requires the team name.
    #[must_use]
    pub fn team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    /// Requires the legacy organization name.
    #[must_use]
    pub fn organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    /// Requires the owner email.
    #[must_use]
    pub fn owner_email(mut self, email: impl Into<String>) -> Self {
        self.owner_email = Some(email.into());
        self
    }

    /// Requires the ACM flag.
    #[must_use]
    pub fn acm(mut self, acm: bool) -> Self {
        self.acm = Some(acm);
        self
    }

    /// Requires the maintenance flag.
    #[must_use]
    pub fn maintenance(mut self, maintenance: bool) -> Self {
        self.maintenance = Some(maintenance);
        self
    }

    /// Requires the internal routing flag.
    #[must_use]
    pub fn internal_routing(mut self, internal_routing: bool) -> Self {
        self.internal_routing = Some(internal_routing);
        self
    }

    /// True when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// True when every set field equals the app's field. A field the app
    /// lacks never matches a set filter field.
    #[must_use]
    pub fn matches(&self, app: &App) -> bool {
        field_matches(self.id.as_deref(), Some(app.id.as_str()))
            && field_matches(self.name.as_deref(), Some(app.name.as_str()))
            && field_matches(self.region.as_deref(), app.region_name())
            && field_matches(self.stack.as_deref(), app.stack_name())
            && field_matches(
                self.team.as_deref(),
                app.team.as_ref().map(|t| t.name.as_str()),
            )
            && field_matches(
                self.organization.as_deref(),
                app.organization.as_ref().map(|o| o.name.as_str()),
            )
            && field_matches(self.owner_email.as_deref(), app.owner_email())
            && field_matches(self.acm, app.acm)
            && field_matches(self.maintenance, app.maintenance)
            && field_matches(self.internal_routing, app.internal_routing)
    }
}

fn field_matches<T: PartialEq>(want: Option<T>, have: Option<T>) -> bool {
    match want {
        None => true,
        Some(want) => have.is_some_and(|have| have == want),
    }
}

/// Config var name to pattern; every named variable must exist and match.
#[derive(Debug, Clone, Default)]
pub struct EnvVarFilter {
    patterns: BTreeMap<String, Regex>,
}

impl EnvVarFilter {
    /// Creates an empty filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a compiled pattern for a variable.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, pattern: Regex) -> Self {
        self.patterns.insert(name.into(), pattern);
        self
    }

    /// Compiles and adds a pattern for a variable.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is not a valid regular expression.
    pub fn pattern(self, name: impl Into<String>, pattern: &str) -> Result<Self> {
        let name = name.into();
        let regex = Regex::new(pattern).map_err(|e| {
            Error::InvalidInput(format!("invalid pattern for config var {name}: {e}"))
        })?;
        Ok(self.with(name, regex))
    }

    /// True when no pattern is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Number of patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Variable names the filter inspects.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.patterns.keys().map(String::as_str)
    }

    /// True when every named variable is present and matches its pattern.
    #[must_use]
    pub fn matches(&self, env_vars: &EnvVars) -> bool {
        self.patterns.iter().all(|(name, pattern)| {
            env_vars
                .get(name)
                .is_some_and(|value| pattern.is_match(value))
        })
    }
}

/// Filters accepted by [`HerokuClient::search_apps`].
#[derive(Debug, Clone)]
pub enum SearchFilter {
    /// Field comparison only.
    App(AppFilter),
    /// Config var patterns only.
    EnvVars(EnvVarFilter),
    /// Field comparison, then config var patterns.
    Both {
        /// Field comparison.
        app: AppFilter,
        /// Config var patterns.
        env_vars: EnvVarFilter,
    },
}

impl SearchFilter {
    /// Combines the two filter kinds, picking the variant from which ones are
    /// non-empty.
    #[must_use]
    pub fn from_parts(app: AppFilter, env_vars: EnvVarFilter) -> Self {
        match (app.is_empty(), env_vars.is_empty()) {
            (_, true) => Self::App(app),
            (true, false) => Self::EnvVars(env_vars),
            (false, false) => Self::Both { app, env_vars },
        }
    }

    /// Field comparison, when present.
    #[must_use]
    pub fn app(&self) -> Option<&AppFilter> {
        match self {
            Self::App(app) | Self::Both { app, .. } => Some(app),
            Self::EnvVars(_) => None,
        }
    }

    /// Config var patterns, when present.
    #[must_use]
    pub fn env_vars(&self) -> Option<&EnvVarFilter> {
        match self {
            Self::EnvVars(env_vars) | Self::Both { env_vars, .. } => Some(env_vars),
            Self::App(_) => None,
        }
    }
}

impl Default for SearchFilter {
    fn default() -> Self {
        Self::App(AppFilter::default())
    }
}

impl From<AppFilter> for SearchFilter {
    fn from(app: AppFilter) -> Self {
        Self::App(app)
    }
}

impl From<EnvVarFilter> for SearchFilter {
    fn from(env_vars: EnvVarFilter) -> Self {
        Self::EnvVars(env_vars)
    }
}

impl HerokuClient {
    /// Returns the apps matching `filter`, in listing order.
    ///
    /// With `pipeline_name` the candidates are the production apps of that
    /// pipeline; an unknown pipeline yields an empty list. A blank name means
    /// no scope. Config vars are
    /// fetched once per app that passes the field comparison, and only when
    /// the filter has config var patterns.
    ///
    /// # Errors
    ///
    /// Returns an error if listing the candidates or any config var lookup
    /// fails.
    pub async fn search_apps(
        &self,
        filter: &SearchFilter,
        pipeline_name: Option<&str>,
    ) -> Result<ApiResponse<Vec<App>>> {
        let pipeline_name = pipeline_name.filter(|name| !name.trim().is_empty());
        let span = api_span("search_apps", pipeline_name.unwrap_or("*"));
        async move {
            let candidates = match pipeline_name {
                Some(pipeline) => {
                    self.get_pipeline_apps(pipeline, Some(CouplingStage::Production))
                        .await?
                }
                None => self.get_apps().await?,
            };
            let ApiResponse {
                data: apps,
                mut headers,
            } = candidates;

            let total = apps.len();
            let app_filter = filter.app();
            let env_filter = filter.env_vars().filter(|f| !f.is_empty());

            let mut matched = Vec::new();
            for app in apps {
                if !app_filter.is_none_or(|f| f.matches(&app)) {
                    continue;
                }

                if let Some(env_filter) = env_filter {
                    let env_vars = self.get_app_env_vars(&app.name).await?;
                    headers = env_vars.headers;
                    if !env_filter.matches(&env_vars.data) {
                        continue;
                    }
                }

                matched.push(app);
            }

            tracing::debug!(candidates = total, matched = matched.len(), "search complete");
            Ok(ApiResponse::new(matched, headers))
        }
        .instrument(span)
        .await
    }
}
