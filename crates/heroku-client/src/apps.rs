//! App endpoints.

use reqwest::Method;
use serde::Serialize;

use heroku_core::{App, Result};

use crate::client::{HerokuClient, encode, require};
use crate::response::ApiResponse;

/// Parameters for [`HerokuClient::create_app`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreateApp {
    /// App name.
    pub name: String,
    /// Region name, e.g. `us` or `eu`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Team that owns the app. When set the app is created through
    /// `/teams/apps`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
}

impl CreateApp {
    /// Creates parameters for a personal app.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the region.
    #[must_use]
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Sets the owning team.
    #[must_use]
    pub fn team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }
}

#[derive(Debug, Serialize)]
struct BuildpackUpdates<'a> {
    updates: Vec<BuildpackUpdate<'a>>,
}

#[derive(Debug, Serialize)]
struct BuildpackUpdate<'a> {
    buildpack: &'a str,
}

impl HerokuClient {
    /// Lists every app the key can see.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    pub async fn get_apps(&self) -> Result<ApiResponse<Vec<App>>> {
        self.fetch_json(Method::GET, &["apps"], None).await
    }

    /// Looks an app up by name or id. A missing app yields `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails for any reason other than the
    /// app not existing.
    pub async fn get_app(&self, app_name: &str) -> Result<ApiResponse<Option<App>>> {
        let app_name = require(app_name, "app name")?;
        self.fetch_lookup(&["apps", app_name]).await
    }

    /// Creates an app, under a team when [`CreateApp::team`] is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank, the request fails, or the
    /// response cannot be parsed.
    pub async fn create_app(&self, params: &CreateApp) -> Result<ApiResponse<App>> {
        require(&params.name, "app name")?;
        let route: &[&str] = if params.team.is_some() {
            &["teams", "apps"]
        } else {
            &["apps"]
        };
        tracing::info!(app = %params.name, team = ?params.team, "creating app");
        self.fetch_json(Method::POST, route, Some(encode(params)?))
            .await
    }

    /// Replaces the buildpacks of an app, in order.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or the request fails.
    pub async fn update_app_buildpacks<S: AsRef<str>>(
        &self,
        app_name: &str,
        buildpacks: &[S],
    ) -> Result<ApiResponse<bool>> {
        let app_name = require(app_name, "app name")?;
        let body = BuildpackUpdates {
            updates: buildpacks
                .iter()
                .map(|b| BuildpackUpdate {
                    buildpack: b.as_ref(),
                })
                .collect(),
        };
        self.fetch_bool(
            Method::PUT,
            &["apps", app_name, "buildpack-installations"],
            Some(encode(&body)?),
        )
        .await
    }
}
