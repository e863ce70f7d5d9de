//! Config var endpoints.

use std::collections::BTreeMap;

use reqwest::Method;

use heroku_core::{EnvVars, Error, Result};

use crate::client::{HerokuClient, encode, require};
use crate::response::ApiResponse;

impl HerokuClient {
    /// Reads the config vars of an app.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank, the request fails, or the
    /// response cannot be parsed.
    pub async fn get_app_env_vars(&self, app_name: &str) -> Result<ApiResponse<EnvVars>> {
        let app_name = require(app_name, "app name")?;
        self.fetch_json(Method::GET, &["apps", app_name, "config-vars"], None)
            .await
    }

    /// Sets config vars on an app. Variables not named are left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or the request fails.
    pub async fn update_app_env_vars(
        &self,
        app_name: &str,
        env_vars: &EnvVars,
    ) -> Result<ApiResponse<bool>> {
        let app_name = require(app_name, "app name")?;
        self.fetch_bool(
            Method::PATCH,
            &["apps", app_name, "config-vars"],
            Some(encode(env_vars)?),
        )
        .await
    }

    /// Removes config vars from an app.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank, no keys are given, or the
    /// request fails.
    pub async fn unset_app_env_vars<S: AsRef<str>>(
        &self,
        app_name: &str,
        keys: &[S],
    ) -> Result<ApiResponse<bool>> {
        let app_name = require(app_name, "app name")?;
        if keys.is_empty() {
            return Err(Error::InvalidInput(
                "at least one config var name is required".to_string(),
            ));
        }
        let body: BTreeMap<&str, Option<&str>> =
            keys.iter().map(|key| (key.as_ref(), None)).collect();
        self.fetch_bool(
            Method::PATCH,
            &["apps", app_name, "config-vars"],
            Some(encode(&body)?),
        )
        .await
    }
}
