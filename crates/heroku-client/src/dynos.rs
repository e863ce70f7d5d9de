//! Dyno endpoints.

use reqwest::Method;

use heroku_core::{Dyno, Result};

use crate::client::{HerokuClient, require};
use crate::response::ApiResponse;

impl HerokuClient {
    /// Lists the dynos of an app.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank, the request fails, or the
    /// response cannot be parsed.
    pub async fn get_app_dynos(&self, app_name: &str) -> Result<ApiResponse<Vec<Dyno>>> {
        let app_name = require(app_name, "app name")?;
        self.fetch_json(Method::GET, &["apps", app_name, "dynos"], None)
            .await
    }

    /// Restarts every dyno of an app, or only `dyno_name` when given.
    ///
    /// # Errors
    ///
    /// Returns an error if a name is blank or the request fails.
    pub async fn restart_app_dynos(
        &self,
        app_name: &str,
        dyno_name: Option<&str>,
    ) -> Result<ApiResponse<bool>> {
        let app_name = require(app_name, "app name")?;
        match dyno_name {
            Some(dyno) => {
                let dyno = require(dyno, "dyno name")?;
                tracing::info!(app = %app_name, dyno = %dyno, "restarting dyno");
                self.fetch_bool(Method::DELETE, &["apps", app_name, "dynos", dyno], None)
                    .await
            }
            None => {
                tracing::info!(app = %app_name, "restarting all dynos");
                self.fetch_bool(Method::DELETE, &["apps", app_name, "dynos"], None)
                    .await
            }
        }
    }
}
