//! Domain and certificate endpoints.

use reqwest::Method;
use serde::Serialize;

use heroku_core::{Domain, Result};

use crate::client::{HerokuClient, encode, require};
use crate::response::ApiResponse;

/// Parameters for [`HerokuClient::add_app_domain`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddDomain {
    /// Full hostname to attach.
    pub hostname: String,
    /// SNI endpoint that serves the hostname.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sni_endpoint: Option<String>,
}

impl AddDomain {
    /// Creates parameters for a hostname.
    #[must_use]
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            sni_endpoint: None,
        }
    }

    /// Sets the SNI endpoint.
    #[must_use]
    pub fn sni_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.sni_endpoint = Some(endpoint.into());
        self
    }
}

impl HerokuClient {
    /// Attaches a hostname to an app.
    ///
    /// # Errors
    ///
    /// Returns an error if a name is blank, the request fails, or the
    /// response cannot be parsed.
    pub async fn add_app_domain(
        &self,
        app_name: &str,
        params: &AddDomain,
    ) -> Result<ApiResponse<Domain>> {
        let app_name = require(app_name, "app name")?;
        require(&params.hostname, "hostname")?;
        self.fetch_json(
            Method::POST,
            &["apps", app_name, "domains"],
            Some(encode(params)?),
        )
        .await
    }

    /// Lists the domains of an app.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank, the request fails, or the
    /// response cannot be parsed.
    pub async fn get_app_domains(&self, app_name: &str) -> Result<ApiResponse<Vec<Domain>>> {
        let app_name = require(app_name, "app name")?;
        self.fetch_json(Method::GET, &["apps", app_name, "domains"], None)
            .await
    }

    /// Turns on Automated Certificate Management for an app.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or the request fails.
    pub async fn enable_app_auto_certs(&self, app_name: &str) -> Result<ApiResponse<bool>> {
        let app_name = require(app_name, "app name")?;
        self.fetch_bool(Method::POST, &["apps", app_name, "acm"], None)
            .await
    }

    /// Turns off Automated Certificate Management for an app.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or the request fails.
    pub async fn disable_app_auto_certs(&self, app_name: &str) -> Result<ApiResponse<bool>> {
        let app_name = require(app_name, "app name")?;
        self.fetch_bool(Method::DELETE, &["apps", app_name, "acm"], None)
            .await
    }
}
