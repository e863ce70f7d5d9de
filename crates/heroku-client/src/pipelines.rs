//! Pipeline endpoints and pipeline-scoped app listing.

use reqwest::Method;
use reqwest::header::HeaderMap;
use serde::Serialize;

use heroku_core::{App, Coupling, CouplingStage, Pipeline, Result};

use crate::client::{HerokuClient, encode, require};
use crate::response::ApiResponse;

#[derive(Debug, Serialize)]
struct CreateCoupling<'a> {
    app: &'a str,
    pipeline: &'a str,
    stage: CouplingStage,
}

impl HerokuClient {
    /// Looks a pipeline up by name or id. A missing pipeline yields `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails for any reason other than the
    /// pipeline not existing.
    pub async fn get_pipeline(&self, pipeline_name: &str) -> Result<ApiResponse<Option<Pipeline>>> {
        let pipeline_name = require(pipeline_name, "pipeline name")?;
        self.fetch_lookup(&["pipelines", pipeline_name]).await
    }

    /// Lists the couplings of a pipeline.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    pub async fn get_pipeline_couplings(
        &self,
        pipeline_id: &str,
    ) -> Result<ApiResponse<Vec<Coupling>>> {
        let pipeline_id = require(pipeline_id, "pipeline id")?;
        self.fetch_json(
            Method::GET,
            &["pipelines", pipeline_id, "pipeline-couplings"],
            None,
        )
        .await
    }

    /// Lists the apps coupled to a pipeline, optionally at one stage only.
    ///
    /// Apps come back in coupling order. A pipeline that does not exist, or a
    /// blank name, yields an empty list. Couplings and apps are fetched
    /// concurrently and a failure of either fails the call.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the underlying requests fails.
    pub async fn get_pipeline_apps(
        &self,
        pipeline_name: &str,
        stage: Option<CouplingStage>,
    ) -> Result<ApiResponse<Vec<App>>> {
        if pipeline_name.trim().is_empty() {
            return Ok(ApiResponse::new(Vec::new(), HeaderMap::new()));
        }
        let ApiResponse { data, headers } = self.get_pipeline(pipeline_name).await?;
        let Some(pipeline) = data else {
            tracing::debug!(pipeline = %pipeline_name, "pipeline not found");
            return Ok(ApiResponse::new(Vec::new(), headers));
        };

        let (couplings, apps) =
            tokio::try_join!(self.get_pipeline_couplings(&pipeline.id), self.get_apps())?;

        let coupled = couplings
            .data
            .iter()
            .filter(|coupling| stage.is_none_or(|stage| coupling.stage == stage))
            .filter_map(|coupling| apps.data.iter().find(|app| app.id == coupling.app.id))
            .cloned()
            .collect();

        Ok(ApiResponse::new(coupled, apps.headers))
    }

    /// Couples an app to a pipeline at the given stage.
    ///
    /// Returns `false` without creating anything when the pipeline does not
    /// exist.
    ///
    /// # Errors
    ///
    /// Returns an error if a name is blank or a request fails.
    pub async fn add_app_to_pipeline(
        &self,
        app_name: &str,
        pipeline_name: &str,
        stage: CouplingStage,
    ) -> Result<ApiResponse<bool>> {
        let app_name = require(app_name, "app name")?;
        let ApiResponse { data, headers } = self.get_pipeline(pipeline_name).await?;
        let Some(pipeline) = data else {
            tracing::warn!(pipeline = %pipeline_name, app = %app_name, "pipeline not found; app not coupled");
            return Ok(ApiResponse::new(false, headers));
        };

        let body = CreateCoupling {
            app: app_name,
            pipeline: &pipeline.id,
            stage,
        };
        self.fetch_bool(Method::POST, &["pipeline-couplings"], Some(encode(&body)?))
            .await
    }
}
