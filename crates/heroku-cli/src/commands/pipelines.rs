//! Pipelines command - list pipeline apps and couple apps.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use tabled::Tabled;

use heroku_client::{CouplingStage, HerokuClient};

use super::{or_dash, outcome, to_json, to_table};
use crate::OutputFormat;

/// Arguments for the pipelines command.
#[derive(Debug, Args)]
pub struct PipelinesArgs {
    /// Pipelines subcommand.
    #[command(subcommand)]
    pub command: PipelinesCommand,
}

/// Pipelines subcommands.
#[derive(Debug, Subcommand)]
pub enum PipelinesCommand {
    /// List the apps coupled to a pipeline.
    Apps {
        /// Pipeline name or id.
        pipeline: String,
        /// Only apps at this stage.
        #[arg(long, value_parser = parse_stage)]
        stage: Option<CouplingStage>,
    },
    /// Couple an app to a pipeline.
    AddApp {
        /// App name or id.
        app: String,
        /// Pipeline name or id.
        pipeline: String,
        /// Stage to couple at.
        #[arg(long, value_parser = parse_stage, default_value = "production")]
        stage: CouplingStage,
    },
}

fn parse_stage(raw: &str) -> Result<CouplingStage, String> {
    raw.parse().map_err(|e: heroku_core::Error| e.to_string())
}

#[derive(Tabled)]
struct PipelineAppRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Region")]
    region: String,
    #[tabled(rename = "Web URL")]
    web_url: String,
}

/// Runs the pipelines command.
///
/// # Errors
///
/// Returns an error if the API request fails or the pipeline does not exist
/// when coupling.
pub async fn run(
    args: PipelinesArgs,
    client: &HerokuClient,
    format: OutputFormat,
) -> Result<String> {
    match args.command {
        PipelinesCommand::Apps { pipeline, stage } => {
            let apps = client
                .get_pipeline_apps(&pipeline, stage)
                .await
                .with_context(|| format!("Failed to list apps of pipeline {pipeline}"))?
                .data;
            match format {
                OutputFormat::Json => to_json(&apps),
                OutputFormat::Table => Ok(to_table(
                    apps.iter()
                        .map(|app| PipelineAppRow {
                            name: app.name.clone(),
                            region: or_dash(app.region_name()),
                            web_url: or_dash(app.web_url.as_deref()),
                        })
                        .collect(),
                    "No apps found",
                )),
                OutputFormat::Text => {
                    if apps.is_empty() {
                        return Ok("No apps found\n".to_string());
                    }
                    Ok(apps.iter().map(|app| format!("{}\n", app.name)).collect())
                }
            }
        }
        PipelinesCommand::AddApp {
            app,
            pipeline,
            stage,
        } => {
            let added = client
                .add_app_to_pipeline(&app, &pipeline, stage)
                .await
                .with_context(|| format!("Failed to add {app} to pipeline {pipeline}"))?
                .data;
            if !added {
                anyhow::bail!("Pipeline {pipeline} not found");
            }
            match format {
                OutputFormat::Json => to_json(&serde_json::json!({
                    "app": app,
                    "pipeline": pipeline,
                    "stage": stage,
                })),
                OutputFormat::Text | OutputFormat::Table => Ok(outcome(
                    true,
                    &format!("Added {app} to {pipeline} at {stage}"),
                )),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(clap::Parser)]
    struct TestCli {
        #[command(flatten)]
        args: PipelinesArgs,
    }

    #[test]
    fn test_add_app_defaults_to_production() {
        use clap::Parser;

        let cli = TestCli::parse_from(["test", "add-app", "web", "checkout"]);
        assert!(matches!(
            cli.args.command,
            PipelinesCommand::AddApp { stage: CouplingStage::Production, .. }
        ));
    }

    #[test]
    fn test_stage_parsing() {
        use clap::Parser;

        let cli = TestCli::parse_from(["test", "apps", "checkout", "--stage", "staging"]);
        assert!(matches!(
            cli.args.command,
            PipelinesCommand::Apps { stage: Some(CouplingStage::Staging), .. }
        ));
        assert!(TestCli::try_parse_from(["test", "apps", "checkout", "--stage", "qa"]).is_err());
    }
}
