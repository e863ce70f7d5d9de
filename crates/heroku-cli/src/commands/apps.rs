//! Apps command - list, inspect, create and search apps.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use owo_colors::OwoColorize;
use tabled::Tabled;

use heroku_client::{AppFilter, CreateApp, EnvVarFilter, HerokuClient, SearchFilter};
use heroku_core::App;

use super::{or_dash, outcome, parse_key_value, to_json, to_table};
use crate::OutputFormat;

/// Arguments for the apps command.
#[derive(Debug, Args)]
pub struct AppsArgs {
    /// Apps subcommand.
    #[command(subcommand)]
    pub command: AppsCommand,
}

/// Apps subcommands.
#[derive(Debug, Subcommand)]
pub enum AppsCommand {
    /// List every app.
    List,
    /// Show one app.
    Get {
        /// App name or id.
        name: String,
    },
    /// Create an app.
    Create {
        /// App name.
        name: String,
        /// Region name.
        #[arg(long)]
        region: Option<String>,
        /// Team that owns the app.
        #[arg(long)]
        team: Option<String>,
    },
    /// Replace the buildpacks of an app.
    Buildpacks {
        /// App name or id.
        name: String,
        /// Buildpacks, in order.
        #[arg(required = true, num_args = 1..)]
        buildpacks: Vec<String>,
    },
    /// Search apps by field and config var.
    Search(SearchArgs),
}

/// Arguments for `apps search`.
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Only consider production apps of this pipeline.
    #[arg(long)]
    pub pipeline: Option<String>,

    /// Region name.
    #[arg(long)]
    pub region: Option<String>,

    /// Stack name.
    #[arg(long)]
    pub stack: Option<String>,

    /// Team name.
    #[arg(long)]
    pub team: Option<String>,

    /// App name.
    #[arg(long)]
    pub name: Option<String>,

    /// Config var pattern as `KEY=REGEX` (repeatable).
    #[arg(long = "env", value_name = "KEY=REGEX", value_parser = parse_key_value)]
    pub env: Vec<(String, String)>,
}

impl SearchArgs {
    /// Builds the search filter.
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern is not a valid regular expression.
    pub fn filter(&self) -> Result<SearchFilter> {
        let app = AppFilter {
            name: self.name.clone(),
            region: self.region.clone(),
            stack: self.stack.clone(),
            team: self.team.clone(),
            ..AppFilter::default()
        };

        let mut env_vars = EnvVarFilter::new();
        for (key, pattern) in &self.env {
            env_vars = env_vars.pattern(key.as_str(), pattern)?;
        }

        Ok(SearchFilter::from_parts(app, env_vars))
    }
}

/// Runs the apps command.
///
/// # Errors
///
/// Returns an error if arguments are invalid or the API request fails.
pub async fn run(args: AppsArgs, client: &HerokuClient, format: OutputFormat) -> Result<String> {
    match args.command {
        AppsCommand::List => {
            let apps = client.get_apps().await.context("Failed to list apps")?;
            render_apps(&apps.data, format)
        }
        AppsCommand::Get { name } => {
            let app = client
                .get_app(&name)
                .await
                .with_context(|| format!("Failed to look up app {name}"))?
                .data
                .with_context(|| format!("App {name} not found"))?;
            render_app(&app, format)
        }
        AppsCommand::Create { name, region, team } => {
            let params = CreateApp {
                name,
                region,
                team,
            };
            let app = client
                .create_app(&params)
                .await
                .with_context(|| format!("Failed to create app {}", params.name))?;
            render_app(&app.data, format)
        }
        AppsCommand::Buildpacks { name, buildpacks } => {
            let updated = client
                .update_app_buildpacks(&name, &buildpacks)
                .await
                .with_context(|| format!("Failed to update buildpacks of {name}"))?;
            match format {
                OutputFormat::Json => to_json(&serde_json::json!({
                    "app": name,
                    "buildpacks": buildpacks,
                    "updated": updated.data,
                })),
                OutputFormat::Text | OutputFormat::Table => Ok(outcome(
                    updated.data,
                    &format!("Set buildpacks of {name}: {}", buildpacks.join(", ")),
                )),
            }
        }
        AppsCommand::Search(search) => {
            let filter = search.filter()?;
            let apps = client
                .search_apps(&filter, search.pipeline.as_deref())
                .await
                .context("Failed to search apps")?;
            render_apps(&apps.data, format)
        }
    }
}

#[derive(Tabled)]
struct AppRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Region")]
    region: String,
    #[tabled(rename = "Stack")]
    stack: String,
    #[tabled(rename = "Team")]
    team: String,
    #[tabled(rename = "Web URL")]
    web_url: String,
}

impl From<&App> for AppRow {
    fn from(app: &App) -> Self {
        Self {
            name: app.name.clone(),
            region: or_dash(app.region_name()),
            stack: or_dash(app.stack_name()),
            team: or_dash(app.team_name()),
            web_url: or_dash(app.web_url.as_deref()),
        }
    }
}

fn render_apps(apps: &[App], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(apps),
        OutputFormat::Table => Ok(to_table(
            apps.iter().map(AppRow::from).collect(),
            "No apps found",
        )),
        OutputFormat::Text => {
            if apps.is_empty() {
                return Ok("No apps found\n".to_string());
            }
            let mut out = String::new();
            for app in apps {
                writeln!(
                    out,
                    "{} ({}, {}){}",
                    app.name.bold(),
                    or_dash(app.region_name()),
                    or_dash(app.stack_name()),
                    app.team_name()
                        .map(|team| format!(" team {team}"))
                        .unwrap_or_default()
                )?;
            }
            Ok(out)
        }
    }
}

fn render_app(app: &App, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(app),
        OutputFormat::Table => Ok(to_table(vec![AppRow::from(app)], "No apps found")),
        OutputFormat::Text => app_details(app),
    }
}

fn app_details(app: &App) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "App: {}", app.name.bold())?;
    writeln!(out, "ID: {}", app.id)?;
    writeln!(out, "Region: {}", or_dash(app.region_name()))?;
    writeln!(out, "Stack: {}", or_dash(app.stack_name()))?;
    writeln!(out, "Owner: {}", or_dash(app.owner_email()))?;
    if let Some(team) = app.team_name() {
        writeln!(out, "Team: {team}")?;
    }
    writeln!(out, "Web URL: {}", or_dash(app.web_url.as_deref()))?;
    writeln!(out, "Git URL: {}", or_dash(app.git_url.as_deref()))?;
    if app.maintenance == Some(true) {
        writeln!(out, "Maintenance: {}", "on".yellow())?;
    }
    if let Some(acm) = app.acm {
        writeln!(out, "ACM: {}", if acm { "enabled" } else { "disabled" })?;
    }
    if let Some(created_at) = app.created_at {
        writeln!(out, "Created: {created_at}")?;
    }
    Ok(out)
}
