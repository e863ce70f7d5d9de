//! Dynos command - list and restart dynos.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use owo_colors::OwoColorize;
use tabled::Tabled;

use heroku_client::HerokuClient;
use heroku_core::{Dyno, DynoSize, DynoState};

use super::{or_dash, outcome, to_json, to_table};
use crate::OutputFormat;

/// Arguments for the dynos command.
#[derive(Debug, Args)]
pub struct DynosArgs {
    /// Dynos subcommand.
    #[command(subcommand)]
    pub command: DynosCommand,
}

/// Dynos subcommands.
#[derive(Debug, Subcommand)]
pub enum DynosCommand {
    /// List the dynos of an app.
    List {
        /// App name or id.
        app: String,
    },
    /// Restart every dyno of an app, or one.
    Restart {
        /// App name or id.
        app: String,
        /// Dyno name (e.g. `web.1`).
        #[arg(long)]
        dyno: Option<String>,
    },
}

#[derive(Tabled)]
struct DynoRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Command")]
    command: String,
    #[tabled(rename = "Release")]
    release: String,
}

/// Runs the dynos command.
///
/// # Errors
///
/// Returns an error if the API request fails.
pub async fn run(args: DynosArgs, client: &HerokuClient, format: OutputFormat) -> Result<String> {
    match args.command {
        DynosCommand::List { app } => {
            let dynos = client
                .get_app_dynos(&app)
                .await
                .with_context(|| format!("Failed to list dynos of {app}"))?
                .data;
            render_dynos(&dynos, format)
        }
        DynosCommand::Restart { app, dyno } => {
            let restarted = client
                .restart_app_dynos(&app, dyno.as_deref())
                .await
                .with_context(|| format!("Failed to restart dynos of {app}"))?;
            match format {
                OutputFormat::Json => to_json(&serde_json::json!({
                    "app": app,
                    "dyno": dyno,
                    "restarted": restarted.data,
                })),
                OutputFormat::Text | OutputFormat::Table => {
                    let target = dyno.map_or_else(|| "all dynos".to_string(), |d| format!("dyno {d}"));
                    Ok(outcome(restarted.data, &format!("Restarted {target} of {app}")))
                }
            }
        }
    }
}

fn state_colored(state: DynoState) -> String {
    match state {
        DynoState::Up => state.green().to_string(),
        DynoState::Crashed => state.red().to_string(),
        DynoState::Starting => state.yellow().to_string(),
        DynoState::Down | DynoState::Idle => state.dimmed().to_string(),
    }
}

fn render_dynos(dynos: &[Dyno], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(dynos),
        OutputFormat::Table => Ok(to_table(
            dynos
                .iter()
                .map(|d| DynoRow {
                    name: d.name.clone(),
                    state: d.state.map_or_else(|| "-".to_string(), |s| s.to_string()),
                    size: or_dash(d.size.as_ref().map(DynoSize::as_str)),
                    command: or_dash(d.command.as_deref()),
                    release: d
                        .release
                        .as_ref()
                        .map_or_else(|| "-".to_string(), |r| format!("v{}", r.version)),
                })
                .collect(),
            "No dynos running",
        )),
        OutputFormat::Text => {
            if dynos.is_empty() {
                return Ok("No dynos running\n".to_string());
            }
            let mut out = String::new();
            for dyno in dynos {
                writeln!(
                    out,
                    "{} {} ({}) {}",
                    dyno.name,
                    dyno.state.map_or_else(|| "-".to_string(), state_colored),
                    or_dash(dyno.size.as_ref().map(DynoSize::as_str)),
                    or_dash(dyno.command.as_deref())
                )?;
            }
            Ok(out)
        }
    }
}
