//! Config command - read and change config vars.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use tabled::Tabled;

use heroku_client::HerokuClient;
use heroku_core::EnvVars;

use super::{outcome, parse_key_value, to_json, to_table};
use crate::OutputFormat;

/// Arguments for the config command.
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand.
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show config vars.
    Get {
        /// App name or id.
        app: String,
        /// Show only this variable's value.
        #[arg(long)]
        key: Option<String>,
    },
    /// Set config vars.
    Set {
        /// App name or id.
        app: String,
        /// Variables as `KEY=VALUE`.
        #[arg(required = true, num_args = 1.., value_parser = parse_key_value)]
        vars: Vec<(String, String)>,
    },
    /// Remove config vars.
    Unset {
        /// App name or id.
        app: String,
        /// Variable names.
        #[arg(required = true, num_args = 1..)]
        keys: Vec<String>,
    },
}

#[derive(Tabled)]
struct VarRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Value")]
    value: String,
}

/// Runs the config command.
///
/// # Errors
///
/// Returns an error if the API request fails or a requested key is unset.
pub async fn run(args: ConfigArgs, client: &HerokuClient, format: OutputFormat) -> Result<String> {
    match args.command {
        ConfigCommand::Get { app, key } => {
            let vars = client
                .get_app_env_vars(&app)
                .await
                .with_context(|| format!("Failed to read config vars of {app}"))?
                .data;
            match key {
                Some(key) => {
                    let value = vars
                        .get(&key)
                        .with_context(|| format!("{key} is not set on {app}"))?;
                    match format {
                        OutputFormat::Json => to_json(value),
                        OutputFormat::Text | OutputFormat::Table => Ok(format!("{value}\n")),
                    }
                }
                None => render_vars(&vars, format),
            }
        }
        ConfigCommand::Set { app, vars } => {
            let vars: EnvVars = vars.into_iter().collect();
            let updated = client
                .update_app_env_vars(&app, &vars)
                .await
                .with_context(|| format!("Failed to set config vars on {app}"))?;
            let names: Vec<&str> = vars.keys().map(String::as_str).collect();
            match format {
                OutputFormat::Json => to_json(&serde_json::json!({
                    "app": app,
                    "set": names,
                    "updated": updated.data,
                })),
                OutputFormat::Text | OutputFormat::Table => Ok(outcome(
                    updated.data,
                    &format!("Set {} on {app}", names.join(", ")),
                )),
            }
        }
        ConfigCommand::Unset { app, keys } => {
            let updated = client
                .unset_app_env_vars(&app, &keys)
                .await
                .with_context(|| format!("Failed to unset config vars on {app}"))?;
            match format {
                OutputFormat::Json => to_json(&serde_json::json!({
                    "app": app,
                    "unset": keys,
                    "updated": updated.data,
                })),
                OutputFormat::Text | OutputFormat::Table => Ok(outcome(
                    updated.data,
                    &format!("Unset {} on {app}", keys.join(", ")),
                )),
            }
        }
    }
}

fn render_vars(vars: &EnvVars, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(vars),
        OutputFormat::Table => Ok(to_table(
            vars.iter()
                .map(|(key, value)| VarRow {
                    key: key.clone(),
                    value: value.clone(),
                })
                .collect(),
            "No config vars set",
        )),
        OutputFormat::Text => {
            if vars.is_empty() {
                return Ok("No config vars set\n".to_string());
            }
            Ok(vars
                .iter()
                .map(|(key, value)| format!("{key}={value}\n"))
                .collect())
        }
    }
}
