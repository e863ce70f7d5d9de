//! # heroku-cli
//!
//! Command-line interface for the Heroku Platform API client.
//!
//! ## Commands
//!
//! - `heroku-api apps` - List, inspect, create and search apps
//! - `heroku-api pipelines` - List pipeline apps and couple apps
//! - `heroku-api config` - Read and change config vars
//! - `heroku-api domains` - Manage hostnames and automated certificates
//! - `heroku-api dynos` - List and restart dynos
//!
//! ## Configuration
//!
//! The CLI uses environment variables or command-line flags for settings:
//!
//! - `HEROKU_API_KEY` - API key (required)
//! - `HEROKU_API_URL` - API endpoint (default: `https://api.heroku.com`)
//! - `HEROKU_API_TIMEOUT_SECONDS` - Request timeout

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]
// CLI uses print! macros intentionally
#![allow(clippy::print_stdout)]
#![allow(clippy::print_stderr)]

pub mod commands;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use heroku_client::config::{DEFAULT_BASE_URL, ENV_API_KEY, ENV_API_URL, ENV_TIMEOUT_SECONDS};
use heroku_client::{ClientConfig, HerokuClient};
use heroku_core::LogFormat;

/// Heroku API CLI - typed access to the Heroku Platform API.
#[derive(Debug, Parser)]
#[command(name = "heroku-api")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// API key.
    #[arg(long, env = ENV_API_KEY, hide_env_values = true)]
    pub api_key: Option<String>,

    /// API server URL.
    #[arg(long, env = ENV_API_URL, default_value = DEFAULT_BASE_URL)]
    pub api_url: String,

    /// Request timeout in seconds.
    #[arg(long, env = ENV_TIMEOUT_SECONDS)]
    pub timeout_seconds: Option<u64>,

    /// Output format.
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Log format (logs go to stderr).
    #[arg(long, value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Get the effective configuration.
    #[must_use]
    pub fn config(&self) -> Config {
        Config {
            api_key: self.api_key.clone(),
            api_url: self.api_url.clone(),
            timeout_seconds: self.timeout_seconds,
            format: self.format,
        }
    }
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List, inspect, create and search apps.
    Apps(commands::apps::AppsArgs),
    /// List pipeline apps and couple apps to pipelines.
    Pipelines(commands::pipelines::PipelinesArgs),
    /// Read and change config vars.
    Config(commands::config_vars::ConfigArgs),
    /// Manage hostnames and automated certificates.
    Domains(commands::domains::DomainsArgs),
    /// List and restart dynos.
    Dynos(commands::dynos::DynosArgs),
}

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// Table output.
    Table,
}

/// Log output format flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormatArg {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Json => Self::Json,
        }
    }
}

/// CLI configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// API key.
    pub api_key: Option<String>,
    /// API server URL.
    pub api_url: String,
    /// Request timeout in seconds.
    pub timeout_seconds: Option<u64>,
    /// Output format.
    pub format: OutputFormat,
}

impl Config {
    /// Builds the API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the client settings are
    /// invalid.
    pub fn client(&self) -> Result<HerokuClient> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .context("API key is required. Set HEROKU_API_KEY or use --api-key")?;

        let mut config = ClientConfig::new(api_key).with_base_url(self.api_url.clone());
        if let Some(seconds) = self.timeout_seconds {
            config = config.with_timeout(Duration::from_secs(seconds));
        }
        HerokuClient::with_config(config).context("Failed to create API client")
    }
}

/// Runs one subcommand and prints its output to stdout.
///
/// # Errors
///
/// Returns an error if the client cannot be built or the command fails.
pub async fn execute(command: Commands, config: &Config) -> Result<()> {
    let client = config.client()?;
    tracing::debug!(api_url = %config.api_url, format = ?config.format, "running command");
    let output = render(command, &client, config.format).await?;
    print!("{output}");
    Ok(())
}

/// Runs one subcommand and returns what it would print.
///
/// # Errors
///
/// Returns an error if the command fails.
pub async fn render(command: Commands, client: &HerokuClient, format: OutputFormat) -> Result<String> {
    match command {
        Commands::Apps(args) => commands::apps::run(args, client, format).await,
        Commands::Pipelines(args) => commands::pipelines::run(args, client, format).await,
        Commands::Config(args) => commands::config_vars::run(args, client, format).await,
        Commands::Domains(args) => commands::domains::run(args, client, format).await,
        Commands::Dynos(args) => commands::dynos::run(args, client, format).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_config_from_flags() {
        let cli = Cli::parse_from([
            "heroku-api",
            "--api-key",
            "key-abc",
            "--api-url",
            "http://127.0.0.1:9000",
            "--timeout-seconds",
            "5",
            "--format",
            "json",
            "--log-format",
            "json",
            "apps",
            "list",
        ]);

        let config = cli.config();
        assert_eq!(config.api_key.as_deref(), Some("key-abc"));
        assert_eq!(config.api_url, "http://127.0.0.1:9000");
        assert_eq!(config.timeout_seconds, Some(5));
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(LogFormat::from(cli.log_format), LogFormat::Json);
    }

    #[test]
    fn test_missing_api_key_is_reported() {
        let config = Config {
            api_url: DEFAULT_BASE_URL.to_string(),
            ..Config::default()
        };
        let err = config.client().unwrap_err();
        assert!(err.to_string().contains("HEROKU_API_KEY"));
    }

    #[test]
    fn test_client_uses_configured_url() {
        let config = Config {
            api_key: Some("key".to_string()),
            api_url: "http://127.0.0.1:9000/".to_string(),
            timeout_seconds: Some(3),
            format: OutputFormat::Text,
        };
        let client = config.client().unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:9000/");
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
