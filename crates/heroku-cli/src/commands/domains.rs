//! Domains command - hostnames and automated certificate management.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use tabled::Tabled;

use heroku_client::{AddDomain, HerokuClient};
use heroku_core::Domain;

use super::{or_dash, outcome, to_json, to_table};
use crate::OutputFormat;

/// Arguments for the domains command.
#[derive(Debug, Args)]
pub struct DomainsArgs {
    /// Domains subcommand.
    #[command(subcommand)]
    pub command: DomainsCommand,
}

/// Domains subcommands.
#[derive(Debug, Subcommand)]
pub enum DomainsCommand {
    /// List the domains of an app.
    List {
        /// App name or id.
        app: String,
    },
    /// Attach a hostname to an app.
    Add {
        /// App name or id.
        app: String,
        /// Hostname to attach.
        hostname: String,
        /// SNI endpoint serving the hostname.
        #[arg(long)]
        sni_endpoint: Option<String>,
    },
    /// Turn on automated certificate management.
    EnableAcm {
        /// App name or id.
        app: String,
    },
    /// Turn off automated certificate management.
    DisableAcm {
        /// App name or id.
        app: String,
    },
}

#[derive(Tabled)]
struct DomainRow {
    #[tabled(rename = "Hostname")]
    hostname: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "DNS Target")]
    cname: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "ACM")]
    acm_status: String,
}

impl From<&Domain> for DomainRow {
    fn from(domain: &Domain) -> Self {
        Self {
            hostname: domain.hostname.clone(),
            kind: domain
                .kind
                .map_or_else(|| "-".to_string(), |kind| format!("{kind:?}").to_lowercase()),
            cname: or_dash(domain.cname.as_deref()),
            status: or_dash(domain.status.as_deref()),
            acm_status: or_dash(domain.acm_status.as_deref()),
        }
    }
}

/// Runs the domains command.
///
/// # Errors
///
/// Returns an error if the API request fails.
pub async fn run(args: DomainsArgs, client: &HerokuClient, format: OutputFormat) -> Result<String> {
    match args.command {
        DomainsCommand::List { app } => {
            let domains = client
                .get_app_domains(&app)
                .await
                .with_context(|| format!("Failed to list domains of {app}"))?
                .data;
            render_domains(&domains, format)
        }
        DomainsCommand::Add {
            app,
            hostname,
            sni_endpoint,
        } => {
            let params = AddDomain {
                hostname,
                sni_endpoint,
            };
            let domain = client
                .add_app_domain(&app, &params)
                .await
                .with_context(|| format!("Failed to add {} to {app}", params.hostname))?
                .data;
            match format {
                OutputFormat::Json => to_json(&domain),
                OutputFormat::Text | OutputFormat::Table => {
                    let mut out = outcome(true, &format!("Added {} to {app}", domain.hostname));
                    if let Some(cname) = &domain.cname {
                        out.push_str(&format!("Point DNS at {cname}\n"));
                    }
                    Ok(out)
                }
            }
        }
        DomainsCommand::EnableAcm { app } => {
            let enabled = client
                .enable_app_auto_certs(&app)
                .await
                .with_context(|| format!("Failed to enable ACM on {app}"))?;
            acm_outcome(&app, enabled.data, true, format)
        }
        DomainsCommand::DisableAcm { app } => {
            let disabled = client
                .disable_app_auto_certs(&app)
                .await
                .with_context(|| format!("Failed to disable ACM on {app}"))?;
            acm_outcome(&app, disabled.data, false, format)
        }
    }
}

fn acm_outcome(app: &str, ok: bool, enabled: bool, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(&serde_json::json!({ "app": app, "acm": enabled, "updated": ok })),
        OutputFormat::Text | OutputFormat::Table => {
            let verb = if enabled { "Enabled" } else { "Disabled" };
            Ok(outcome(ok, &format!("{verb} ACM on {app}")))
        }
    }
}

fn render_domains(domains: &[Domain], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(domains),
        OutputFormat::Table => Ok(to_table(
            domains.iter().map(DomainRow::from).collect(),
            "No domains found",
        )),
        OutputFormat::Text => {
            if domains.is_empty() {
                return Ok("No domains found\n".to_string());
            }
            Ok(domains
                .iter()
                .map(|domain| match &domain.cname {
                    Some(cname) => format!("{} -> {cname}\n", domain.hostname),
                    None => format!("{}\n", domain.hostname),
                })
                .collect())
        }
    }
}
