//! CLI subcommands.
//!
//! Every command module exposes an argument struct and a `run` function that
//! returns the rendered output, so the top level decides where it goes.

pub mod apps;
pub mod config_vars;
pub mod domains;
pub mod dynos;
pub mod pipelines;

use anyhow::Result;
use owo_colors::OwoColorize;
use serde::Serialize;
use tabled::{Table, Tabled};

/// Pretty JSON followed by a newline.
pub(crate) fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(format!("{}\n", serde_json::to_string_pretty(value)?))
}

/// Renders rows as a table, or `empty` when there are none.
pub(crate) fn to_table<R: Tabled>(rows: Vec<R>, empty: &str) -> String {
    if rows.is_empty() {
        format!("{empty}\n")
    } else {
        format!("{}\n", Table::new(rows))
    }
}

/// One-line confirmation, coloured by outcome.
pub(crate) fn outcome(ok: bool, message: &str) -> String {
    if ok {
        format!("{} {message}\n", "✓".green())
    } else {
        format!("{} {message}\n", "✗".red())
    }
}

/// Parses `KEY=VALUE`, splitting at the first `=`.
pub(crate) fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{raw}`"))?;
    if key.is_empty() {
        return Err(format!("missing key in `{raw}`"));
    }
    Ok((key.to_string(), value.to_string()))
}

pub(crate) fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}
