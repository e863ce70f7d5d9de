//! Heroku API CLI - Command-line interface for the Heroku Platform API.
//!
//! The main entry point for the `heroku-api` binary.

use anyhow::Result;
use clap::Parser;

use heroku_cli::Cli;
use heroku_core::init_logging;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_format.into());
    let config = cli.config();

    // Create runtime and execute
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(heroku_cli::execute(cli.command, &config))
}
