//! # heroku-client
//!
//! Typed async client for the Heroku Platform API.
//!
//! Every operation is a method on [`HerokuClient`] and returns an
//! [`ApiResponse`] carrying the decoded body together with the response
//! headers. Operations are grouped by resource:
//!
//! - **Apps**: listing, lookup, creation and buildpack replacement
//! - **Pipelines**: lookup, couplings and pipeline-scoped app listing
//! - **Config vars**: read, merge and unset
//! - **Domains**: hostnames and automated certificate management
//! - **Dynos**: listing and restarts
//! - **Search**: composite filtering over apps and their config vars
//!
//! ## Example
//!
//! ```rust,no_run
//! use heroku_client::{AppFilter, HerokuClient, SearchFilter};
//!
//! # async fn run() -> heroku_core::Result<()> {
//! let client = HerokuClient::from_env()?;
//! let filter = SearchFilter::from(AppFilter::new().region("eu"));
//! let apps = client.search_apps(&filter, Some("checkout")).await?;
//! for app in apps.data {
//!     println!("{}", app.name);
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod apps;
mod client;
pub mod config;
mod config_vars;
mod domains;
mod dynos;
mod pipelines;
mod response;
pub mod search;

pub use apps::CreateApp;
pub use client::HerokuClient;
pub use config::ClientConfig;
pub use domains::AddDomain;
pub use response::ApiResponse;
pub use search::{AppFilter, EnvVarFilter, SearchFilter};

pub use heroku_core::{
    App, Coupling, CouplingStage, Domain, Dyno, EnvVars, Error, Pipeline, Result,
};
