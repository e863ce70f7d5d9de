//! Shared test utilities for the Heroku API client crates.
//!
//! This crate provides:
//! - [`MockHerokuApi`]: An in-process platform API that records every request
//! - Factories for apps, pipelines, couplings, domains and dynos
//! - Assertion helpers over recorded requests
//!
//! # Example
//!
//! ```rust,ignore
//! use heroku_test_utils::{AppFactory, MockHerokuApi, assert_requested, Method};
//!
//! #[tokio::test]
//! async fn test_example() {
//!     let mock = MockHerokuApi::start().await;
//!     mock.add_app(AppFactory::new("web").region("eu").build());
//!     // ... point a client at mock.base_url() ...
//!     assert_requested(&mock.requests(), &Method::GET, "/apps");
//! }
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
// Test utilities use expect/unwrap for cleaner test code - panics are acceptable in tests
#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::missing_panics_doc)]

pub mod assertions;
pub mod fixtures;
pub mod mock_server;

pub use assertions::*;
pub use fixtures::*;
pub use mock_server::*;

pub use axum::http::{Method, StatusCode};

/// API key the mock expects unless a test says otherwise.
pub const TEST_API_KEY: &str = "test-api-key-0123456789";

/// Initialize test logging (call once per test module).
pub fn init_test_logging() {
    use tracing_subscriber::{EnvFilter, fmt};

    let _ = fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("heroku_client=debug".parse().expect("valid directive")),
        )
        .with_test_writer()
        .try_init();
}
