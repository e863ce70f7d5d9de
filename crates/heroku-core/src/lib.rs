//! # heroku-core
//!
//! Shared types for the Heroku Platform API client.
//!
//! This crate provides the foundational pieces used by every other crate in
//! the workspace:
//!
//! - **Data Model**: Typed records for apps, pipelines, couplings, domains,
//!   dynos and config vars, passed through verbatim from the platform
//! - **Error Types**: The single error enum and result alias for API calls
//! - **Lookups**: The one place where the platform's `not_found` sentinel is
//!   translated into an absent result
//! - **Observability**: Logging initialisation, span helpers and secret
//!   redaction
//!
//! ## Example
//!
//! ```rust
//! use heroku_core::prelude::*;
//!
//! let stage: CouplingStage = "production".parse()?;
//! assert_eq!(stage, CouplingStage::Production);
//! # Ok::<(), heroku_core::Error>(())
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod lookup;
pub mod models;
pub mod observability;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust
/// use heroku_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::models::{
        App, AppOwner, Coupling, CouplingStage, Domain, DomainKind, Dyno, DynoSize, DynoState,
        EnvVars, NamedRef, Pipeline,
    };
}

// Re-export key types at crate root for ergonomics
pub use error::{Error, Result};
pub use models::{
    App, AppOwner, Coupling, CouplingStage, Domain, DomainKind, Dyno, DynoSize, DynoState,
    EnvVars, NamedRef, Pipeline,
};
pub use observability::{LogFormat, Redacted, api_span, init_logging};
