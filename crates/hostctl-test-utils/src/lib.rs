//! Shared test utilities for the hostctl workspace.
//!
//! This crate is a dev-dependency only and is never published.
//!
//! # Modules
//!
//! - [`mock`]: [`MockTransport`], a scripted and recording API transport
//! - [`workdir`]: [`TestWorkdir`], a temporary directory holding `config.toml`

pub mod mock;
pub mod workdir;

pub use mock::{MockTransport, PROJECT_REF};
pub use workdir::TestWorkdir;
