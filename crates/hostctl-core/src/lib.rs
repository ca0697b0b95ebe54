//! Configuration reconciliation for hostctl
//!
//! This crate keeps a project's platform settings in line with the local
//! `config.toml`:
//!
//! - [`adapter`]: per-section merge, projection and diff against remote state
//! - [`overrides`]: `key=value` Postgres overrides from the command line
//! - [`engine`]: the [`ReconcileEngine`] driving diff, push and pull
//! - [`report`]: [`DriftReport`] and [`PushReport`]

pub mod adapter;
pub mod engine;
pub mod error;
pub mod overrides;
pub mod report;

pub use adapter::RemoteAdapter;
pub use engine::{OverrideOptions, ReconcileEngine, ssl_status_message};
pub use error::{Error, Result};
pub use overrides::{OverrideSet, OverrideValue, RESTART_DATABASE};
pub use report::{DriftReport, DriftStatus, PushOptions, PushReport};
