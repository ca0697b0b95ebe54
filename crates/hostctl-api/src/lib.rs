//! Management API client for hostctl
//!
//! [`ManagementClient`] exposes one typed method per endpoint and turns
//! non-success statuses into [`Error::UnexpectedStatus`]. The network is
//! reached through the [`Transport`] trait: [`UreqTransport`] in production,
//! a recording mock in tests.

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::{ManagementClient, operation};
pub use error::{Error, Result};
pub use transport::{ClientConfig, Method, Request, Response, Transport, UreqTransport};
pub use types::*;
