//! Command implementations for hostctl
//!
//! Every command that talks to the management API goes through
//! [`Context::with_engine`], which runs the blocking engine off the async
//! runtime and cancels outstanding requests on Ctrl-C.

pub mod config;
pub mod network;
pub mod postgres;
pub mod ssl;

use std::path::PathBuf;

use hostctl_api::{ClientConfig, ManagementClient, UreqTransport};
use hostctl_config::LocalConfig;
use hostctl_core::ReconcileEngine;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::cli::{Cli, OutputFormat};
use crate::error::{CliError, Result};

/// Engine type used by every remote command
pub type Engine = ReconcileEngine<UreqTransport>;

/// Settings shared by all commands
#[derive(Debug, Clone)]
pub struct Context {
    pub workdir: PathBuf,
    pub api_url: String,
    pub access_token: Option<String>,
    pub project_ref: Option<String>,
    pub output: OutputFormat,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            workdir: cli.workdir.clone(),
            api_url: cli.api_url.clone(),
            access_token: cli.access_token.clone(),
            project_ref: cli.project_ref.clone(),
            output: cli.output,
        }
    }

    /// Path of `config.toml` inside the working directory
    pub fn config_path(&self) -> PathBuf {
        LocalConfig::path_in(&self.workdir)
    }

    pub fn load_config(&self) -> Result<LocalConfig> {
        Ok(LocalConfig::load(&self.config_path())?)
    }

    /// `project_id` recorded in `config.toml`, for commands that do not
    /// otherwise read the file. Only consulted without `--project-ref`.
    pub fn recorded_project(&self) -> Option<String> {
        if self.project_ref.is_some() {
            return None;
        }
        let path = self.config_path();
        if !path.is_file() {
            return None;
        }
        match LocalConfig::load(&path) {
            Ok(config) => config.project_id,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Ignoring unreadable config.toml");
                None
            }
        }
    }

    /// Resolve connection settings, falling back to the project recorded in
    /// `config.toml` when no project ref was given
    fn connection(&self, recorded_project: Option<&str>) -> Result<(ClientConfig, String)> {
        let project_ref = self
            .project_ref
            .as_deref()
            .or(recorded_project)
            .filter(|r| !r.trim().is_empty())
            .ok_or_else(|| {
                CliError::user(
                    "no project ref given: pass --project-ref or set HOSTCTL_PROJECT_REF",
                )
            })?;
        let access_token = self
            .access_token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                CliError::user(
                    "no access token given: pass --access-token or set HOSTCTL_ACCESS_TOKEN",
                )
            })?;

        Ok((
            ClientConfig::new(self.api_url.as_str(), access_token),
            project_ref.to_string(),
        ))
    }

    /// Run `task` against a live engine.
    ///
    /// The engine is blocking, so it runs on the blocking pool. Ctrl-C
    /// cancels the token shared with the transport; the task then stops
    /// before its next request.
    pub async fn with_engine<F, R>(&self, recorded_project: Option<&str>, task: F) -> Result<R>
    where
        F: FnOnce(&Engine) -> Result<R> + Send + 'static,
        R: Send + 'static,
    {
        let (client_config, project_ref) = self.connection(recorded_project)?;
        debug!(api_url = %client_config.base_url, project_ref = %project_ref, "Connecting");

        let cancel = CancellationToken::new();
        let interrupt = cancel.clone();
        let watcher = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, cancelling remaining requests");
                interrupt.cancel();
            }
        });

        let worker = tokio::task::spawn_blocking(move || {
            let transport = UreqTransport::new(client_config, cancel);
            let engine = ReconcileEngine::new(ManagementClient::new(transport, project_ref));
            task(&engine)
        });

        let result = worker.await;
        watcher.abort();
        result?
    }
}
