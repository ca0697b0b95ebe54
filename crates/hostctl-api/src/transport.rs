//! The HTTP seam between the client and the network

use std::fmt;
use std::time::Duration;

use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::{Error, Result};

/// HTTP verbs used by the management API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An outbound API request
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    /// Path below the API base URL, starting with `/v1/`
    pub path: String,
    /// JSON body, if any
    pub body: Option<Value>,
}

impl Request {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: None,
        }
    }

    pub fn with_body(method: Method, path: impl Into<String>, body: Value) -> Self {
        Self {
            method,
            path: path.into(),
            body: Some(body),
        }
    }
}

/// A raw API response: status code plus body text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

/// Sends requests to the platform.
///
/// Implementations report every response, including error statuses, as
/// `Ok`; status checking belongs to the caller. `Err` is reserved for
/// requests that produced no response at all.
pub trait Transport {
    fn send(&self, operation: &'static str, request: &Request) -> Result<Response>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, operation: &'static str, request: &Request) -> Result<Response> {
        (**self).send(operation, request)
    }
}

/// Connection settings for [`UreqTransport`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API origin, e.g. `https://api.example.com`
    pub base_url: String,
    /// Personal access token sent as a bearer token
    pub access_token: String,
    pub connect_timeout: Duration,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            access_token: access_token.into(),
            connect_timeout: Duration::from_secs(10),
            timeout: Duration::from_secs(60),
        }
    }
}

/// Blocking transport backed by `ureq`.
///
/// The cancellation token is checked before each request is sent and again
/// once its response has been read. An in-flight request is bounded by the
/// configured timeouts.
pub struct UreqTransport {
    agent: ureq::Agent,
    base_url: String,
    authorization: String,
    cancel: CancellationToken,
}

impl UreqTransport {
    pub fn new(config: ClientConfig, cancel: CancellationToken) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(config.connect_timeout)
            .timeout(config.timeout)
            .user_agent(concat!("hostctl/", env!("CARGO_PKG_VERSION")))
            .build();

        Self {
            agent,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            authorization: format!("Bearer {}", config.access_token),
            cancel,
        }
    }

    fn check_cancelled(&self, operation: &'static str) -> Result<()> {
        if self.cancel.is_cancelled() {
            return Err(Error::Cancelled { operation });
        }
        Ok(())
    }
}

impl Transport for UreqTransport {
    fn send(&self, operation: &'static str, request: &Request) -> Result<Response> {
        self.check_cancelled(operation)?;

        let url = format!("{}{}", self.base_url, request.path);
        debug!(method = %request.method, url = %url, "Sending request");

        let builder = self
            .agent
            .request(request.method.as_str(), &url)
            .set("Authorization", &self.authorization)
            .set("Accept", "application/json");

        let result = match &request.body {
            Some(body) => builder
                .set("Content-Type", "application/json")
                .send_string(&serde_json::to_string(body)?),
            None => builder.call(),
        };

        let response = match result {
            Ok(response) => response,
            // ureq reports 4xx/5xx as errors; they are still responses
            Err(ureq::Error::Status(_, response)) => response,
            Err(ureq::Error::Transport(transport)) => {
                return Err(Error::Transport {
                    operation,
                    message: transport.to_string(),
                });
            }
        };

        let status = response.status();
        let body = response.into_string().map_err(|e| Error::Transport {
            operation,
            message: e.to_string(),
        })?;
        debug!(status, "Received response");

        self.check_cancelled(operation)?;
        Ok(Response { status, body })
    }
}
