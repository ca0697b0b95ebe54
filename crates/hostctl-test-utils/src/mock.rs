//! [`MockTransport`]: scripted responses, recorded requests.

use std::collections::HashMap;
use std::sync::Mutex;

use hostctl_api::{Method, Request, Response, Transport};
use serde_json::{Value, json};

/// Project reference used by [`MockTransport::platform`]
pub const PROJECT_REF: &str = "test-project";

/// A [`Transport`] that answers from a route table and records every
/// request it receives.
///
/// Each route answers with the same response however often it is called.
/// Requests to unscripted routes get a 404 so a test notices them.
///
/// # Example
///
/// ```rust
/// use hostctl_api::{ManagementClient, Method};
/// use hostctl_test_utils::MockTransport;
/// use serde_json::json;
///
/// let mock = MockTransport::new();
/// mock.respond(Method::Get, "/v1/projects/p/ssl-enforcement", 200, json!({
///     "currentConfig": { "database": true },
///     "appliedSuccessfully": true
/// }));
///
/// let client = ManagementClient::new(&mock, "p");
/// assert!(client.get_ssl_enforcement().unwrap().is_enforced());
/// assert_eq!(mock.requests().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<(Method, String), Response>>,
    requests: Mutex<Vec<Request>>,
}

impl MockTransport {
    /// A transport with no routes.
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport scripted with a realistic remote state for
    /// [`PROJECT_REF`]: every read endpoint answers, every write succeeds.
    pub fn platform() -> Self {
        let mock = Self::new();
        mock.respond_get(
            "config/database/postgres",
            json!({
                "max_connections": 60,
                "statement_timeout": "8s",
                "shared_buffers": "256MB",
                "work_mem": "4MB",
                "track_commit_timestamp": false,
                "session_replication_role": "origin"
            }),
        );
        mock.respond_get(
            "config/database/pooler",
            json!({ "pool_mode": "transaction", "default_pool_size": 15, "max_client_conn": 200 }),
        );
        mock.respond_get(
            "network-restrictions",
            json!({
                "config": { "dbAllowedCidrs": ["0.0.0.0/0"], "dbAllowedCidrsV6": ["::/0"] },
                "status": "applied"
            }),
        );
        mock.respond_get(
            "ssl-enforcement",
            json!({ "currentConfig": { "database": false }, "appliedSuccessfully": true }),
        );
        mock.respond_get(
            "config/storage",
            json!({
                "fileSizeLimit": 52428800,
                "features": {
                    "imageTransformation": { "enabled": true },
                    "s3Protocol": { "enabled": false },
                    "icebergCatalog": {
                        "enabled": false,
                        "maxNamespaces": 0,
                        "maxTables": 0,
                        "maxCatalogs": 0
                    },
                    "vectorBuckets": { "enabled": false, "maxBuckets": 0, "maxIndexes": 0 }
                }
            }),
        );

        mock.respond(
            Method::Put,
            &project_path("config/database/postgres"),
            200,
            json!({}),
        );
        mock.respond(Method::Patch, &project_path("config/database/pooler"), 200, json!({}));
        mock.respond(
            Method::Post,
            &project_path("network-restrictions/apply"),
            201,
            json!({ "config": {}, "status": "stored" }),
        );
        mock.respond(
            Method::Put,
            &project_path("ssl-enforcement"),
            200,
            json!({ "currentConfig": { "database": true }, "appliedSuccessfully": true }),
        );
        mock.respond_raw(Method::Patch, &project_path("config/storage"), 200, "");
        mock
    }

    /// Script a JSON response for `method path`.
    pub fn respond(&self, method: Method, path: &str, status: u16, body: Value) {
        self.respond_raw(method, path, status, &body.to_string());
    }

    /// Script a response with a verbatim body.
    pub fn respond_raw(&self, method: Method, path: &str, status: u16, body: &str) {
        self.routes.lock().unwrap().insert(
            (method, path.to_string()),
            Response {
                status,
                body: body.to_string(),
            },
        );
    }

    /// Script a `200` GET below [`PROJECT_REF`].
    pub fn respond_get(&self, suffix: &str, body: Value) {
        self.respond(Method::Get, &project_path(suffix), 200, body);
    }

    /// Every request received, in order.
    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    /// Requests other than GETs, in order.
    pub fn writes(&self) -> Vec<Request> {
        self.requests()
            .into_iter()
            .filter(|r| r.method != Method::Get)
            .collect()
    }

    /// The body of the last write to `suffix` below [`PROJECT_REF`].
    pub fn last_write_to(&self, suffix: &str) -> Option<Value> {
        let path = project_path(suffix);
        self.writes()
            .into_iter()
            .rev()
            .find(|r| r.path == path)
            .and_then(|r| r.body)
    }

    /// Forget recorded requests, keeping the routes.
    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }
}

impl Transport for MockTransport {
    fn send(&self, _operation: &'static str, request: &Request) -> hostctl_api::Result<Response> {
        self.requests.lock().unwrap().push(request.clone());
        let routes = self.routes.lock().unwrap();
        Ok(routes
            .get(&(request.method, request.path.clone()))
            .cloned()
            .unwrap_or_else(|| Response {
                status: 404,
                body: format!("no route for {} {}", request.method, request.path),
            }))
    }
}

/// `/v1/projects/<PROJECT_REF>/<suffix>`
pub fn project_path(suffix: &str) -> String {
    format!("/v1/projects/{}/{}", PROJECT_REF, suffix)
}
