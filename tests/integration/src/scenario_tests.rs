//! Multi-step scenarios across the override, SSL and network commands, and
//! cancellation through the real transport.

use hostctl_api::{ClientConfig, ManagementClient, Method, UreqTransport};
use hostctl_config::LocalConfig;
use hostctl_core::{Error, OverrideOptions, ReconcileEngine, ssl_status_message};
use hostctl_test_utils::mock::project_path;
use hostctl_test_utils::{MockTransport, PROJECT_REF};
use pretty_assertions::assert_eq;
use serde_json::json;
use tokio_util::sync::CancellationToken;

fn engine(mock: &MockTransport) -> ReconcileEngine<&MockTransport> {
    ReconcileEngine::new(ManagementClient::new(mock, PROJECT_REF))
}

#[test]
fn test_override_update_then_delete() {
    let mock = MockTransport::platform();
    let engine = engine(&mock);

    engine
        .update_postgres_overrides(
            ["statement_timeout=120", "track_commit_timestamp=true"],
            &OverrideOptions {
                replace_existing: false,
                no_restart: true,
            },
        )
        .unwrap();

    let update = mock.last_write_to("config/database/postgres").unwrap();
    assert_eq!(update["statement_timeout"], json!("120"));
    assert_eq!(update["track_commit_timestamp"], json!(true));
    assert_eq!(update["restart_database"], json!(false));
    assert_eq!(update["max_connections"], json!(60));

    mock.clear_requests();
    engine
        .delete_postgres_overrides(&["statement_timeout"], true)
        .unwrap();

    let requests = mock.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].method, Method::Get);
    assert_eq!(requests[1].method, Method::Put);
    assert_eq!(requests[1].path, project_path("config/database/postgres"));

    let delete = mock.last_write_to("config/database/postgres").unwrap();
    assert!(delete.get("statement_timeout").is_none());
    assert_eq!(delete["restart_database"], json!(false));
}

#[test]
fn test_ssl_not_applied_is_not_enforced() {
    let mock = MockTransport::platform();
    mock.respond(
        Method::Put,
        &project_path("ssl-enforcement"),
        200,
        json!({ "currentConfig": { "database": true }, "appliedSuccessfully": false }),
    );

    let response = engine(&mock).update_ssl_enforcement(true).unwrap();

    assert_eq!(ssl_status_message(&response), "SSL is *NOT* being enforced.");
}

#[test]
fn test_network_update_then_get() {
    let mock = MockTransport::platform();
    let engine = engine(&mock);

    engine
        .update_network_restrictions(&[" 10.0.0.0/8 ", "::1/128"])
        .unwrap();
    let current = engine.get_network_restrictions().unwrap();

    assert_eq!(
        mock.last_write_to("network-restrictions/apply"),
        Some(json!({
            "dbAllowedCidrs": ["10.0.0.0/8"],
            "dbAllowedCidrsV6": ["::1/128"]
        }))
    );
    assert_eq!(current.config.db_allowed_cidrs, vec!["0.0.0.0/0"]);
}

#[test]
fn test_network_apply_must_return_created() {
    let mock = MockTransport::platform();
    mock.respond(
        Method::Post,
        &project_path("network-restrictions/apply"),
        200,
        json!({}),
    );

    let err = engine(&mock)
        .update_network_restrictions(&["10.0.0.0/8"])
        .unwrap_err();

    assert!(err.to_string().starts_with("unexpected update network restrictions status 200"));
}

#[test]
fn test_cancelled_run_sends_nothing() {
    let cancel = CancellationToken::new();
    cancel.cancel();
    let transport = UreqTransport::new(ClientConfig::new("http://127.0.0.1:9", "token"), cancel);
    let engine = ReconcileEngine::new(ManagementClient::new(transport, PROJECT_REF));
    let local = LocalConfig::parse("[db.settings]\nmax_connections = 100\n").unwrap();

    let err = engine.diff(&local).unwrap_err();

    match &err {
        Error::Api(api) => assert!(api.is_cancelled()),
        other => panic!("Expected cancellation, got {:?}", other),
    }
    assert_eq!(err.to_string(), "retrieve Postgres config cancelled");
}
