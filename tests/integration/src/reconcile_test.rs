//! Vertical slice: config.toml on disk through the engine to the platform
//! and back.

use hostctl_api::{ManagementClient, Method};
use hostctl_config::LocalConfig;
use hostctl_core::{PushOptions, ReconcileEngine};
use hostctl_test_utils::{MockTransport, PROJECT_REF, TestWorkdir};
use pretty_assertions::assert_eq;
use serde_json::json;

const DRIFTED: &str = r#"
[db.settings]
max_connections = 100

[db.pooler]
enabled = true
pool_mode = "session"

[db.network_restrictions]
enabled = true
allowed_cidrs = ["0.0.0.0/0"]
allowed_cidrs_v6 = ["::/0"]

[db.ssl_enforcement]
enabled = true

[storage]
file_size_limit = "50MiB"

[storage.image_transformation]
enabled = true
"#;

fn engine(mock: &MockTransport) -> ReconcileEngine<&MockTransport> {
    ReconcileEngine::new(ManagementClient::new(mock, PROJECT_REF))
}

#[test]
fn test_push_from_disk_writes_drifted_sections_in_order() {
    let workdir = TestWorkdir::with_config(DRIFTED);
    let local = LocalConfig::load(&workdir.config_path()).unwrap();
    let mock = MockTransport::platform();

    let report = engine(&mock).push(&local, &PushOptions::default()).unwrap();

    assert_eq!(
        report.updated,
        vec!["db.settings", "db.pooler", "db.ssl_enforcement"]
    );
    assert!(report.drift.skipped.is_empty());

    let writes: Vec<Method> = mock.writes().into_iter().map(|r| r.method).collect();
    assert_eq!(writes, vec![Method::Put, Method::Patch, Method::Put]);
    assert_eq!(
        mock.last_write_to("config/database/pooler"),
        Some(json!({ "pool_mode": "session" }))
    );
    assert_eq!(
        mock.last_write_to("ssl-enforcement"),
        Some(json!({ "requestedConfig": { "database": true } }))
    );
}

#[test]
fn test_dry_run_reports_the_same_sections_as_push() {
    let local = LocalConfig::parse(DRIFTED).unwrap();

    let dry_mock = MockTransport::platform();
    let dry = engine(&dry_mock)
        .push(&local, &PushOptions { dry_run: true })
        .unwrap();

    let mock = MockTransport::platform();
    let real = engine(&mock).push(&local, &PushOptions::default()).unwrap();

    assert_eq!(dry.updated, real.updated);
    assert!(dry_mock.writes().is_empty());
    assert_eq!(mock.writes().len(), real.updated.len());
    assert!(
        dry.actions
            .iter()
            .all(|action| action.starts_with("[dry-run] Would update"))
    );
}

#[test]
fn test_pull_saves_a_config_that_is_in_sync() {
    let workdir = TestWorkdir::with_config(DRIFTED);
    let mock = MockTransport::platform();
    let local = LocalConfig::load(&workdir.config_path()).unwrap();

    let pulled = engine(&mock).pull(&local).unwrap();
    pulled.update_file(&workdir.config_path()).unwrap();

    let content = workdir.read_config();
    assert!(content.contains("max_connections = 60"), "{}", content);
    assert!(content.contains("pool_mode = \"transaction\""), "{}", content);

    let reloaded = LocalConfig::load(&workdir.config_path()).unwrap();
    assert_eq!(reloaded, pulled);

    mock.clear_requests();
    let drift = engine(&mock).diff(&reloaded).unwrap();
    assert!(!drift.has_drift(), "{}", drift.combined_diff());
    assert!(mock.writes().is_empty());
}

#[test]
fn test_empty_config_only_compares_postgres_settings() {
    let workdir = TestWorkdir::with_config("");
    let local = LocalConfig::load(&workdir.config_path()).unwrap();
    let mock = MockTransport::platform();

    let drift = engine(&mock).diff(&local).unwrap();

    assert!(!drift.has_drift());
    assert_eq!(
        drift.skipped,
        vec![
            "db.pooler",
            "db.network_restrictions",
            "db.ssl_enforcement",
            "storage"
        ]
    );
    assert_eq!(mock.requests().len(), 1);
}

#[test]
fn test_pull_keeps_content_hostctl_does_not_manage() {
    let workdir = TestWorkdir::with_config(
        r#"# my project
project_id = "abc"

[api]
port = 54321

[db]
major_version = 15

[db.settings]
max_connections = 100
"#,
    );
    let mock = MockTransport::platform();
    let local = LocalConfig::load(&workdir.config_path()).unwrap();

    let pulled = engine(&mock).pull(&local).unwrap();
    pulled.update_file(&workdir.config_path()).unwrap();

    let content = workdir.read_config();
    assert!(content.starts_with("# my project\n"), "{}", content);
    assert!(content.contains("[api]\nport = 54321"), "{}", content);
    assert!(content.contains("major_version = 15"), "{}", content);
    assert!(content.contains("max_connections = 60"), "{}", content);
    assert!(!content.contains("[storage]"), "{}", content);
}
