//! Request and response shapes of the management API
//!
//! Responses mirror what the platform returns. Update bodies skip every
//! field left as `None`, so a body only ever carries values the caller set.

use serde::{Deserialize, Serialize};

/// `GET /v1/projects/{ref}/config/database/postgres`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostgresConfigResponse {
    #[serde(default)]
    pub effective_cache_size: Option<String>,
    #[serde(default)]
    pub logical_decoding_work_mem: Option<String>,
    #[serde(default)]
    pub maintenance_work_mem: Option<String>,
    #[serde(default)]
    pub max_connections: Option<i64>,
    #[serde(default)]
    pub max_locks_per_transaction: Option<i64>,
    #[serde(default)]
    pub max_parallel_maintenance_workers: Option<i64>,
    #[serde(default)]
    pub max_parallel_workers: Option<i64>,
    #[serde(default)]
    pub max_parallel_workers_per_gather: Option<i64>,
    #[serde(default)]
    pub max_replication_slots: Option<i64>,
    #[serde(default)]
    pub max_slot_wal_keep_size: Option<String>,
    #[serde(default)]
    pub max_standby_archive_delay: Option<String>,
    #[serde(default)]
    pub max_standby_streaming_delay: Option<String>,
    #[serde(default)]
    pub max_wal_size: Option<String>,
    #[serde(default)]
    pub max_wal_senders: Option<i64>,
    #[serde(default)]
    pub max_worker_processes: Option<i64>,
    #[serde(default)]
    pub session_replication_role: Option<String>,
    #[serde(default)]
    pub shared_buffers: Option<String>,
    #[serde(default)]
    pub statement_timeout: Option<String>,
    #[serde(default)]
    pub track_activity_query_size: Option<String>,
    #[serde(default)]
    pub track_commit_timestamp: Option<bool>,
    #[serde(default)]
    pub wal_keep_size: Option<String>,
    #[serde(default)]
    pub wal_sender_timeout: Option<String>,
    #[serde(default)]
    pub work_mem: Option<String>,
}

/// `PUT /v1/projects/{ref}/config/database/postgres`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePostgresConfigBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_cache_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logical_decoding_work_mem: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_work_mem: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_connections: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_locks_per_transaction: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_parallel_maintenance_workers: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_parallel_workers: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_parallel_workers_per_gather: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_replication_slots: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_slot_wal_keep_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_standby_archive_delay: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_standby_streaming_delay: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_wal_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_wal_senders: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_worker_processes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_replication_role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_buffers: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statement_timeout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_activity_query_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_commit_timestamp: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wal_keep_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wal_sender_timeout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_mem: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restart_database: Option<bool>,
}

/// `GET /v1/projects/{ref}/config/database/pooler`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolerConfigResponse {
    #[serde(default)]
    pub pool_mode: Option<String>,
    #[serde(default)]
    pub default_pool_size: Option<i64>,
    #[serde(default)]
    pub max_client_conn: Option<i64>,
}

/// `PATCH /v1/projects/{ref}/config/database/pooler`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePoolerConfigBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_pool_size: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_client_conn: Option<i32>,
}

/// CIDR allow lists as the platform names them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkRestrictionsConfig {
    #[serde(default)]
    pub db_allowed_cidrs: Vec<String>,
    #[serde(default, rename = "dbAllowedCidrsV6")]
    pub db_allowed_cidrs_v6: Vec<String>,
}

/// `GET /v1/projects/{ref}/network-restrictions`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkRestrictionsResponse {
    #[serde(default)]
    pub config: NetworkRestrictionsConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// `POST /v1/projects/{ref}/network-restrictions/apply`
pub type UpdateNetworkRestrictionsBody = NetworkRestrictionsConfig;

/// Per-surface SSL enforcement flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SslEnforcements {
    pub database: bool,
}

/// `GET /v1/projects/{ref}/ssl-enforcement`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SslEnforcementResponse {
    pub current_config: SslEnforcements,
    #[serde(default)]
    pub applied_successfully: bool,
}

impl SslEnforcementResponse {
    /// Whether database connections are actually required to use SSL
    pub fn is_enforced(&self) -> bool {
        self.current_config.database && self.applied_successfully
    }
}

/// `PUT /v1/projects/{ref}/ssl-enforcement`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSslEnforcementBody {
    pub requested_config: SslEnforcements,
}

/// A feature that is only switched on or off
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureToggle {
    pub enabled: bool,
}

/// Iceberg catalog feature of analytics buckets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IcebergCatalog {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_namespaces: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tables: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_catalogs: Option<i64>,
}

/// Vector buckets feature
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorBucketsFeature {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_buckets: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_indexes: Option<i64>,
}

/// Feature blocks of the storage config. In responses every block the
/// platform knows about is present; in update bodies only the blocks being
/// changed are sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageFeatures {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_transformation: Option<FeatureToggle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3_protocol: Option<FeatureToggle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iceberg_catalog: Option<IcebergCatalog>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vector_buckets: Option<VectorBucketsFeature>,
}

impl StorageFeatures {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// `GET /v1/projects/{ref}/config/storage`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageConfigResponse {
    pub file_size_limit: i64,
    #[serde(default)]
    pub features: StorageFeatures,
}

/// `PATCH /v1/projects/{ref}/config/storage`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStorageConfigBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size_limit: Option<i64>,
    #[serde(skip_serializing_if = "StorageFeatures::is_empty")]
    pub features: StorageFeatures,
}
