//! Local configuration schema for hostctl
//!
//! `config.toml` declares the desired state of a hosted project. Each
//! subsystem lives in its own section and is reconciled independently:
//!
//! - `[db.settings]` - Postgres tuning parameters, every key optional
//! - `[db.pooler]`, `[db.network_restrictions]` - switched by `enabled`
//! - `[db.ssl_enforcement]` - managed whenever present
//! - `[storage]` - upload limits and feature toggles
//!
//! Optional sections are wrapped in [`Gate`], which records whether the
//! section was written at all and whether it is switched on.

pub mod db;
pub mod error;
pub mod gate;
pub mod local;
pub mod size;
pub mod storage;

pub use db::{
    Db, NetworkRestrictions, PG_CONF_HEADER, PoolMode, Pooler, PostgresSettings,
    SessionReplicationRole, SslEnforcement,
};
pub use error::{Error, Result};
pub use gate::{Gate, GatePolicy, Gated};
pub use local::{CONFIG_DIR, CONFIG_FILE, LocalConfig};
pub use size::SizeInBytes;
pub use storage::{
    AnalyticsBucket, AnalyticsBuckets, Bucket, ImageTransformation, S3Protocol, Storage,
    VectorBucket, VectorBuckets,
};
