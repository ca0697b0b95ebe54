//! `[db]` sections: Postgres tuning, pooler, network restrictions, SSL

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use hostctl_diff::CanonicalForm;

use crate::gate::{Gate, GatePolicy, Gated};
use crate::{Error, Result};

/// Defines a closed set of lowercase string values with serde support
macro_rules! choice_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALLOWED: &'static [&'static str] = &[$($text),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(Error::InvalidChoice {
                        value: s.to_string(),
                        allowed: Self::ALLOWED,
                    }),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = Error;

            fn try_from(value: String) -> Result<Self> {
                value.parse()
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }
    };
}

choice_enum! {
    /// Connection pooler mode
    PoolMode {
        Transaction => "transaction",
        Session => "session",
    }
}

choice_enum! {
    /// Postgres `session_replication_role`
    SessionReplicationRole {
        Origin => "origin",
        Replica => "replica",
        Local => "local",
    }
}

/// Header prepended when rendering settings for `postgresql.conf`
pub const PG_CONF_HEADER: &str = "\n# hostctl [db.settings] configuration\n";

/// `[db.settings]`: Postgres tuning parameters.
///
/// Every field is optional. A field left unset expresses no opinion and is
/// never sent to the platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostgresSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_cache_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logical_decoding_work_mem: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_work_mem: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_connections: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_locks_per_transaction: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_parallel_maintenance_workers: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_parallel_workers: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_parallel_workers_per_gather: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_replication_slots: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_slot_wal_keep_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_standby_archive_delay: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_standby_streaming_delay: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_wal_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_wal_senders: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_worker_processes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_replication_role: Option<SessionReplicationRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_buffers: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statement_timeout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_activity_query_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_commit_timestamp: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wal_keep_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wal_sender_timeout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_mem: Option<String>,
}

impl PostgresSettings {
    /// Whether no parameter has been set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Render the settings as a block to append to `postgresql.conf`.
    ///
    /// The settings are flat, so their TOML form is already valid conf
    /// syntax once double quotes become single quotes.
    pub fn to_postgres_conf(&self) -> Result<String> {
        let body = toml::to_string(self)?;
        Ok(format!("{}{}", PG_CONF_HEADER, body.replace('"', "'")))
    }
}

impl CanonicalForm for PostgresSettings {
    const SECTION: &'static str = "db.settings";
}

/// `[db.pooler]`: connection pooler limits
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pooler {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pool_mode: Option<PoolMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_pool_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_client_conn: Option<u32>,
}

impl Gated for Pooler {
    const SECTION: &'static str = "db.pooler";
    const POLICY: GatePolicy = GatePolicy::FlagGated;
}

/// `[db.network_restrictions]`: CIDR allow lists for database access
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkRestrictions {
    #[serde(default)]
    pub allowed_cidrs: Vec<String>,
    #[serde(default)]
    pub allowed_cidrs_v6: Vec<String>,
}

impl Gated for NetworkRestrictions {
    const SECTION: &'static str = "db.network_restrictions";
    const POLICY: GatePolicy = GatePolicy::FlagGated;
}

/// `[db.ssl_enforcement]`: only the `enabled` flag
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SslEnforcement {}

impl Gated for SslEnforcement {
    const SECTION: &'static str = "db.ssl_enforcement";
    const POLICY: GatePolicy = GatePolicy::PresenceGated;
}

/// `[db]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Db {
    #[serde(default)]
    pub settings: PostgresSettings,
    #[serde(default, skip_serializing_if = "Gate::is_unmanaged")]
    pub pooler: Gate<Pooler>,
    #[serde(default, skip_serializing_if = "Gate::is_unmanaged")]
    pub network_restrictions: Gate<NetworkRestrictions>,
    #[serde(default, skip_serializing_if = "Gate::is_unmanaged")]
    pub ssl_enforcement: Gate<SslEnforcement>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_mode_rejects_unknown() {
        let err = "statement".parse::<PoolMode>().unwrap_err();
        assert_eq!(err.to_string(), r#"must be one of ["transaction", "session"]"#);
    }

    #[test]
    fn test_replication_role_round_trip() {
        for role in ["origin", "replica", "local"] {
            let parsed: SessionReplicationRole = role.parse().unwrap();
            assert_eq!(parsed.to_string(), role);
        }
    }

    #[test]
    fn test_postgres_conf_uses_single_quotes() {
        let settings = PostgresSettings {
            max_connections: Some(100),
            statement_timeout: Some("10s".into()),
            ..Default::default()
        };
        let conf = settings.to_postgres_conf().unwrap();
        assert!(conf.starts_with(PG_CONF_HEADER));
        assert!(conf.contains("max_connections = 100\n"));
        assert!(conf.contains("statement_timeout = '10s'\n"));
        assert!(!conf.contains('"'));
    }

    #[test]
    fn test_empty_settings() {
        assert!(PostgresSettings::default().is_empty());
        let settings = PostgresSettings {
            work_mem: Some("4MB".into()),
            ..Default::default()
        };
        assert!(!settings.is_empty());
    }

    #[test]
    fn test_ssl_enforcement_section_parses() {
        let db: Db = toml::from_str("[ssl_enforcement]\nenabled = true\n").unwrap();
        assert_eq!(db.ssl_enforcement, Gate::Enabled(SslEnforcement {}));
        assert!(db.ssl_enforcement.is_managed());
    }
}
