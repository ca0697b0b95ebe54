//! Error types for hostctl-diff

/// Result type for hostctl-diff operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while canonicalizing a record
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The record did not serialize to a table (e.g. a bare scalar)
    #[error("Canonical form requires a table, got {kind}")]
    NotATable { kind: &'static str },

    /// TOML serialization error
    #[error(transparent)]
    TomlSer(#[from] toml::ser::Error),
}
