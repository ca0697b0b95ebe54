//! Error types for hostctl-config

use std::path::PathBuf;

/// Result type for hostctl-config operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or rendering local configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration file not found at expected path
    #[error("Configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// A size string such as `50MiB` could not be parsed
    #[error("Invalid size: '{value}'")]
    InvalidSize { value: String },

    /// An enumerated setting had a value outside its allowed set
    #[error("must be one of {allowed:?}")]
    InvalidChoice {
        value: String,
        allowed: &'static [&'static str],
    },

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization error
    #[error(transparent)]
    TomlSer(#[from] toml::ser::Error),

    /// `config.toml` could not be parsed for in-place editing
    #[error(transparent)]
    TomlEdit(#[from] toml_edit::TomlError),
}
