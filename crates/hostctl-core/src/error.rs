//! Error types for hostctl-core

/// Result type for hostctl-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reconciling configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A `key=value` override could not be split into exactly two parts
    #[error("expected config value in key=value format, received: '{entry}'")]
    InvalidOverride { entry: String },

    /// A network restriction entry is not a valid CIDR block
    #[error("invalid CIDR block: '{cidr}'")]
    InvalidCidr { cidr: String },

    // Transparent wrappers for underlying crate errors
    /// Management API error from hostctl-api
    #[error(transparent)]
    Api(#[from] hostctl_api::Error),

    /// Canonical form error from hostctl-diff
    #[error(transparent)]
    Diff(#[from] hostctl_diff::Error),
}
