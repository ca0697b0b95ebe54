//! Error types for hostctl-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from hostctl-core
    #[error(transparent)]
    Core(#[from] hostctl_core::Error),

    /// Error from hostctl-config
    #[error(transparent)]
    Config(#[from] hostctl_config::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON output error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML output error
    #[error(transparent)]
    Toml(#[from] toml::ser::Error),

    /// Invalid `RUST_LOG` directive
    #[error("invalid log filter: {0}")]
    LogFilter(#[from] tracing_subscriber::filter::ParseError),

    /// A global subscriber was already installed
    #[error("failed to initialise logging: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),

    /// The blocking worker panicked or was aborted
    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_error_displays_message() {
        let err = CliError::user("missing project ref");
        assert_eq!(err.to_string(), "missing project ref");
    }

    #[test]
    fn core_error_is_transparent() {
        let err = CliError::from(hostctl_core::Error::InvalidCidr {
            cidr: "10.0.0.1".to_string(),
        });
        assert_eq!(err.to_string(), "invalid CIDR block: '10.0.0.1'");
    }
}
