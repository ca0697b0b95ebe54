//! Error types for hostctl-api

/// Result type for hostctl-api operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while talking to the management API
///
/// `operation` names what was being attempted, e.g. `update Postgres config`,
/// so messages read as `failed to update Postgres config: ...`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request never produced a response
    #[error("failed to {operation}: {message}")]
    Transport {
        operation: &'static str,
        message: String,
    },

    /// The platform answered with a status other than the expected one
    #[error("unexpected {operation} status {status}: {body}")]
    UnexpectedStatus {
        operation: &'static str,
        status: u16,
        body: String,
    },

    /// The caller cancelled before the request completed
    #[error("{operation} cancelled")]
    Cancelled { operation: &'static str },

    /// The response body did not match the expected shape
    #[error("failed to decode {operation} response: {source}")]
    Decode {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Request body could not be encoded
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether the error came from cancellation rather than the platform
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled { .. })
    }
}
