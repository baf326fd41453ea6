//! Error types for the todosync crate.

/// Top-level error type for the sync client and its operational helpers.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The endpoint rejected the current session token.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The endpoint returned an error that is not an authorization failure.
    #[error("remote error: {0}")]
    Remote(String),

    /// Transport-level HTTP failure (connection, TLS, request build).
    #[error("HTTP error: {0}")]
    Http(String),

    /// Response body could not be parsed into the expected envelope shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Session persistence error (reading or writing the stored session).
    #[error("session error: {0}")]
    Session(String),

    /// Operator notification error (email build or delivery).
    #[error("notify error: {0}")]
    Notify(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, SyncError>;
