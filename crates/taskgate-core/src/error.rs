//! Shared error type across taskgate crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed body.
    BadRequest,
    /// Startup configuration rejected.
    InvalidConfig,
    /// Unsupported config schema version.
    UnsupportedVersion,
    /// Service cannot admit work right now.
    Unavailable,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in logs and responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::InvalidConfig => "INVALID_CONFIG",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Unavailable => "UNAVAILABLE",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, TaskGateError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum TaskGateError {
    /// Body was not a valid task document. The display text is what clients see.
    #[error("Invalid JSON")]
    InvalidJson(#[source] serde_json::Error),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("admission gate closed")]
    GateClosed,
    #[error("internal: {0}")]
    Internal(String),
}

impl TaskGateError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            TaskGateError::InvalidJson(_) => ClientCode::BadRequest,
            TaskGateError::InvalidConfig(_) => ClientCode::InvalidConfig,
            TaskGateError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            TaskGateError::GateClosed => ClientCode::Unavailable,
            TaskGateError::Internal(_) => ClientCode::Internal,
        }
    }
}
