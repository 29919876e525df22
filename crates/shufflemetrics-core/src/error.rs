//! Shared error type across shufflemetrics crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / contract violation by the caller.
    BadRequest,
    /// Requested view does not exist.
    NotFound,
    /// Lifecycle call made in the wrong state.
    Conflict,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::NotFound => "NOT_FOUND",
            ClientCode::Conflict => "CONFLICT",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MetricsError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("unknown scope: {0}")]
    UnknownScope(String),
    #[error("negative delta {delta} for monotonic counter {family}")]
    NegativeDelta { family: &'static str, delta: i64 },
    #[error("{family} expects {expected} label values, got {got}")]
    LabelArity {
        family: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("label value {value:?} is reserved in {family}")]
    ReservedLabel {
        family: &'static str,
        value: &'static str,
    },
    #[error("registry already initialized")]
    AlreadyInitialized,
    #[error("registry not initialized")]
    NotInitialized,
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl MetricsError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            MetricsError::UnknownScope(_) => ClientCode::NotFound,
            MetricsError::NegativeDelta { .. }
            | MetricsError::LabelArity { .. }
            | MetricsError::ReservedLabel { .. }
            | MetricsError::BadRequest(_) => ClientCode::BadRequest,
            MetricsError::AlreadyInitialized | MetricsError::NotInitialized => ClientCode::Conflict,
            MetricsError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            MetricsError::Internal(_) => ClientCode::Internal,
        }
    }
}
