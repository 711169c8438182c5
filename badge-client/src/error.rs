//! Client error types

use reqwest::StatusCode;
use thiserror::Error;

/// Coarse classification of a failed remote call.
///
/// Operators see one message per workflow; the kind only reaches the logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Credential missing, invalid or expired (HTTP 401)
    Unauthorized,
    /// Requested employee or resource does not exist (HTTP 404)
    NotFound,
    /// No response was received
    Unreachable,
    /// A response arrived but was not the expected shape
    Malformed,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FailureKind::Unauthorized => "unauthorized",
            FailureKind::NotFound => "not_found",
            FailureKind::Unreachable => "unreachable",
            FailureKind::Malformed => "malformed",
        };
        f.write_str(s)
    }
}

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Transport-level failure, no response
    #[error("Server unreachable: {0}")]
    Unreachable(String),

    /// Invalid response format
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// Client could not be configured (bad base URL, TLS backend)
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Classify this error for diagnostics and recovery decisions.
    ///
    /// A configuration error means no request ever left the client, which
    /// callers treat like an unreachable server.
    pub fn kind(&self) -> FailureKind {
        match self {
            ClientError::Unauthorized => FailureKind::Unauthorized,
            ClientError::NotFound(_) => FailureKind::NotFound,
            ClientError::Unreachable(_) | ClientError::Config(_) => FailureKind::Unreachable,
            ClientError::Malformed(_) => FailureKind::Malformed,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized)
    }

    /// Map a non-success HTTP status to an error.
    ///
    /// Only 401 and 404 carry meaning here; any other status is a response
    /// that cannot be interpreted as the expected shape.
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
            StatusCode::NOT_FOUND => ClientError::NotFound(body),
            _ => ClientError::Malformed(format!("unexpected status {status}: {body}")),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return ClientError::from_status(status, err.to_string());
        }
        if err.is_decode() {
            ClientError::Malformed(err.to_string())
        } else if err.is_builder() {
            ClientError::Config(err.to_string())
        } else {
            ClientError::Unreachable(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Malformed(err.to_string())
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
