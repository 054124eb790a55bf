/// Unified error types for the MoveDID resolver
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Class of transport failure reported by a ledger client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// Connection, TLS or unexpected HTTP status
    Network,
    /// Response body could not be decoded into the expected shape
    Serialization,
    /// Request aborted by a deadline or caller cancellation
    Cancelled,
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TransportKind::Network => "network",
            TransportKind::Serialization => "serialization",
            TransportKind::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// Main error type for the resolver
#[derive(Error, Debug)]
pub enum ResolverError {
    /// Malformed or missing address input
    #[error("Invalid input: {0}")]
    Input(String),

    /// Expected resource or table entry is absent on the ledger
    #[error("Not found: {0}")]
    NotFound(String),

    /// Ledger client failed to complete a request
    #[error("Ledger transport error ({kind}): {message}")]
    Transport {
        kind: TransportKind,
        message: String,
    },

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Server bootstrap errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResolverError {
    pub fn network(message: impl Into<String>) -> Self {
        ResolverError::Transport {
            kind: TransportKind::Network,
            message: message.into(),
        }
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        ResolverError::Transport {
            kind: TransportKind::Serialization,
            message: message.into(),
        }
    }

    pub fn cancelled(message: impl Into<String>) -> Self {
        ResolverError::Transport {
            kind: TransportKind::Cancelled,
            message: message.into(),
        }
    }

    /// Short label used for metrics and error bodies
    pub fn code(&self) -> &'static str {
        match self {
            ResolverError::Input(_) => "InvalidInput",
            ResolverError::NotFound(_) => "NotFound",
            ResolverError::Transport {
                kind: TransportKind::Cancelled,
                ..
            } => "Timeout",
            ResolverError::Transport { .. } => "LedgerUnavailable",
            ResolverError::Config(_) | ResolverError::Internal(_) => "InternalServerError",
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Convert ResolverError to HTTP response
impl IntoResponse for ResolverError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ResolverError::Input(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ResolverError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ResolverError::Transport {
                kind: TransportKind::Cancelled,
                ..
            } => (StatusCode::GATEWAY_TIMEOUT, self.to_string()),
            ResolverError::Transport { .. } => (StatusCode::BAD_GATEWAY, self.to_string()),
            ResolverError::Config(_) | ResolverError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(), // Don't leak details
            ),
        };

        let body = Json(ErrorResponse {
            error: self.code().to_string(),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for resolver operations
pub type ResolverResult<T> = Result<T, ResolverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ResolverError::Input("bad".into()), StatusCode::BAD_REQUEST),
            (ResolverError::NotFound("gone".into()), StatusCode::NOT_FOUND),
            (ResolverError::network("refused"), StatusCode::BAD_GATEWAY),
            (ResolverError::serialization("eof"), StatusCode::BAD_GATEWAY),
            (ResolverError::cancelled("deadline"), StatusCode::GATEWAY_TIMEOUT),
            (ResolverError::Internal("bind".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_transport_display_includes_kind() {
        let err = ResolverError::cancelled("resolution exceeded 30s");
        assert_eq!(
            err.to_string(),
            "Ledger transport error (cancelled): resolution exceeded 30s"
        );
        assert_eq!(err.code(), "Timeout");
    }
}
