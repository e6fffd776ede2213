//! Error types for the splunkd client.
//!
//! Responsibilities:
//! - Define the concrete `ClientError` variants raised by transport, session and operations.
//! - Classify every variant into a `FailureKind` so callers can decide whether the
//!   session survives.
//!
//! Does NOT handle:
//! - Tearing the session down (see `session.rs`).
//! - User-facing wording beyond the `Display` impls below.
//!
//! Invariants:
//! - HTTP 401 is always an authentication failure, whichever variant carries it.
//! - Validation failures are raised before any network call is made.

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during splunkd client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// HTTP request error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// API error response from splunkd.
    #[error("API error ({status}) at {url}: {message}{}", .request_id.as_ref().map(|id| format!(" [Request ID: {id}]")).unwrap_or_default())]
    ApiError {
        status: u16,
        url: String,
        message: String,
        request_id: Option<String>,
    },

    /// Session key was rejected by the server.
    #[error("Session expired, please re-authenticate")]
    SessionExpired,

    /// Invalid response format from splunkd.
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// Request timed out.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Connection refused.
    #[error("Connection refused to {0}")]
    ConnectionRefused(String),

    /// TLS/SSL error.
    #[error("TLS error: {0}")]
    TlsError(String),

    /// Maximum retries exceeded.
    #[error("Maximum retries exceeded ({0} attempts)")]
    MaxRetriesExceeded(usize),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Local input was rejected before dispatch.
    #[error("Validation failed: {0}")]
    ValidationError(String),

    /// The server completed the round trip but refused the operation.
    #[error("Operation failed: {0}")]
    OperationFailed(String),

    /// The session has already been torn down.
    #[error("Not connected to splunkd")]
    NotConnected,
}

/// Failure taxonomy shared by every core operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Credentials rejected or session invalidated by the server.
    Authentication,
    /// DNS, socket or TLS level failure.
    Transport,
    /// Malformed local input; nothing was sent.
    Validation,
    /// The server reported a non-success result for a domain operation.
    Operation,
    /// Anything unclassified.
    Unknown,
}

impl FailureKind {
    /// Returns the string label for this failure kind.
    pub const fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Authentication => "authentication",
            FailureKind::Transport => "transport",
            FailureKind::Validation => "validation",
            FailureKind::Operation => "operation",
            FailureKind::Unknown => "unknown",
        }
    }

    /// Whether a failure of this kind invalidates the session it occurred on.
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            FailureKind::Authentication | FailureKind::Transport | FailureKind::Unknown
        )
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ClientError {
    /// Classify this error.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::AuthFailed(_) | Self::SessionExpired => FailureKind::Authentication,
            Self::ApiError { status: 401, .. } => FailureKind::Authentication,

            Self::ConnectionRefused(_)
            | Self::Timeout(_)
            | Self::TlsError(_)
            | Self::MaxRetriesExceeded(_) => FailureKind::Transport,
            Self::HttpError(e) => {
                if e.is_connect() || e.is_timeout() || e.is_request() || e.is_body() {
                    FailureKind::Transport
                } else {
                    FailureKind::Unknown
                }
            }

            Self::ValidationError(_) | Self::InvalidUrl(_) | Self::NotConnected => {
                FailureKind::Validation
            }

            Self::OperationFailed(_) => FailureKind::Operation,

            Self::ApiError { .. } | Self::InvalidResponse(_) => FailureKind::Unknown,
        }
    }

    /// Whether this error invalidates the session it occurred on.
    pub fn is_fatal_to_session(&self) -> bool {
        self.kind().is_fatal()
    }

    /// Check if an HTTP status code is retryable.
    ///
    /// Only 429 is retried by the transport; the 5xx gateway codes are
    /// reported here so callers can surface them as transient.
    pub fn is_retryable_status(status: u16) -> bool {
        matches!(status, 429 | 502 | 503 | 504)
    }

    /// Check if this error indicates authentication failure.
    pub fn is_auth_error(&self) -> bool {
        self.kind() == FailureKind::Authentication
    }

    /// HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            Self::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True when the server answered 404 for the requested resource.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(status: u16) -> ClientError {
        ClientError::ApiError {
            status,
            url: "https://localhost:8089/services/server/info".to_string(),
            message: "boom".to_string(),
            request_id: None,
        }
    }

    #[test]
    fn test_auth_variants_are_authentication() {
        assert_eq!(
            ClientError::AuthFailed("bad".to_string()).kind(),
            FailureKind::Authentication
        );
        assert_eq!(ClientError::SessionExpired.kind(), FailureKind::Authentication);
        assert_eq!(api_error(401).kind(), FailureKind::Authentication);
    }

    #[test]
    fn test_transport_variants() {
        assert_eq!(
            ClientError::Timeout(Duration::from_secs(1)).kind(),
            FailureKind::Transport
        );
        assert_eq!(
            ClientError::ConnectionRefused("localhost:8089".to_string()).kind(),
            FailureKind::Transport
        );
        assert_eq!(
            ClientError::TlsError("handshake".to_string()).kind(),
            FailureKind::Transport
        );
    }

    #[test]
    fn test_validation_and_operation_are_not_fatal() {
        let validation = ClientError::ValidationError("missing username".to_string());
        assert_eq!(validation.kind(), FailureKind::Validation);
        assert!(!validation.is_fatal_to_session());

        let operation = ClientError::OperationFailed("modified 0 key".to_string());
        assert_eq!(operation.kind(), FailureKind::Operation);
        assert!(!operation.is_fatal_to_session());
    }

    #[test]
    fn test_unclassified_errors_are_fatal() {
        assert_eq!(api_error(500).kind(), FailureKind::Unknown);
        assert!(api_error(500).is_fatal_to_session());
        assert!(ClientError::InvalidResponse("no entry".to_string()).is_fatal_to_session());
    }

    #[test]
    fn test_is_not_found() {
        assert!(api_error(404).is_not_found());
        assert!(!api_error(403).is_not_found());
        assert!(!ClientError::NotConnected.is_not_found());
    }

    #[test]
    fn test_is_retryable_status() {
        assert!(ClientError::is_retryable_status(429));
        assert!(ClientError::is_retryable_status(503));
        assert!(!ClientError::is_retryable_status(401));
        assert!(!ClientError::is_retryable_status(500));
    }

    #[test]
    fn test_api_error_display_includes_request_id() {
        let err = ClientError::ApiError {
            status: 400,
            url: "https://h:8089/x".to_string(),
            message: "ERROR: bad".to_string(),
            request_id: Some("abc".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "API error (400) at https://h:8089/x: ERROR: bad [Request ID: abc]"
        );
    }
}
