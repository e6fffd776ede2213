//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map ClientError variants to appropriate exit codes.
//! - Produce the user-facing message for an error, including the teardown notice.
//!
//! Does NOT handle:
//! - Signal handling (see `commands::watch` for SIGINT handling).
//!
//! Invariants:
//! - Exit codes 1-9 are reserved for specific error categories.
//! - Exit code 130 is reserved for SIGINT (Unix standard: 128 + SIGINT).

use splunkd_client::{ClientError, FailureKind};

/// Printed when a session is torn down because splunkd stopped accepting it.
pub const CONNECTION_RESET: &str = "Splunk connection reset";

/// Structured exit codes for splunkd-cli.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// Authentication failure - rejected credentials or expired session.
    ///
    /// Scripts should refresh credentials or prompt for re-authentication.
    AuthenticationFailed = 2,

    /// Connection error - network, timeout, or TLS failure.
    ///
    /// Scripts may retry with exponential backoff.
    ConnectionError = 3,

    /// Resource not found - unknown endpoint or configuration file.
    NotFound = 4,

    /// Validation error - blank credentials, malformed URI, bad parameters.
    ///
    /// Scripts should fix the input and not retry the same request.
    ValidationError = 5,

    /// Permission denied - insufficient capabilities.
    PermissionDenied = 6,

    /// Rate limited - HTTP 429 after retries were exhausted.
    ///
    /// Scripts should back off and retry later.
    RateLimited = 7,

    /// Service unavailable - HTTP 502/503/504.
    ServiceUnavailable = 8,

    /// Interrupted - SIGINT/Ctrl+C (Unix standard: 128 + 2).
    Interrupted = 130,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ClientError> for ExitCode {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::ApiError { status, .. } => match status {
                401 => ExitCode::AuthenticationFailed,
                403 => ExitCode::PermissionDenied,
                404 => ExitCode::NotFound,
                400 => ExitCode::ValidationError,
                429 => ExitCode::RateLimited,
                502..=504 => ExitCode::ServiceUnavailable,
                _ => ExitCode::GeneralError,
            },
            ClientError::MaxRetriesExceeded(_) => ExitCode::RateLimited,
            other => match other.kind() {
                FailureKind::Authentication => ExitCode::AuthenticationFailed,
                FailureKind::Transport => ExitCode::ConnectionError,
                FailureKind::Validation => ExitCode::ValidationError,
                FailureKind::Operation | FailureKind::Unknown => ExitCode::GeneralError,
            },
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Returns ExitCode::GeneralError if no ClientError is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        if self.is::<Cancelled>() {
            return ExitCode::Interrupted;
        }
        client_error(self).map_or(ExitCode::GeneralError, ExitCode::from)
    }
}

fn client_error(err: &anyhow::Error) -> Option<&ClientError> {
    err.chain().find_map(|cause| cause.downcast_ref::<ClientError>())
}

/// Message printed on stderr for a failed command.
pub fn describe(err: &anyhow::Error) -> String {
    match client_error(err) {
        Some(client_err) if client_err.kind() == FailureKind::Authentication => {
            format!("{CONNECTION_RESET}: {err:#}")
        }
        _ => format!("{err:#}"),
    }
}

/// Marker error used to indicate user-driven cancellation.
#[derive(Debug, Clone, Copy, thiserror::Error)]
#[error("cancelled")]
pub struct Cancelled;

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(status: u16) -> ClientError {
        ClientError::ApiError {
            status,
            url: "https://localhost:8089/services/server/settings".to_string(),
            message: "boom".to_string(),
            request_id: None,
        }
    }

    #[test]
    fn test_exit_code_as_i32() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::GeneralError.as_i32(), 1);
        assert_eq!(ExitCode::AuthenticationFailed.as_i32(), 2);
        assert_eq!(ExitCode::Interrupted.as_i32(), 130);
    }

    #[test]
    fn test_from_client_error_by_kind() {
        assert_eq!(
            ExitCode::from(&ClientError::AuthFailed("Login failed".into())),
            ExitCode::AuthenticationFailed
        );
        assert_eq!(
            ExitCode::from(&ClientError::SessionExpired),
            ExitCode::AuthenticationFailed
        );
        assert_eq!(
            ExitCode::from(&ClientError::ConnectionRefused("localhost:1".into())),
            ExitCode::ConnectionError
        );
        assert_eq!(
            ExitCode::from(&ClientError::ValidationError("password must not be empty".into())),
            ExitCode::ValidationError
        );
        assert_eq!(ExitCode::from(&ClientError::NotConnected), ExitCode::ValidationError);
        assert_eq!(
            ExitCode::from(&ClientError::OperationFailed("modified 0 key(s)".into())),
            ExitCode::GeneralError
        );
    }

    #[test]
    fn test_from_api_error_status() {
        assert_eq!(ExitCode::from(&api_error(401)), ExitCode::AuthenticationFailed);
        assert_eq!(ExitCode::from(&api_error(403)), ExitCode::PermissionDenied);
        assert_eq!(ExitCode::from(&api_error(404)), ExitCode::NotFound);
        assert_eq!(ExitCode::from(&api_error(429)), ExitCode::RateLimited);
        assert_eq!(ExitCode::from(&api_error(503)), ExitCode::ServiceUnavailable);
        assert_eq!(ExitCode::from(&api_error(500)), ExitCode::GeneralError);
    }

    #[test]
    fn test_max_retries_is_rate_limited() {
        assert_eq!(
            ExitCode::from(&ClientError::MaxRetriesExceeded(3)),
            ExitCode::RateLimited
        );
    }

    #[test]
    fn test_exit_code_ext_searches_chain() {
        let err = anyhow::Error::new(ClientError::SessionExpired).context("Poll failed");
        assert_eq!(err.exit_code(), ExitCode::AuthenticationFailed);
        assert_eq!(anyhow::anyhow!("plain").exit_code(), ExitCode::GeneralError);
        assert_eq!(anyhow::Error::new(Cancelled).exit_code(), ExitCode::Interrupted);
    }

    #[test]
    fn test_describe_prefixes_connection_reset_for_auth() {
        let err = anyhow::Error::new(ClientError::SessionExpired);
        assert!(describe(&err).starts_with(CONNECTION_RESET));

        let err = anyhow::Error::new(api_error(500));
        assert!(!describe(&err).contains(CONNECTION_RESET));
    }
}
