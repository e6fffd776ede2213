//! Authenticated session with one splunkd instance.
//!
//! Responsibilities:
//! - Validating credentials before any network call
//! - Logging in and resolving the instance identity at connect time
//! - Liveness probing and teardown on fatal failures
//!
//! Does NOT handle:
//! - Snapshot polling (see [`crate::poller`]), ad-hoc queries (see [`crate::adhoc`])
//!   or domain operations (see [`crate::operations`]); those extend [`Session`] in their own modules
//!
//! Invariants:
//! - A session owns its transport exclusively; `&mut self` on every network operation
//!   rules out overlapping calls
//! - Once torn down the transport is gone for good: every later call fails with
//!   `NotConnected` and a new session must be opened

use std::fmt;

use secrecy::SecretString;
use serde::Serialize;
use splunkd_config::constants::DEFAULT_SPLUNK_PORT;
use tracing::{debug, info, warn};

use crate::endpoints;
use crate::error::{ClientError, FailureKind, Result};
use crate::metrics::MetricsCollector;
use crate::models::InstanceIdentity;
use crate::transport::{ConnectOptions, Transport};

/// Login details for one instance.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(
        host: impl Into<String>,
        port: u16,
        username: impl Into<String>,
        password: SecretString,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            username: username.into(),
            password,
        }
    }

    /// Parse `host` or `host:port` (default port 8089).
    ///
    /// # Errors
    ///
    /// Returns `ClientError::ValidationError` for a non-numeric or out-of-range port.
    pub fn from_address(
        address: &str,
        username: impl Into<String>,
        password: SecretString,
    ) -> Result<Self> {
        let address = address.trim();
        let (host, port) = match address.rsplit_once(':') {
            Some((host, port)) => {
                let port = port
                    .parse::<u32>()
                    .ok()
                    .filter(|p| (1..=65_535).contains(p))
                    .ok_or_else(|| {
                        ClientError::ValidationError(format!(
                            "Invalid port '{port}' in address '{address}' (expected 1-65535)"
                        ))
                    })?;
                (host, port as u16)
            }
            None => (address, DEFAULT_SPLUNK_PORT),
        };
        Ok(Self::new(host, port, username, password))
    }

    /// # Errors
    ///
    /// Returns `ClientError::ValidationError` if any field is blank or the port is zero.
    pub fn validate(&self) -> Result<()> {
        use secrecy::ExposeSecret;

        let blank = [
            ("host", self.host.trim().is_empty()),
            ("username", self.username.trim().is_empty()),
            ("password", self.password.expose_secret().trim().is_empty()),
        ];
        if let Some((name, _)) = blank.iter().find(|(_, is_blank)| *is_blank) {
            return Err(ClientError::ValidationError(format!("{name} must not be empty")));
        }
        if self.port == 0 {
            return Err(ClientError::ValidationError(
                "port must be between 1 and 65535".to_string(),
            ));
        }
        Ok(())
    }

    /// `host:port`.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host.trim(), self.port)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionState {
    Disconnected,
    Connected,
    /// A poll is in progress.
    Polling,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Disconnected => "disconnected",
            Self::Connected => "connected",
            Self::Polling => "polling",
        })
    }
}

/// One authenticated connection plus the identity resolved when it opened.
#[derive(Debug)]
pub struct Session {
    credentials: Credentials,
    transport: Option<Transport>,
    identity: InstanceIdentity,
    state: SessionState,
    metrics: Option<MetricsCollector>,
}

impl Session {
    /// Validate, log in and fetch the instance identity.
    ///
    /// # Errors
    ///
    /// Validation failures are returned before any request is sent. Login and
    /// identity failures are returned as-is; no session is created.
    pub async fn connect(credentials: Credentials, options: ConnectOptions) -> Result<Self> {
        credentials.validate()?;

        let mut transport = Transport::open(&credentials.host, credentials.port, &options)?;
        transport
            .login(&credentials.username, &credentials.password)
            .await?;
        let identity = InstanceIdentity::from(endpoints::get_server_info(&transport).await?);

        info!(
            address = %credentials.address(),
            server = %identity.server_name,
            version = %identity.version,
            "Connected to splunkd"
        );

        Ok(Self {
            credentials,
            transport: Some(transport),
            identity,
            state: SessionState::Connected,
            metrics: options.metrics,
        })
    }

    /// Release the transport. Calling this on a disconnected session does nothing.
    pub fn disconnect(&mut self) {
        if let Some(mut transport) = self.transport.take() {
            transport.release();
            info!(address = %self.credentials.address(), "Disconnected from splunkd");
            if let Some(m) = &self.metrics {
                m.record_teardown(None);
            }
        }
        self.state = SessionState::Disconnected;
    }

    /// Authenticated probe of `/services/server/settings`.
    ///
    /// Returns `Ok(false)` without I/O when already disconnected, and `Ok(false)`
    /// after tearing down when the probe fails authentication.
    ///
    /// # Errors
    ///
    /// Transport and other session-fatal failures tear the session down and are returned.
    pub async fn is_live(&mut self) -> Result<bool> {
        let Some(transport) = self.transport.as_ref() else {
            return Ok(false);
        };

        match endpoints::get_server_settings(transport).await {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == FailureKind::Authentication => {
                self.teardown(&e);
                Ok(false)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.transport.is_some()
    }

    pub fn identity(&self) -> &InstanceIdentity {
        &self.identity
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub(crate) fn set_identity(&mut self, identity: InstanceIdentity) {
        self.identity = identity;
    }

    pub(crate) fn set_state(&mut self, state: SessionState) {
        if self.transport.is_some() {
            self.state = state;
        }
    }

    pub(crate) fn metrics(&self) -> Option<&MetricsCollector> {
        self.metrics.as_ref()
    }

    pub(crate) fn transport(&self) -> Result<&Transport> {
        self.transport.as_ref().ok_or(ClientError::NotConnected)
    }

    /// Probe liveness, failing when the session is gone.
    pub(crate) async fn require_live(&mut self) -> Result<()> {
        if self.transport.is_none() {
            return Err(ClientError::NotConnected);
        }
        if self.is_live().await? {
            Ok(())
        } else {
            Err(ClientError::SessionExpired)
        }
    }

    /// Tear down on session-fatal errors, then hand the error back.
    pub(crate) fn fail(&mut self, error: ClientError) -> ClientError {
        if error.is_fatal_to_session() {
            self.teardown(&error);
        }
        error
    }

    pub(crate) fn teardown(&mut self, cause: &ClientError) {
        if let Some(mut transport) = self.transport.take() {
            transport.release();
            warn!(
                address = %self.credentials.address(),
                kind = %cause.kind(),
                error = %cause,
                "Session torn down"
            );
            if let Some(m) = &self.metrics {
                m.record_teardown(Some(cause.kind()));
            }
        } else {
            debug!("Teardown requested on a disconnected session");
        }
        self.state = SessionState::Disconnected;
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.disconnect();
    }
}
