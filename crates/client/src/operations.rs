//! Domain operations on a live session.
//!
//! Responsibilities:
//! - Restarting splunkd
//! - Pointing the deployment client at a new server (or disabling it), then restarting
//! - Reloading every refreshable admin endpoint
//! - Dumping a configuration file as `.conf` text
//!
//! Invariants:
//! - Every operation probes liveness first and fails without side effects on a dead session
//! - A restart always ends the session, whatever its outcome
//! - splunkd refusing a request is an `OperationFailed`; only authentication and
//!   transport failures end the session

use std::fmt;

use serde::Serialize;
use tracing::{info, warn};

use crate::endpoints;
use crate::error::{ClientError, FailureKind, Result};
use crate::models::{MessageType, SplunkMessages};
use crate::session::Session;

/// Outcome of reloading one admin endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReloadOutcome {
    pub endpoint: String,
    /// `None` when the reload succeeded.
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReloadReport {
    pub outcomes: Vec<ReloadOutcome>,
}

impl ReloadReport {
    pub fn failures(&self) -> impl Iterator<Item = &ReloadOutcome> {
        self.outcomes.iter().filter(|o| o.error.is_some())
    }

    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none()
    }
}

impl fmt::Display for ReloadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for outcome in &self.outcomes {
            match &outcome.error {
                None => writeln!(f, "Refreshing {:<39} OK", outcome.endpoint)?,
                Some(error) => writeln!(f, "Refreshing {:<42} {}", outcome.endpoint, error)?,
            }
        }
        f.write_str("DONE")
    }
}

/// Accept a deployment-client edit only when splunkd reports an INFO message
/// that actually changed something.
fn check_deployment_result(messages: &SplunkMessages) -> Result<()> {
    let Some(message) = messages.messages.first() else {
        return Err(ClientError::OperationFailed(
            "splunkd returned no status message for the deployment client change".to_string(),
        ));
    };
    if message.message_type != MessageType::Info {
        return Err(ClientError::OperationFailed(format!(
            "Error while modifying deployment server URI: {}",
            message.text
        )));
    }
    if message.text.contains("modified 0 key") {
        return Err(ClientError::OperationFailed(format!(
            "splunkd reports no changes made to deployment server URI: {}",
            message.text
        )));
    }
    Ok(())
}

/// Render `(key, value)` pairs of each stanza as `.conf` text, dropping `eai:` keys.
fn render_conf(stanzas: &[(String, Vec<(String, String)>)]) -> String {
    let mut out = String::new();
    for (stanza, keys) in stanzas {
        out.push_str(&format!("[{stanza}]\n"));
        let mut lines: Vec<String> = keys
            .iter()
            .filter(|(key, _)| !key.starts_with("eai:"))
            .map(|(key, value)| format!("{key} = {value}\n"))
            .collect();
        lines.sort();
        lines.iter().for_each(|line| out.push_str(line));
        out.push('\n');
    }
    out
}

fn ends_session(error: &ClientError) -> bool {
    matches!(
        error.kind(),
        FailureKind::Authentication | FailureKind::Transport
    )
}

/// Recast a non-fatal failure as an `OperationFailed` carrying splunkd's own text.
fn as_operation_failure(error: ClientError) -> ClientError {
    match error {
        ClientError::ApiError {
            status, message, ..
        } => ClientError::OperationFailed(format!(
            "splunkd rejected the request ({status}): {message}"
        )),
        e if matches!(e.kind(), FailureKind::Validation | FailureKind::Operation) => e,
        other => ClientError::OperationFailed(other.to_string()),
    }
}

impl Session {
    /// Restart splunkd. The session is torn down afterwards.
    ///
    /// # Errors
    ///
    /// Liveness failures, or the restart request's own failure.
    pub async fn restart_instance(&mut self) -> Result<()> {
        self.require_live().await?;
        self.restart_now().await
    }

    async fn restart_now(&mut self) -> Result<()> {
        let result = endpoints::restart_server(self.transport()?).await;
        match result {
            Ok(()) => {
                info!(
                    address = %self.credentials().address(),
                    "Restart requested, disconnecting while splunkd restarts"
                );
                self.disconnect();
                Ok(())
            }
            Err(e) => {
                self.teardown(&e);
                Err(e)
            }
        }
    }

    /// Set the deployment server to `target`, or disable the deployment client
    /// with `None`, then restart.
    ///
    /// # Errors
    ///
    /// `OperationFailed` when splunkd rejects the edit (including a 4xx/5xx
    /// reply) or changes nothing; the session stays live and no restart is issued. A failed restart still ends
    /// the session and its error is returned.
    pub async fn change_deployment_client(&mut self, target: Option<&str>) -> Result<()> {
        let target = target.map(str::trim);
        if target == Some("") {
            return Err(ClientError::ValidationError(
                "deployment server URI must not be empty; pass none to disable".to_string(),
            ));
        }

        self.require_live().await?;
        let result = endpoints::set_deployment_client(self.transport()?, target).await;
        let messages = result.map_err(|e| self.reject(e))?;
        check_deployment_result(&messages)?;

        info!(
            target = target.unwrap_or("(disabled)"),
            "Deployment client updated, restarting"
        );
        self.restart_now().await
    }

    /// Reload every refreshable admin endpoint.
    ///
    /// Failures of individual endpoints are recorded in the report.
    ///
    /// # Errors
    ///
    /// Authentication and transport failures abort the refresh and tear the session down.
    /// A refused admin listing is an `OperationFailed` and leaves the session live.
    pub async fn refresh_configuration(&mut self) -> Result<ReloadReport> {
        self.require_live().await?;

        let windows = self.identity().is_windows();
        let result = endpoints::list_reload_endpoints(self.transport()?, windows).await;
        let names = result.map_err(|e| self.reject(e))?;

        let mut report = ReloadReport::default();
        for endpoint in names {
            let result = endpoints::reload_endpoint(self.transport()?, &endpoint).await;
            let error = match result {
                Ok(()) => None,
                Err(e) if ends_session(&e) => {
                    self.teardown(&e);
                    return Err(e);
                }
                Err(e) => {
                    warn!(endpoint = %endpoint, error = %e, "Reload failed");
                    Some(e.to_string())
                }
            };
            report.outcomes.push(ReloadOutcome { endpoint, error });
        }
        Ok(report)
    }

    /// Every stanza of configuration file `file` with its keys, as `.conf` text.
    ///
    /// # Errors
    ///
    /// `OperationFailed` when the file does not exist or splunkd refuses the
    /// listing; authentication and transport failures end the session.
    pub async fn configuration_contents(&mut self, file: &str) -> Result<String> {
        let file = file.trim();
        if file.is_empty() {
            return Err(ClientError::ValidationError(
                "configuration file name must not be empty".to_string(),
            ));
        }

        self.require_live().await?;
        let result = self.collect_stanzas(file).await;
        let stanzas = match result {
            Ok(stanzas) => stanzas,
            Err(e) if e.is_not_found() => {
                return Err(ClientError::OperationFailed(format!(
                    "No configuration file named '{file}'"
                )));
            }
            Err(e) => return Err(self.reject(e)),
        };
        Ok(render_conf(&stanzas))
    }

    /// Tear down on authentication and transport failures; anything else leaves
    /// the session live and becomes an `OperationFailed`.
    fn reject(&mut self, error: ClientError) -> ClientError {
        if ends_session(&error) {
            self.teardown(&error);
            return error;
        }
        as_operation_failure(error)
    }

    async fn collect_stanzas(&self, file: &str) -> Result<Vec<(String, Vec<(String, String)>)>> {
        let transport = self.transport()?;
        let mut stanzas = Vec::new();
        for stanza in endpoints::list_stanzas(transport, file).await? {
            let keys = endpoints::list_stanza_keys(transport, file, &stanza).await?;
            stanzas.push((stanza, keys));
        }
        Ok(stanzas)
    }
}
