//! Configuration file properties (`/services/properties`).

use serde_json::Value;
use tracing::debug;

use crate::endpoints::url_encoding::encode_path_segment;
use crate::endpoints::{absent_if_not_found, parse_feed};
use crate::error::{ClientError, Result};
use crate::models::{DeploymentServer, SplunkMessages};
use crate::transport::Transport;

const PROPERTIES_PATH: &str = "/services/properties";

/// `deploymentclient.conf` stanza holding the deployment server target.
pub const DEPLOYMENT_CLIENT_STANZA: &str = "target-broker:deploymentServer";

fn property_path(segments: &[&str]) -> String {
    segments.iter().fold(PROPERTIES_PATH.to_string(), |mut path, segment| {
        path.push('/');
        path.push_str(&encode_path_segment(segment));
        path
    })
}

/// Names of every configuration file splunkd exposes.
pub async fn list_configuration_files(transport: &Transport) -> Result<Vec<String>> {
    debug!("Listing configuration files");
    let body = transport.get_json(PROPERTIES_PATH, &[]).await?;
    Ok(parse_feed::<Value>(body, PROPERTIES_PATH)?
        .into_iter()
        .map(|entry| entry.name)
        .collect())
}

/// Single property value as plain text; `None` when the file, stanza or key does not exist.
pub async fn get_property(
    transport: &Transport,
    file: &str,
    stanza: &str,
    key: &str,
) -> Result<Option<String>> {
    let path = property_path(&[file, stanza, key]);
    debug!("Getting property {}", path);
    Ok(absent_if_not_found(transport.get_text(&path).await)?.map(|v| v.trim().to_string()))
}

pub async fn get_deployment_server(transport: &Transport) -> Result<DeploymentServer> {
    let disabled =
        get_property(transport, "deploymentclient", DEPLOYMENT_CLIENT_STANZA, "disabled").await?;
    let target =
        get_property(transport, "deploymentclient", DEPLOYMENT_CLIENT_STANZA, "targetUri").await?;
    Ok(DeploymentServer::from_properties(disabled.as_deref(), target.as_deref()))
}

/// Enable the deployment client with `target`, or disable it and clear the URI.
///
/// Returns the messages splunkd reports about the edit.
pub async fn set_deployment_client(
    transport: &Transport,
    target: Option<&str>,
) -> Result<SplunkMessages> {
    let path = property_path(&["deploymentclient", DEPLOYMENT_CLIENT_STANZA]);
    let form = match target {
        Some(uri) => [("disabled", "0"), ("targetUri", uri)],
        None => [("disabled", "1"), ("targetUri", "")],
    };
    debug!("Setting deployment client: {:?}", form);

    let body = transport.post_form(&path, &form).await?;
    if body.is_null() {
        return Ok(SplunkMessages { messages: Vec::new() });
    }
    serde_json::from_value(body.clone()).map_err(|_| {
        ClientError::InvalidResponse(format!("Unexpected response from {path}: {body}"))
    })
}

/// Stanza names of one configuration file.
pub async fn list_stanzas(transport: &Transport, file: &str) -> Result<Vec<String>> {
    let path = property_path(&[file]);
    let body = transport.get_json(&path, &[]).await?;
    Ok(parse_feed::<Value>(body, &path)?
        .into_iter()
        .map(|entry| entry.name)
        .collect())
}

/// `(key, value)` pairs of one stanza. Structured values are rendered as JSON text.
pub async fn list_stanza_keys(
    transport: &Transport,
    file: &str,
    stanza: &str,
) -> Result<Vec<(String, String)>> {
    let path = property_path(&[file, stanza]);
    let body = transport.get_json(&path, &[]).await?;
    Ok(parse_feed::<Value>(body, &path)?
        .into_iter()
        .map(|entry| {
            let value = match entry.content {
                Value::String(s) => s,
                Value::Null => String::new(),
                other => other.to_string(),
            };
            (entry.name, value)
        })
        .collect())
}
