//! splunkd REST endpoint implementations.
//!
//! Free functions over a [`Transport`](crate::transport::Transport), one module
//! per resource group. Each fetches a feed, decodes the `content` of its
//! entries and returns typed models.

mod admin;
mod apps;
mod cluster;
mod inputs;
mod introspection;
mod messages;
mod properties;
mod server;
mod shc;
pub mod url_encoding;

pub use admin::{FIXED_RELOAD_ENDPOINTS, list_reload_endpoints, reload_endpoint};
pub use apps::list_apps;
pub use cluster::{get_cluster_membership, get_indexer_cluster_facts};
pub use inputs::get_input_status;
pub use introspection::get_resource_usage;
pub use messages::list_messages;
pub use properties::{
    DEPLOYMENT_CLIENT_STANZA, get_deployment_server, get_property, list_configuration_files,
    list_stanza_keys, list_stanzas, set_deployment_client,
};
pub use server::{get_server_info, get_server_settings, restart_server};
pub use shc::get_shc_facts;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ClientError, Result};
use crate::models::{Entry, Feed};

/// Decode a feed body into typed entries.
pub(crate) fn parse_feed<T: DeserializeOwned>(body: Value, path: &str) -> Result<Vec<Entry<T>>> {
    serde_json::from_value::<Feed<T>>(body)
        .map(|feed| feed.entry)
        .map_err(|e| ClientError::InvalidResponse(format!("Failed to parse {path}: {e}")))
}

/// Content of the first entry of a feed.
pub(crate) fn first_content<T: DeserializeOwned>(body: Value, path: &str) -> Result<T> {
    parse_feed::<T>(body, path)?
        .into_iter()
        .next()
        .map(|entry| entry.content)
        .ok_or_else(|| ClientError::InvalidResponse(format!("No entries in {path} response")))
}

/// Map HTTP 404 to `None`: the resource is absent on this instance.
pub(crate) fn absent_if_not_found<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_content_empty_feed_is_invalid_response() {
        let err = first_content::<Value>(json!({"entry": []}), "/services/x").unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse(_)));
    }

    #[test]
    fn test_absent_if_not_found() {
        let missing: Result<u8> = Err(ClientError::ApiError {
            status: 404,
            url: "u".to_string(),
            message: "m".to_string(),
            request_id: None,
        });
        assert_eq!(absent_if_not_found(missing).unwrap(), None);

        let denied: Result<u8> = Err(ClientError::ApiError {
            status: 403,
            url: "u".to_string(),
            message: "m".to_string(),
            request_id: None,
        });
        assert!(absent_if_not_found(denied).is_err());
        assert_eq!(absent_if_not_found(Ok(3u8)).unwrap(), Some(3));
    }
}
