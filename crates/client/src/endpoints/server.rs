//! Server info, settings and control endpoints.

use tracing::debug;

use crate::endpoints::first_content;
use crate::error::Result;
use crate::models::{ServerInfo, ServerSettings};
use crate::transport::Transport;

const INFO_PATH: &str = "/services/server/info";
const SETTINGS_PATH: &str = "/services/server/settings";
const RESTART_PATH: &str = "/services/server/control/restart";

pub async fn get_server_info(transport: &Transport) -> Result<ServerInfo> {
    debug!("Getting server info");
    let body = transport.get_json(INFO_PATH, &[]).await?;
    first_content(body, INFO_PATH)
}

pub async fn get_server_settings(transport: &Transport) -> Result<ServerSettings> {
    debug!("Getting server settings");
    let body = transport.get_json(SETTINGS_PATH, &[]).await?;
    first_content(body, SETTINGS_PATH)
}

/// Ask splunkd to restart. The instance drops the connection shortly after.
pub async fn restart_server(transport: &Transport) -> Result<()> {
    debug!("Requesting splunkd restart");
    transport.post_status(RESTART_PATH, &[]).await
}
