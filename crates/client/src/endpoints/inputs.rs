//! Input processor status.

use serde_json::Value;
use tracing::debug;

use crate::endpoints::parse_feed;
use crate::error::Result;
use crate::models::InputStatus;
use crate::transport::Transport;

const INPUT_STATUS_PATH: &str = "/services/admin/inputstatus";

pub async fn get_input_status(transport: &Transport) -> Result<InputStatus> {
    debug!("Getting input status");
    let body = transport.get_json(INPUT_STATUS_PATH, &[]).await?;
    let entries = parse_feed::<Value>(body, INPUT_STATUS_PATH)?;
    Ok(InputStatus::from_entries(&entries))
}
