//! Bulletin-board messages.

use tracing::debug;

use crate::endpoints::parse_feed;
use crate::error::Result;
use crate::models::HealthMessage;
use crate::transport::Transport;

const MESSAGES_PATH: &str = "/services/messages";

/// List health messages ordered by creation time, oldest first.
pub async fn list_messages(transport: &Transport) -> Result<Vec<HealthMessage>> {
    debug!("Listing health messages");
    let body = transport.get_json(MESSAGES_PATH, &[]).await?;
    let mut messages: Vec<HealthMessage> = parse_feed::<HealthMessage>(body, MESSAGES_PATH)?
        .into_iter()
        .map(|entry| HealthMessage {
            title: entry.name,
            ..entry.content
        })
        .collect();
    messages.sort_by_key(|m| m.time_created.unwrap_or(0));
    Ok(messages)
}
