//! Search head cluster endpoints.

use serde_json::Value;
use tracing::debug;

use crate::endpoints::{absent_if_not_found, first_content, parse_feed};
use crate::error::{ClientError, Result};
use crate::models::{ShcCaptain, ShcFacts, ShcMember};
use crate::transport::Transport;

const STATUS_PATH: &str = "/services/shcluster/status";
const MEMBERS_PATH: &str = "/services/shcluster/member/members";

/// Captain details and member list. The captain is absent when status returns 404
/// or reports no captain.
pub async fn get_shc_facts(transport: &Transport) -> Result<ShcFacts> {
    debug!("Getting search head cluster facts");

    let captain = match absent_if_not_found(transport.get_json(STATUS_PATH, &[]).await)? {
        Some(body) => {
            let content: Value = first_content(body, STATUS_PATH)?;
            match content.get("captain") {
                Some(captain) if captain.is_object() => Some(
                    serde_json::from_value::<ShcCaptain>(captain.clone()).map_err(|e| {
                        ClientError::InvalidResponse(format!("Failed to parse {STATUS_PATH}: {e}"))
                    })?,
                ),
                _ => None,
            }
        }
        None => None,
    };

    let members =
        parse_feed::<ShcMember>(transport.get_json(MEMBERS_PATH, &[]).await?, MEMBERS_PATH)?
            .into_iter()
            .map(|entry| ShcMember {
                guid: entry.name,
                ..entry.content
            })
            .collect();

    Ok(ShcFacts { members, captain })
}
