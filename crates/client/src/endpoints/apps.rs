//! Installed apps.

use tracing::debug;

use crate::endpoints::parse_feed;
use crate::error::Result;
use crate::models::App;
use crate::transport::Transport;

const APPS_PATH: &str = "/services/apps/local";

pub async fn list_apps(transport: &Transport) -> Result<Vec<App>> {
    debug!("Listing installed apps");
    let body = transport.get_json(APPS_PATH, &[]).await?;
    Ok(parse_feed::<App>(body, APPS_PATH)?
        .into_iter()
        .map(|entry| App {
            name: entry.name,
            ..entry.content
        })
        .collect())
}
