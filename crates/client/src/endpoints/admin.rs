//! Admin endpoint discovery and `_reload` calls.

use serde_json::Value;
use tracing::debug;

use crate::endpoints::parse_feed;
use crate::error::Result;
use crate::transport::Transport;

const ADMIN_NS_PREFIX: &str = "/servicesNS/admin/search/";
const ADMIN_PATH: &str = "/servicesNS/admin/search/admin";
const RELOAD_SUFFIX: &str = "/_reload";

/// Reloaded first, ahead of everything discovered under the admin namespace.
pub const FIXED_RELOAD_ENDPOINTS: &[&str] = &[
    "admin/conf-times",
    "data/ui/manager",
    "data/ui/nav",
    "data/ui/views",
];

/// Every endpoint that can be refreshed, fixed ones first.
///
/// `auth-services` is skipped because reloading it ends the session; `fifo`
/// is skipped on Windows where it never reloads.
pub async fn list_reload_endpoints(transport: &Transport, windows: bool) -> Result<Vec<String>> {
    debug!("Listing reloadable admin endpoints");
    let body = transport.get_json(ADMIN_PATH, &[]).await?;

    let mut endpoints: Vec<String> = FIXED_RELOAD_ENDPOINTS.iter().map(|e| e.to_string()).collect();
    for entry in parse_feed::<Value>(body, ADMIN_PATH)? {
        if entry.name == "auth-services" || (windows && entry.name == "fifo") {
            continue;
        }
        if let Some(name) = entry.links.get("_reload").and_then(|href| reload_name(href)) {
            endpoints.push(name.to_string());
        }
    }
    Ok(endpoints)
}

/// `/servicesNS/admin/search/<name>/_reload` -> `<name>`.
fn reload_name(href: &str) -> Option<&str> {
    href.strip_prefix(ADMIN_NS_PREFIX)?
        .strip_suffix(RELOAD_SUFFIX)
        .filter(|name| !name.is_empty())
}

/// POST the endpoint's `_reload`. Only the status matters; the body may be XML or empty.
pub async fn reload_endpoint(transport: &Transport, name: &str) -> Result<()> {
    debug!("Reloading {}", name);
    let path = format!("{ADMIN_NS_PREFIX}{name}{RELOAD_SUFFIX}");
    transport.post_status(&path, &[]).await
}
