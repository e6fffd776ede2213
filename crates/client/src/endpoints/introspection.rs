//! Host and process resource usage.

use tracing::debug;

use crate::endpoints::{absent_if_not_found, first_content, parse_feed};
use crate::error::Result;
use crate::models::{DiskPartition, HostwideUsage, ResourceUsage, SplunkProcess};
use crate::transport::Transport;

const PARTITIONS_PATH: &str = "/services/server/status/partitions-space";
const HOSTWIDE_PATH: &str = "/services/server/status/resource-usage/hostwide";
const PROCESSES_PATH: &str = "/services/server/status/resource-usage/splunk-processes";

/// Partitions, host-wide usage and Splunk processes. An endpoint answering 404 contributes nothing.
pub async fn get_resource_usage(transport: &Transport) -> Result<ResourceUsage> {
    debug!("Getting resource usage");

    let partitions = match absent_if_not_found(transport.get_json(PARTITIONS_PATH, &[]).await)? {
        Some(body) => parse_feed::<DiskPartition>(body, PARTITIONS_PATH)?
            .into_iter()
            .map(|entry| entry.content)
            .collect(),
        None => Vec::new(),
    };

    let hostwide = match absent_if_not_found(transport.get_json(HOSTWIDE_PATH, &[]).await)? {
        Some(body) => Some(first_content::<HostwideUsage>(body, HOSTWIDE_PATH)?),
        None => None,
    };

    let processes = match absent_if_not_found(transport.get_json(PROCESSES_PATH, &[]).await)? {
        Some(body) => parse_feed::<SplunkProcess>(body, PROCESSES_PATH)?
            .into_iter()
            .map(|entry| entry.content)
            .collect(),
        None => Vec::new(),
    };

    Ok(ResourceUsage {
        hostwide,
        processes,
        partitions,
    })
}
