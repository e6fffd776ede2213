//! Indexer cluster endpoints.

use serde_json::Value;
use tracing::debug;

use crate::endpoints::{absent_if_not_found, first_content, get_property, parse_feed};
use crate::error::Result;
use crate::models::{
    ClusterGeneration, ClusterIndex, ClusterMasterInfo, ClusterMembership, ClusterPeer,
    ClusterSearchHead, IndexerClusterFacts, host_port_of,
};
use crate::transport::Transport;

const CONFIG_PATH: &str = "/services/cluster/config";
const MASTER_INFO_PATH: &str = "/services/cluster/master/info";
const GENERATION_PATH: &str = "/services/cluster/master/generation/master";
const PEERS_PATH: &str = "/services/cluster/master/peers";
const INDEXES_PATH: &str = "/services/cluster/master/indexes";
const SEARCHHEADS_PATH: &str = "/services/cluster/master/searchheads";

const CLUSTERMASTER_PREFIX: &str = "clustermaster:";

/// Cluster mode, resolved master URIs and SHC deployer. Each piece is absent on a 404.
pub async fn get_cluster_membership(transport: &Transport) -> Result<ClusterMembership> {
    debug!("Getting cluster membership");

    let mode = match absent_if_not_found(transport.get_json(CONFIG_PATH, &[]).await)? {
        Some(body) => first_content::<Value>(body, CONFIG_PATH)?
            .get("mode")
            .and_then(Value::as_str)
            .map(str::to_string),
        None => None,
    };

    let mut master_uris = Vec::new();
    if let Some(list) = get_property(transport, "server", "clustering", "master_uri").await? {
        for uri in list.split(',').map(str::trim).filter(|u| !u.is_empty()) {
            let resolved = if uri.starts_with(CLUSTERMASTER_PREFIX) {
                get_property(transport, "server", uri, "master_uri")
                    .await?
                    .unwrap_or_else(|| uri.to_string())
            } else {
                uri.to_string()
            };
            master_uris.push(host_port_of(&resolved));
        }
    }

    let shc_deployer = get_property(transport, "server", "shclustering", "conf_deploy_fetch_url")
        .await?
        .filter(|url| !url.is_empty())
        .map(|url| host_port_of(&url));

    Ok(ClusterMembership {
        mode,
        master_uris,
        shc_deployer,
    })
}

/// Full cluster master view: flags, peers, indexes and search heads.
pub async fn get_indexer_cluster_facts(transport: &Transport) -> Result<IndexerClusterFacts> {
    debug!("Getting indexer cluster facts");

    let info: ClusterMasterInfo =
        first_content(transport.get_json(MASTER_INFO_PATH, &[]).await?, MASTER_INFO_PATH)?;
    let generation: ClusterGeneration =
        first_content(transport.get_json(GENERATION_PATH, &[]).await?, GENERATION_PATH)?;

    let peers = parse_feed::<ClusterPeer>(transport.get_json(PEERS_PATH, &[]).await?, PEERS_PATH)?
        .into_iter()
        .map(|entry| ClusterPeer {
            guid: entry.name,
            ..entry.content
        })
        .collect();

    let indexes =
        parse_feed::<ClusterIndex>(transport.get_json(INDEXES_PATH, &[]).await?, INDEXES_PATH)?
            .into_iter()
            .map(|entry| ClusterIndex {
                name: entry.name,
                ..entry.content
            })
            .collect();

    let search_heads = parse_feed::<ClusterSearchHead>(
        transport.get_json(SEARCHHEADS_PATH, &[]).await?,
        SEARCHHEADS_PATH,
    )?
    .into_iter()
    .map(|entry| ClusterSearchHead {
        guid: entry.name,
        ..entry.content
    })
    .collect();

    Ok(IndexerClusterFacts::new(info, generation, peers, indexes, search_heads))
}
