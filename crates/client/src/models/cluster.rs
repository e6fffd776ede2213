//! Indexer cluster models.
//!
//! Peer, index and search-head records come from the cluster master's
//! `/services/cluster/master/*` endpoints; [`ClusterMembership`] is what any
//! instance reports about the cluster it belongs to.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::format::{format_bytes_as_gb, format_epoch_f64, yes_no};
use crate::render::Record;
use crate::serde_helpers::{
    f64_from_string_or_number, flag, opt_f64_from_string_or_number, string_from_number_or_string,
    u64_from_string_or_number,
};

/// Cluster mode, master URIs and SHC deployer as seen from this instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClusterMembership {
    /// `mode` from `/services/cluster/config`, absent when not clustered.
    pub mode: Option<String>,
    /// Resolved cluster master `host:port` values.
    pub master_uris: Vec<String>,
    pub shc_deployer: Option<String>,
}

impl ClusterMembership {
    pub fn master_uri_display(&self) -> String {
        self.master_uris.join(", ")
    }
}

/// Reduce `https://host:port/path` to `host:port`; other strings pass through trimmed.
pub fn host_port_of(uri: &str) -> String {
    let uri = uri.trim();
    match uri.split_once("://") {
        Some((_, rest)) => rest.split('/').next().unwrap_or(rest).to_string(),
        None => uri.to_string(),
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ClusterPeer {
    #[serde(default)]
    pub guid: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub site: String,
    #[serde(default, deserialize_with = "flag")]
    pub is_searchable: bool,
    #[serde(default)]
    pub status: String,
    #[serde(default, deserialize_with = "u64_from_string_or_number")]
    pub bucket_count: u64,
    #[serde(default)]
    pub host_port_pair: String,
    #[serde(default, deserialize_with = "opt_f64_from_string_or_number")]
    pub last_heartbeat: Option<f64>,
    #[serde(default, deserialize_with = "string_from_number_or_string")]
    pub replication_port: String,
    #[serde(default, deserialize_with = "string_from_number_or_string")]
    pub base_generation_id: String,
}

impl ClusterPeer {
    pub fn is_up(&self) -> bool {
        self.status == "Up"
    }
}

impl Record for ClusterPeer {
    const FIELDS: &'static [&'static str] = &[
        "name",
        "site",
        "is_searchable",
        "status",
        "buckets",
        "location",
        "last_heartbeat",
        "replication_port",
        "base_gen_id",
        "guid",
    ];

    fn field(&self, name: &str) -> Option<String> {
        Some(match name {
            "name" => self.label.clone(),
            "site" => self.site.clone(),
            "is_searchable" => yes_no(self.is_searchable),
            "status" => self.status.clone(),
            "buckets" => self.bucket_count.to_string(),
            "location" => self.host_port_pair.clone(),
            "last_heartbeat" => self.last_heartbeat.map(format_epoch_f64).unwrap_or_default(),
            "replication_port" => self.replication_port.clone(),
            "base_gen_id" => self.base_generation_id.clone(),
            "guid" => self.guid.clone(),
            _ => return None,
        })
    }
}

/// Per-slot copy counts for one index.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct CopyTracker {
    #[serde(deserialize_with = "f64_from_string_or_number")]
    pub actual_copies_per_slot: f64,
    #[serde(deserialize_with = "f64_from_string_or_number")]
    pub expected_total_per_slot: f64,
}

/// Render trackers keyed `"0"`, `"1"`, ... as `2 (100:50%)`.
pub fn format_copies(trackers: &BTreeMap<String, CopyTracker>) -> String {
    if trackers.is_empty() {
        return "0".to_string();
    }

    let mut slots: Vec<(u64, &CopyTracker)> = trackers
        .iter()
        .map(|(k, t)| (k.parse().unwrap_or(u64::MAX), t))
        .collect();
    slots.sort_by_key(|(slot, _)| *slot);

    let percents: Vec<String> = slots
        .iter()
        .map(|(_, t)| {
            let pct = if t.expected_total_per_slot > 0.0 {
                t.actual_copies_per_slot / t.expected_total_per_slot * 100.0
            } else {
                0.0
            };
            format!("{pct:.0}")
        })
        .collect();

    format!("{} ({}%)", slots.len(), percents.join(":"))
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ClusterIndex {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "flag")]
    pub is_searchable: bool,
    #[serde(default, deserialize_with = "u64_from_string_or_number")]
    pub num_buckets: u64,
    #[serde(default, deserialize_with = "opt_f64_from_string_or_number")]
    pub index_size: Option<f64>,
    #[serde(default)]
    pub searchable_copies_tracker: BTreeMap<String, CopyTracker>,
    #[serde(default)]
    pub replicated_copies_tracker: BTreeMap<String, CopyTracker>,
}

impl Record for ClusterIndex {
    const FIELDS: &'static [&'static str] = &[
        "name",
        "is_searchable",
        "buckets",
        "cumulative_data_size",
        "searchable_data_copies",
        "replicated_data_copies",
    ];

    fn field(&self, name: &str) -> Option<String> {
        Some(match name {
            "name" => self.name.clone(),
            "is_searchable" => yes_no(self.is_searchable),
            "buckets" => self.num_buckets.to_string(),
            "cumulative_data_size" => format_bytes_as_gb(self.index_size.unwrap_or(0.0)),
            "searchable_data_copies" => format_copies(&self.searchable_copies_tracker),
            "replicated_data_copies" => format_copies(&self.replicated_copies_tracker),
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ClusterSearchHead {
    #[serde(default)]
    pub guid: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub site: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub host_port_pair: String,
}

impl ClusterSearchHead {
    pub fn is_connected(&self) -> bool {
        self.status == "Connected"
    }
}

impl Record for ClusterSearchHead {
    const FIELDS: &'static [&'static str] = &["name", "site", "status", "location", "guid"];

    fn field(&self, name: &str) -> Option<String> {
        Some(match name {
            "name" => self.label.clone(),
            "site" => self.site.clone(),
            "status" => self.status.clone(),
            "location" => self.host_port_pair.clone(),
            "guid" => self.guid.clone(),
            _ => return None,
        })
    }
}

/// `content` of `/services/cluster/master/info`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClusterMasterInfo {
    #[serde(default, deserialize_with = "flag")]
    pub maintenance_mode: bool,
    #[serde(default, deserialize_with = "flag")]
    pub rolling_restart_flag: bool,
    #[serde(default, deserialize_with = "flag")]
    pub initialized_flag: bool,
    #[serde(default, deserialize_with = "flag")]
    pub service_ready_flag: bool,
    #[serde(default, deserialize_with = "flag")]
    pub indexing_ready_flag: bool,
}

/// `content` of `/services/cluster/master/generation/master`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClusterGeneration {
    /// Null once every bucket is searchable.
    #[serde(default)]
    pub pending_last_reason: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    pub search_factor_met: bool,
    #[serde(default, deserialize_with = "flag")]
    pub replication_factor_met: bool,
}

/// Everything a cluster master reports about its indexer cluster.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IndexerClusterFacts {
    pub peers: Vec<ClusterPeer>,
    pub indexes: Vec<ClusterIndex>,
    pub search_heads: Vec<ClusterSearchHead>,
    pub all_data_searchable: bool,
    pub search_factor_met: bool,
    pub replication_factor_met: bool,
    pub maintenance_mode: bool,
    pub rolling_restart: bool,
    pub initialized: bool,
    pub service_ready: bool,
    pub indexing_ready: bool,
}

impl IndexerClusterFacts {
    pub fn new(
        info: ClusterMasterInfo,
        generation: ClusterGeneration,
        peers: Vec<ClusterPeer>,
        indexes: Vec<ClusterIndex>,
        search_heads: Vec<ClusterSearchHead>,
    ) -> Self {
        Self {
            peers,
            indexes,
            search_heads,
            all_data_searchable: generation.pending_last_reason.is_none(),
            search_factor_met: generation.search_factor_met,
            replication_factor_met: generation.replication_factor_met,
            maintenance_mode: info.maintenance_mode,
            rolling_restart: info.rolling_restart_flag,
            initialized: info.initialized_flag,
            service_ready: info.service_ready_flag,
            indexing_ready: info.indexing_ready_flag,
        }
    }
}
