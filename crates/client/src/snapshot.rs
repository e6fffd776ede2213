//! Point-in-time view of one splunkd instance.
//!
//! Responsibilities:
//! - Hold everything one poll collected
//! - Derive display rows (summary pairs and record tables) from it
//!
//! Does NOT handle:
//! - Fetching (see [`crate::poller`])
//! - Output formatting (the CLI formats [`Table`]s as table, JSON or CSV)
//!
//! Invariants:
//! - A snapshot is never partially filled: it exists only when every poll step succeeded
//! - `indexer_cluster` is present only for cluster masters, `search_head_cluster`
//!   only for SHC members

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::aggregate::ClusterAggregates;
use crate::error::Result;
use crate::format::{format_epoch, pretty_time_delta, yes_no};
use crate::models::{
    App, ClusterMembership, DeploymentServer, HealthMessage, IndexerClusterFacts, InputStatus,
    InstanceIdentity, ResourceUsage, ServerSettings, ShcFacts,
};
use crate::render::{Record, Table, project};

#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub polled_at: DateTime<Utc>,
    pub identity: InstanceIdentity,
    pub settings: ServerSettings,
    /// Some bulletin message asks for a restart.
    pub restart_required: bool,
    pub deployment_server: DeploymentServer,
    pub cluster: ClusterMembership,
    pub messages: Vec<HealthMessage>,
    pub configuration_files: Vec<String>,
    pub inputs: InputStatus,
    pub apps: Vec<App>,
    pub indexer_cluster: Option<IndexerClusterFacts>,
    pub search_head_cluster: Option<ShcFacts>,
    pub resources: ResourceUsage,
}

struct ConfigurationFile<'a>(&'a str);

impl Record for ConfigurationFile<'_> {
    const FIELDS: &'static [&'static str] = &["name"];

    fn field(&self, name: &str) -> Option<String> {
        (name == "name").then(|| self.0.to_string())
    }
}

impl Snapshot {
    pub fn uptime_secs(&self) -> Option<u64> {
        let now = u64::try_from(self.polled_at.timestamp()).ok()?;
        self.identity.uptime_secs(now)
    }

    /// Aggregates over the indexer cluster, when this instance is its master.
    pub fn cluster_aggregates(&self) -> Option<ClusterAggregates> {
        self.indexer_cluster.as_ref().map(ClusterAggregates::compute)
    }

    /// Label/value pairs describing the instance as a whole.
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        let identity = &self.identity;
        let settings = &self.settings;
        let optional = |value: Option<String>| value.unwrap_or_else(|| "N/A".to_string());

        let mut rows = vec![
            ("host", settings.host.clone()),
            ("server_name", identity.server_name.clone()),
            ("type", identity.product_description()),
            ("role", identity.primary_role().to_string()),
            ("roles", identity.roles.to_string()),
            ("version", identity.version.clone()),
            ("guid", identity.guid.clone()),
            ("os", identity.os.clone()),
            ("cores", identity.cores.to_string()),
            ("ram_mb", identity.ram_mb.to_string()),
            (
                "startup_time",
                optional(
                    identity
                        .startup_time
                        .and_then(|t| i64::try_from(t).ok())
                        .map(format_epoch),
                ),
            ),
            ("uptime", optional(self.uptime_secs().map(pretty_time_delta))),
            ("splunk_home", settings.splunk_home.clone()),
            ("splunk_db", settings.splunk_db.clone()),
            ("web_port", settings.web_port.to_string()),
            ("web_ssl", yes_no(settings.web_ssl)),
            ("web_server_enabled", yes_no(settings.web_server_enabled)),
            ("restart_required", yes_no(self.restart_required)),
            ("deployment_server", self.deployment_server.to_string()),
            ("cluster_mode", optional(self.cluster.mode.clone())),
            ("cluster_master", self.cluster.master_uri_display()),
            ("shc_deployer", optional(self.cluster.shc_deployer.clone())),
            ("configuration_files", self.configuration_files.len().to_string()),
            ("apps", self.apps.len().to_string()),
        ];

        if let Some(usage) = &self.resources.hostwide {
            let pct = |v: Option<u8>| v.map_or_else(|| "N/A".to_string(), |p| format!("{p}%"));
            rows.push(("cpu_usage", pct(usage.cpu_pct())));
            rows.push(("mem_usage", pct(usage.mem_pct())));
            rows.push(("swap_usage", pct(usage.swap_pct())));
        }

        if let Some(facts) = &self.indexer_cluster {
            rows.extend([
                ("all_data_searchable", yes_no(facts.all_data_searchable)),
                ("search_factor_met", yes_no(facts.search_factor_met)),
                ("replication_factor_met", yes_no(facts.replication_factor_met)),
                ("maintenance_mode", yes_no(facts.maintenance_mode)),
                ("rolling_restart", yes_no(facts.rolling_restart)),
                ("initialized", yes_no(facts.initialized)),
                ("service_ready", yes_no(facts.service_ready)),
                ("indexing_ready", yes_no(facts.indexing_ready)),
            ]);
        }
        if let Some(aggregates) = self.cluster_aggregates() {
            rows.extend(aggregates.summary());
        }

        if let Some(shc) = &self.search_head_cluster {
            rows.push(("shc_members", shc.members.len().to_string()));
            if let Some(captain) = &shc.captain {
                rows.extend([
                    ("shc_captain", captain.label.clone()),
                    ("shc_captain_uri", captain.mgmt_uri.clone()),
                    ("shc_dynamic_captain", yes_no(captain.dynamic_captain)),
                    ("shc_rolling_restart", yes_no(captain.rolling_restart_flag)),
                    ("shc_service_ready", yes_no(captain.service_ready_flag)),
                    ("shc_min_peers_joined", yes_no(captain.min_peers_joined_flag)),
                    ("shc_initialized", yes_no(captain.initialized_flag)),
                ]);
            }
        }

        rows
    }

    /// Every record table in display order. Role-gated tables appear only
    /// when their facts were collected.
    pub fn tables(&self) -> Vec<Table> {
        let files = self.file_records();
        let inputs = &self.inputs;

        let mut tables = vec![
            Table::from_records("messages", &self.messages),
            Table::from_records("configuration_files", &files),
            Table::from_records("apps", &self.apps),
            Table::from_records("file_monitors", &inputs.file_monitors),
            Table::from_records("tcp_listeners", &inputs.tcp_listeners),
            Table::from_records("udp_hosts", &inputs.udp_hosts),
            Table::from_records("modular_inputs", &inputs.modular_inputs),
            Table::from_records("exec_inputs", &inputs.exec_inputs),
            Table::from_records("listener_ports", &inputs.listener_ports),
        ];

        if let Some(facts) = &self.indexer_cluster {
            tables.push(Table::from_records("cluster_peers", &facts.peers));
            tables.push(Table::from_records("cluster_indexes", &facts.indexes));
            tables.push(Table::from_records("cluster_search_heads", &facts.search_heads));
        }
        if let Some(shc) = &self.search_head_cluster {
            tables.push(Table::from_records("shc_members", &shc.members));
        }

        tables.push(Table::from_records("splunk_processes", &self.resources.processes));
        tables.push(Table::from_records("disk_partitions", &self.resources.partitions));
        tables
    }

    /// Look up one table by name.
    pub fn table(&self, name: &str) -> Option<Table> {
        self.tables().into_iter().find(|t| t.name == name)
    }

    /// Project the table called `name` onto `columns`, which may name any
    /// field of its record type, not only the default columns.
    ///
    /// `Ok(None)` when no such table exists for this instance.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::ValidationError` for a column the record type lacks.
    pub fn project_table(&self, name: &str, columns: &[&str]) -> Result<Option<Table>> {
        let inputs = &self.inputs;
        let table = match name {
            "messages" => project(name, &self.messages, columns),
            "configuration_files" => project(name, &self.file_records(), columns),
            "apps" => project(name, &self.apps, columns),
            "file_monitors" => project(name, &inputs.file_monitors, columns),
            "tcp_listeners" => project(name, &inputs.tcp_listeners, columns),
            "udp_hosts" => project(name, &inputs.udp_hosts, columns),
            "modular_inputs" => project(name, &inputs.modular_inputs, columns),
            "exec_inputs" => project(name, &inputs.exec_inputs, columns),
            "listener_ports" => project(name, &inputs.listener_ports, columns),
            "cluster_peers" | "cluster_indexes" | "cluster_search_heads" => {
                let Some(facts) = &self.indexer_cluster else {
                    return Ok(None);
                };
                match name {
                    "cluster_peers" => project(name, &facts.peers, columns),
                    "cluster_indexes" => project(name, &facts.indexes, columns),
                    _ => project(name, &facts.search_heads, columns),
                }
            }
            "shc_members" => match &self.search_head_cluster {
                Some(shc) => project(name, &shc.members, columns),
                None => return Ok(None),
            },
            "splunk_processes" => project(name, &self.resources.processes, columns),
            "disk_partitions" => project(name, &self.resources.partitions, columns),
            _ => return Ok(None),
        };
        table.map(Some)
    }

    fn file_records(&self) -> Vec<ConfigurationFile<'_>> {
        self.configuration_files
            .iter()
            .map(|f| ConfigurationFile(f))
            .collect()
    }
}
