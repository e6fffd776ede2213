//! Instance identity and settings models.
//!
//! `ServerInfo` and `ServerSettings` mirror the `content` of
//! `/services/server/info` and `/services/server/settings`; [`InstanceIdentity`]
//! is the normalized view a session keeps.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::serde_helpers::{flag, opt_u64_from_string_or_number, u64_from_string_or_number};

/// `content` of `/services/server/info`.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ServerInfo {
    #[serde(rename = "serverName", default)]
    pub server_name: String,
    #[serde(default)]
    pub guid: String,
    #[serde(default)]
    pub version: String,
    #[serde(default, deserialize_with = "opt_u64_from_string_or_number")]
    pub startup_time: Option<u64>,
    #[serde(rename = "numberOfCores", default, deserialize_with = "opt_u64_from_string_or_number")]
    pub number_of_cores: Option<u64>,
    #[serde(
        rename = "physicalMemoryMB",
        default,
        deserialize_with = "opt_u64_from_string_or_number"
    )]
    pub physical_memory_mb: Option<u64>,
    #[serde(default)]
    pub server_roles: Vec<String>,
    pub product_type: Option<String>,
    pub mode: Option<String>,
    pub os_name: Option<String>,
    pub os_name_extended: Option<String>,
    pub os_build: Option<String>,
    pub os_version: Option<String>,
    pub cpu_arch: Option<String>,
}

impl ServerInfo {
    /// `os_name_extended cpu_arch` when available, otherwise assembled from the parts.
    pub fn os_description(&self) -> String {
        let arch = self.cpu_arch.as_deref().unwrap_or_default();
        if let Some(extended) = self.os_name_extended.as_deref() {
            return format!("{extended} {arch}").trim_end().to_string();
        }

        let name = self.os_name.as_deref().unwrap_or_default();
        let build = self.os_build.as_deref().unwrap_or_default();
        let version = self.os_version.as_deref().unwrap_or_default();
        let description = if name == "Windows" {
            format!("{name} {build}.{version} {arch}")
        } else {
            format!("{name} {version} {arch} {build}")
        };
        description.trim().to_string()
    }
}

/// `content` of `/services/server/settings`.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct ServerSettings {
    #[serde(default)]
    pub host: String,
    #[serde(rename = "SPLUNK_HOME", default)]
    pub splunk_home: String,
    #[serde(rename = "SPLUNK_DB", default)]
    pub splunk_db: String,
    #[serde(rename = "serverName", default)]
    pub server_name: String,
    #[serde(rename = "httpport", deserialize_with = "u64_from_string_or_number")]
    pub web_port: u64,
    #[serde(rename = "enableSplunkWebSSL", default, deserialize_with = "flag")]
    pub web_ssl: bool,
    #[serde(rename = "startwebserver", default, deserialize_with = "flag")]
    pub web_server_enabled: bool,
}

/// Server role tags reported by `server_roles`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSet(BTreeSet<String>);

impl RoleSet {
    pub fn contains(&self, role: &str) -> bool {
        self.0.contains(role)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn is_cluster_master(&self) -> bool {
        self.contains("cluster_master")
    }

    pub fn is_shc_member(&self) -> bool {
        self.contains("shc_member")
    }

    /// The single most descriptive role for display.
    ///
    /// Older forwarders set no role, so `mode == "dedicated forwarder"` is consulted
    /// before falling back to heavy forwarder.
    pub fn primary_role(&self, mode: Option<&str>) -> PrimaryRole {
        const PRECEDENCE: &[(&str, PrimaryRole)] = &[
            ("universal_forwarder", PrimaryRole::UniversalForwarder),
            ("management_console", PrimaryRole::ManagementConsole),
            ("indexer", PrimaryRole::Indexer),
            ("deployment_server", PrimaryRole::DeploymentServer),
            ("heavyweight_forwarder", PrimaryRole::HeavyForwarder),
            ("cluster_master", PrimaryRole::ClusterMaster),
            ("license_master", PrimaryRole::LicenseMaster),
            ("search_head", PrimaryRole::SearchHead),
        ];

        PRECEDENCE
            .iter()
            .find(|(tag, _)| self.contains(tag))
            .map(|(_, role)| *role)
            .unwrap_or(if mode == Some("dedicated forwarder") {
                PrimaryRole::Forwarder
            } else {
                PrimaryRole::HeavyForwarder
            })
    }
}

impl<S: Into<String>> FromIterator<S> for RoleSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("(unknown)");
        }
        let roles: Vec<&str> = self.iter().collect();
        f.write_str(&roles.join(", "))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PrimaryRole {
    UniversalForwarder,
    ManagementConsole,
    Indexer,
    DeploymentServer,
    HeavyForwarder,
    ClusterMaster,
    LicenseMaster,
    SearchHead,
    Forwarder,
}

impl fmt::Display for PrimaryRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::UniversalForwarder => "Universal Forwarder",
            Self::ManagementConsole => "Management Console",
            Self::Indexer => "Indexer",
            Self::DeploymentServer => "Deployment Server",
            Self::HeavyForwarder => "Heavy Forwarder",
            Self::ClusterMaster => "Cluster Master",
            Self::LicenseMaster => "License Master",
            Self::SearchHead => "Search Head",
            Self::Forwarder => "Forwarder",
        })
    }
}

/// Identity facts resolved once when a session connects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstanceIdentity {
    pub server_name: String,
    pub guid: String,
    pub version: String,
    pub product_type: Option<String>,
    pub mode: Option<String>,
    pub os: String,
    pub roles: RoleSet,
    pub cores: u64,
    pub ram_mb: u64,
    pub startup_time: Option<u64>,
}

impl InstanceIdentity {
    pub fn primary_role(&self) -> PrimaryRole {
        self.roles.primary_role(self.mode.as_deref())
    }

    /// e.g. `Splunk Enterprise v9.1.2`.
    pub fn product_description(&self) -> String {
        let v = &self.version;
        if self.roles.contains("universal_forwarder") {
            return format!("Splunk Universal Forwarder v{v}");
        }
        match (self.product_type.as_deref(), self.mode.as_deref()) {
            (Some("enterprise"), _) => format!("Splunk Enterprise v{v}"),
            (Some("hunk"), _) => format!("Splunk Hunk v{v}"),
            (Some("lite"), _) => format!("Splunk Lite v{v}"),
            (Some("lite_free"), _) => format!("Splunk Lite Free v{v}"),
            (_, Some("dedicated forwarder")) => format!("Splunk Forwarder v{v}"),
            _ => format!("Splunk v{v}"),
        }
    }

    pub fn is_windows(&self) -> bool {
        self.os.contains("Windows")
    }

    /// Seconds since startup relative to `now_epoch`, if the startup time is known.
    pub fn uptime_secs(&self, now_epoch: u64) -> Option<u64> {
        self.startup_time.map(|start| now_epoch.saturating_sub(start))
    }
}

impl From<ServerInfo> for InstanceIdentity {
    fn from(info: ServerInfo) -> Self {
        let os = info.os_description();
        Self {
            server_name: info.server_name,
            guid: info.guid,
            version: info.version,
            product_type: info.product_type,
            mode: info.mode,
            os,
            roles: info.server_roles.into_iter().collect(),
            cores: info.number_of_cores.unwrap_or(0),
            ram_mb: info.physical_memory_mb.unwrap_or(0),
            startup_time: info.startup_time,
        }
    }
}
