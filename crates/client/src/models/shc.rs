//! Search head cluster models.

use serde::{Deserialize, Serialize};

use crate::format::{format_epoch_f64, yes_no};
use crate::render::Record;
use crate::serde_helpers::{
    flag, opt_f64_from_string_or_number, opt_string_from_number_or_string,
    string_from_number_or_string,
};

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ShcMember {
    #[serde(default)]
    pub guid: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub site: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, deserialize_with = "string_from_number_or_string")]
    pub artifact_count: String,
    #[serde(default)]
    pub host_port_pair: String,
    #[serde(default, deserialize_with = "opt_f64_from_string_or_number")]
    pub last_heartbeat: Option<f64>,
    #[serde(default, deserialize_with = "string_from_number_or_string")]
    pub replication_port: String,
    #[serde(default, deserialize_with = "flag")]
    pub advertise_restart_required: bool,
}

impl Record for ShcMember {
    const FIELDS: &'static [&'static str] = &[
        "label",
        "site",
        "status",
        "artifacts",
        "host_port_pair",
        "last_heartbeat",
        "replication_port",
        "restart_required",
        "guid",
    ];

    fn field(&self, name: &str) -> Option<String> {
        Some(match name {
            "label" => self.label.clone(),
            "site" => self.site.clone(),
            "status" => self.status.clone(),
            "artifacts" => self.artifact_count.clone(),
            "host_port_pair" => self.host_port_pair.clone(),
            "last_heartbeat" => self.last_heartbeat.map(format_epoch_f64).unwrap_or_default(),
            "replication_port" => self.replication_port.clone(),
            "restart_required" => yes_no(self.advertise_restart_required),
            "guid" => self.guid.clone(),
            _ => return None,
        })
    }
}

/// `content.captain` of `/services/shcluster/status`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ShcCaptain {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub mgmt_uri: String,
    #[serde(default)]
    pub id: String,
    #[serde(default, deserialize_with = "flag")]
    pub dynamic_captain: bool,
    #[serde(default, deserialize_with = "opt_string_from_number_or_string")]
    pub elected_captain: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    pub rolling_restart_flag: bool,
    #[serde(default, deserialize_with = "flag")]
    pub service_ready_flag: bool,
    #[serde(default, deserialize_with = "flag")]
    pub min_peers_joined_flag: bool,
    #[serde(default, deserialize_with = "flag")]
    pub initialized_flag: bool,
}

/// Search head cluster state reported by a member.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShcFacts {
    pub members: Vec<ShcMember>,
    /// Absent when the member cannot report a captain.
    pub captain: Option<ShcCaptain>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_member_from_content() {
        let member: ShcMember = serde_json::from_value(json!({
            "label": "sh01",
            "site": "site0",
            "status": "Up",
            "artifact_count": 12,
            "host_port_pair": "10.0.0.9:8089",
            "last_heartbeat": 1700000000.25,
            "replication_port": "9200",
            "advertise_restart_required": "0"
        }))
        .unwrap();
        assert_eq!(member.field("artifacts").as_deref(), Some("12"));
        assert_eq!(member.field("restart_required").as_deref(), Some("No"));
        assert!(member.last_heartbeat.is_some());
    }

    #[test]
    fn test_captain_flags() {
        let captain: ShcCaptain = serde_json::from_value(json!({
            "label": "sh02",
            "mgmt_uri": "https://sh02:8089",
            "id": "7C5B",
            "dynamic_captain": "1",
            "elected_captain": 1700000100,
            "rolling_restart_flag": "0",
            "service_ready_flag": "1",
            "min_peers_joined_flag": "1",
            "initialized_flag": "1"
        }))
        .unwrap();
        assert!(captain.dynamic_captain);
        assert_eq!(captain.elected_captain.as_deref(), Some("1700000100"));
        assert!(!captain.rolling_restart_flag);
        assert!(captain.initialized_flag);
    }
}
