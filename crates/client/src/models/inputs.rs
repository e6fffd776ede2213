//! Input ingestion status from `/services/admin/inputstatus`.
//!
//! The endpoint returns one entry per input processor (`TailingProcessor:FileStatus`,
//! `Raw:tcp`, ...), each with an `inputs` object keyed by location. This module
//! flattens those into typed records.
//!
//! Invariants:
//! - Raw TCP listeners precede cooked ones in [`InputStatus::tcp_listeners`]
//! - The `tcp` summary key of the TCP processors is never a listener

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::format::format_percent_compact;
use crate::models::Entry;
use crate::render::Record;
use crate::serde_helpers::{value_f64, value_text};

const FILE_STATUS: &str = "TailingProcessor:FileStatus";
const EXEC_COMMANDS: &str = "ExecProcessor:exec commands";
const MODULAR_COMMANDS: &str = "ModularInputs:modular input commands";
const RAW_TCP: &str = "Raw:tcp";
const COOKED_TCP: &str = "Cooked:tcp";
const UDP_HOSTS: &str = "UDP:hosts";
const RAW_LISTENER_PORTS: &str = "tcp_raw:listenerports";
const COOKED_LISTENER_PORTS: &str = "tcp_cooked:listenerports";
const UDP_LISTENER_PORTS: &str = "UDP:listenerports";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileMonitor {
    pub location: String,
    pub file_type: String,
    pub percent: Option<f64>,
    pub position: String,
    pub size: String,
    pub parent: String,
}

impl Record for FileMonitor {
    const FIELDS: &'static [&'static str] =
        &["location", "type", "percent", "position", "size", "parent"];

    fn field(&self, name: &str) -> Option<String> {
        Some(match name {
            "location" => self.location.clone(),
            "type" => self.file_type.clone(),
            "percent" => self.percent.map(format_percent_compact).unwrap_or_default(),
            "position" => self.position.clone(),
            "size" => self.size.clone(),
            "parent" => self.parent.clone(),
            _ => return None,
        })
    }
}

/// Exec or modular input process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessInput {
    pub location: String,
    pub exit_description: String,
    pub time_closed: String,
    pub time_opened: String,
    pub total_bytes: String,
}

impl ProcessInput {
    fn from_status(location: &str, status: &Value) -> Self {
        Self {
            location: location.to_string(),
            exit_description: value_text(status, "exit status description"),
            time_closed: value_text(status, "time closed"),
            time_opened: value_text(status, "time opened"),
            total_bytes: value_text(status, "total bytes"),
        }
    }
}

impl Record for ProcessInput {
    const FIELDS: &'static [&'static str] =
        &["location", "exit_description", "time_closed", "time_opened", "total_bytes"];

    fn field(&self, name: &str) -> Option<String> {
        Some(match name {
            "location" => self.location.clone(),
            "exit_description" => self.exit_description.clone(),
            "time_closed" => self.time_closed.clone(),
            "time_opened" => self.time_opened.clone(),
            "total_bytes" => self.total_bytes.clone(),
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TcpKind {
    Raw,
    Cooked,
}

impl fmt::Display for TcpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Raw => "Raw",
            Self::Cooked => "Cooked",
        })
    }
}

/// A TCP input connection, tagged with the processor it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TcpListener {
    pub kind: TcpKind,
    pub port: String,
    pub source: String,
    pub exit_description: String,
    pub time_closed: String,
    pub time_opened: String,
    pub total_bytes: String,
}

impl TcpListener {
    /// Build from a `port:source` key; a key without a colon is port `0`.
    fn from_status(kind: TcpKind, key: &str, status: &Value) -> Self {
        let (port, source) = key.split_once(':').unwrap_or(("0", key));
        let process = ProcessInput::from_status(key, status);
        Self {
            kind,
            port: port.to_string(),
            source: source.to_string(),
            exit_description: process.exit_description,
            time_closed: process.time_closed,
            time_opened: process.time_opened,
            total_bytes: process.total_bytes,
        }
    }
}

impl Record for TcpListener {
    const FIELDS: &'static [&'static str] = &[
        "type",
        "port",
        "source",
        "exit_description",
        "time_closed",
        "time_opened",
        "total_bytes",
    ];

    fn field(&self, name: &str) -> Option<String> {
        Some(match name {
            "type" => self.kind.to_string(),
            "port" => self.port.clone(),
            "source" => self.source.clone(),
            "exit_description" => self.exit_description.clone(),
            "time_closed" => self.time_closed.clone(),
            "time_opened" => self.time_opened.clone(),
            "total_bytes" => self.total_bytes.clone(),
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UdpHost {
    pub source: String,
}

impl Record for UdpHost {
    const FIELDS: &'static [&'static str] = &["source"];

    fn field(&self, name: &str) -> Option<String> {
        (name == "source").then(|| self.source.clone())
    }
}

/// A port an input processor listens on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListenerPort {
    /// `tcp_raw`, `tcp_cooked` or `udp`.
    pub protocol: &'static str,
    pub port: String,
}

impl Record for ListenerPort {
    const FIELDS: &'static [&'static str] = &["protocol", "port"];

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "protocol" => Some(self.protocol.to_string()),
            "port" => Some(self.port.clone()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InputStatus {
    pub file_monitors: Vec<FileMonitor>,
    pub tcp_listeners: Vec<TcpListener>,
    pub udp_hosts: Vec<UdpHost>,
    pub modular_inputs: Vec<ProcessInput>,
    pub exec_inputs: Vec<ProcessInput>,
    pub listener_ports: Vec<ListenerPort>,
}

impl InputStatus {
    /// Flatten inputstatus entries. Unknown processors are ignored.
    pub fn from_entries(entries: &[Entry<Value>]) -> Self {
        let mut status = Self::default();
        let mut raw = Vec::new();
        let mut cooked = Vec::new();

        for entry in entries {
            let Some(inputs) = entry.content.get("inputs").and_then(Value::as_object) else {
                continue;
            };
            match entry.name.as_str() {
                FILE_STATUS => {
                    status.file_monitors.extend(inputs.iter().map(|(location, s)| FileMonitor {
                        location: location.clone(),
                        file_type: value_text(s, "type"),
                        percent: value_f64(s, "percent"),
                        position: value_text(s, "file position"),
                        size: value_text(s, "file size"),
                        parent: value_text(s, "parent"),
                    }));
                }
                EXEC_COMMANDS => status
                    .exec_inputs
                    .extend(inputs.iter().map(|(l, s)| ProcessInput::from_status(l, s))),
                MODULAR_COMMANDS => status
                    .modular_inputs
                    .extend(inputs.iter().map(|(l, s)| ProcessInput::from_status(l, s))),
                RAW_TCP => raw.extend(tcp_records(TcpKind::Raw, inputs)),
                COOKED_TCP => cooked.extend(tcp_records(TcpKind::Cooked, inputs)),
                UDP_HOSTS => status
                    .udp_hosts
                    .extend(inputs.keys().map(|source| UdpHost { source: source.clone() })),
                RAW_LISTENER_PORTS => status.listener_ports.extend(ports("tcp_raw", inputs)),
                COOKED_LISTENER_PORTS => status.listener_ports.extend(ports("tcp_cooked", inputs)),
                UDP_LISTENER_PORTS => status.listener_ports.extend(ports("udp", inputs)),
                _ => {}
            }
        }

        status.tcp_listeners = merge_tcp_listeners(raw, cooked);
        status
    }
}

/// Raw listeners followed by cooked listeners.
pub fn merge_tcp_listeners(raw: Vec<TcpListener>, cooked: Vec<TcpListener>) -> Vec<TcpListener> {
    raw.into_iter().chain(cooked).collect()
}

fn tcp_records(
    kind: TcpKind,
    inputs: &serde_json::Map<String, Value>,
) -> impl Iterator<Item = TcpListener> + '_ {
    inputs
        .iter()
        .filter(|(key, _)| key.as_str() != "tcp")
        .map(move |(key, s)| TcpListener::from_status(kind, key, s))
}

fn ports<'a>(
    protocol: &'static str,
    inputs: &'a serde_json::Map<String, Value>,
) -> impl Iterator<Item = ListenerPort> + 'a {
    inputs.keys().map(move |port| ListenerPort {
        protocol,
        port: port.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(name: &str, inputs: Value) -> Entry<Value> {
        Entry {
            name: name.to_string(),
            content: json!({ "inputs": inputs }),
            links: Default::default(),
        }
    }

    #[test]
    fn test_tcp_merge_tags_and_order() {
        let status = json!({"time opened": "t1", "total bytes": "42"});
        let entries = vec![
            entry(COOKED_TCP, json!({"9997:fwd01": status.clone()})),
            entry(RAW_TCP, json!({"tcp": {}, "514:syslog01": status})),
        ];

        let inputs = InputStatus::from_entries(&entries);
        assert_eq!(inputs.tcp_listeners.len(), 2);
        let (raw, cooked) = (&inputs.tcp_listeners[0], &inputs.tcp_listeners[1]);
        assert_eq!(raw.kind, TcpKind::Raw);
        assert_eq!(raw.port, "514");
        assert_eq!(raw.source, "syslog01");
        assert_eq!(cooked.kind, TcpKind::Cooked);
        assert_eq!(cooked.port, "9997");
        assert_eq!(raw.total_bytes, cooked.total_bytes);
        assert_eq!(raw.time_opened, cooked.time_opened);
    }

    #[test]
    fn test_tcp_key_without_colon_is_port_zero() {
        let entries = vec![entry(RAW_TCP, json!({"orphan": {}}))];
        let inputs = InputStatus::from_entries(&entries);
        assert_eq!(inputs.tcp_listeners[0].port, "0");
        assert_eq!(inputs.tcp_listeners[0].source, "orphan");
    }

    #[test]
    fn test_file_monitor_fields() {
        let entries = vec![entry(
            FILE_STATUS,
            json!({"/var/log/messages": {"type": "open file", "percent": 100.0, "file position": 2048, "file size": "2048", "parent": "/var/log"}}),
        )];
        let inputs = InputStatus::from_entries(&entries);
        let monitor = &inputs.file_monitors[0];
        assert_eq!(monitor.location, "/var/log/messages");
        assert_eq!(monitor.field("percent").as_deref(), Some("100%"));
        assert_eq!(monitor.position, "2048");
        assert_eq!(monitor.parent, "/var/log");
    }

    #[test]
    fn test_udp_and_listener_ports() {
        let entries = vec![
            entry(UDP_HOSTS, json!({"10.0.0.5": {}})),
            entry(RAW_LISTENER_PORTS, json!({"514": {}})),
            entry(UDP_LISTENER_PORTS, json!({"514": {}})),
            entry("Unrelated:thing", json!({"x": {}})),
        ];
        let inputs = InputStatus::from_entries(&entries);
        assert_eq!(inputs.udp_hosts, vec![UdpHost { source: "10.0.0.5".to_string() }]);
        assert_eq!(inputs.listener_ports.len(), 2);
        assert_eq!(inputs.listener_ports[1].protocol, "udp");
    }
}
