//! Operating system resource usage from `/services/server/status/*`.

use serde::{Deserialize, Serialize};

use crate::format::{format_mb_as_gb, format_ratio_percent};
use crate::render::Record;
use crate::serde_helpers::{
    f64_from_string_or_number, opt_f64_from_string_or_number, string_from_number_or_string,
};

/// `content` of `resource-usage/hostwide`. Memory figures are in MB.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct HostwideUsage {
    #[serde(default, deserialize_with = "opt_f64_from_string_or_number")]
    pub cpu_idle_pct: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_from_string_or_number")]
    pub mem: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_from_string_or_number")]
    pub mem_used: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_from_string_or_number")]
    pub swap: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_from_string_or_number")]
    pub swap_used: Option<f64>,
}

fn whole_percent(used: f64, total: f64) -> Option<u8> {
    (total > 0.0).then(|| (used / total * 100.0).clamp(0.0, 100.0) as u8)
}

impl HostwideUsage {
    /// `100 - idle`, truncated.
    pub fn cpu_pct(&self) -> Option<u8> {
        self.cpu_idle_pct
            .map(|idle| (100.0 - idle.trunc()).clamp(0.0, 100.0) as u8)
    }

    pub fn mem_pct(&self) -> Option<u8> {
        whole_percent(self.mem_used?, self.mem?)
    }

    /// Swap on Unix, commit charge on Windows.
    pub fn swap_pct(&self) -> Option<u8> {
        whole_percent(self.swap_used?, self.swap?)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SplunkProcess {
    #[serde(default)]
    pub process: String,
    #[serde(default, deserialize_with = "string_from_number_or_string")]
    pub pid: String,
    #[serde(default, deserialize_with = "string_from_number_or_string")]
    pub ppid: String,
    #[serde(default, deserialize_with = "opt_f64_from_string_or_number")]
    pub pct_cpu: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_from_string_or_number")]
    pub pct_memory: Option<f64>,
    #[serde(default)]
    pub args: String,
}

impl Record for SplunkProcess {
    const FIELDS: &'static [&'static str] = &["name", "pid", "parent_pid", "cpu", "mem", "args"];

    fn field(&self, name: &str) -> Option<String> {
        let pct = |v: Option<f64>| format!("{:.0}%", v.unwrap_or(0.0).trunc());
        Some(match name {
            "name" => self.process.clone(),
            "pid" => self.pid.clone(),
            "parent_pid" => self.ppid.clone(),
            "cpu" => pct(self.pct_cpu),
            "mem" => pct(self.pct_memory),
            "args" => self.args.clone(),
            _ => return None,
        })
    }
}

/// A mounted filesystem. Sizes are in MB.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct DiskPartition {
    #[serde(default)]
    pub mount_point: String,
    #[serde(default)]
    pub fs_type: String,
    #[serde(deserialize_with = "f64_from_string_or_number")]
    pub free: f64,
    #[serde(deserialize_with = "f64_from_string_or_number")]
    pub capacity: f64,
}

impl Record for DiskPartition {
    const FIELDS: &'static [&'static str] = &["name", "type", "used", "total"];

    fn field(&self, name: &str) -> Option<String> {
        Some(match name {
            "name" => self.mount_point.clone(),
            "type" => self.fs_type.clone(),
            "used" => format_ratio_percent(self.capacity - self.free, self.capacity),
            "total" => format_mb_as_gb(self.capacity),
            _ => return None,
        })
    }
}

/// Host-wide usage plus the per-process and per-partition breakdowns.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResourceUsage {
    /// Absent when the introspection endpoint is unavailable.
    pub hostwide: Option<HostwideUsage>,
    pub processes: Vec<SplunkProcess>,
    pub partitions: Vec<DiskPartition>,
}
