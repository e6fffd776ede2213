//! Health message models for `/services/messages`.

use serde::{Deserialize, Serialize};

use crate::format::format_epoch;
use crate::render::Record;
use crate::serde_helpers::opt_u64_from_string_or_number;

/// Message title that marks a pending restart.
pub const RESTART_REQUIRED_MESSAGE: &str = "restart_required";

/// One bulletin-board message. `title` is the entry name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthMessage {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub severity: String,
    #[serde(
        rename = "timeCreated_epochSecs",
        default,
        deserialize_with = "opt_u64_from_string_or_number"
    )]
    pub time_created: Option<u64>,
}

impl HealthMessage {
    pub fn is_restart_required(&self) -> bool {
        self.title == RESTART_REQUIRED_MESSAGE
    }
}

impl Record for HealthMessage {
    const FIELDS: &'static [&'static str] = &["time_created", "severity", "title", "description"];

    fn field(&self, name: &str) -> Option<String> {
        Some(match name {
            "time_created" => self
                .time_created
                .map(|t| format_epoch(t as i64))
                .unwrap_or_default(),
            "severity" => self.severity.to_uppercase(),
            "title" => self.title.clone(),
            "description" => self.message.clone(),
            _ => return None,
        })
    }
}
