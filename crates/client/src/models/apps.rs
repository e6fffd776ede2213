//! Installed app models for `/services/apps/local`.

use serde::{Deserialize, Serialize};

use crate::format::yes_no;
use crate::render::Record;
use crate::serde_helpers::flag;

/// An installed app. `name` is the entry name.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct App {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub label: String,
    pub version: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    pub disabled: bool,
    pub description: Option<String>,
}

impl Record for App {
    const FIELDS: &'static [&'static str] =
        &["name", "label", "disabled", "version", "description"];

    fn field(&self, name: &str) -> Option<String> {
        Some(match name {
            "name" => self.name.clone(),
            "label" => self.label.clone(),
            "disabled" => yes_no(self.disabled),
            "version" => self.version.clone().unwrap_or_else(|| "N/A".to_string()),
            "description" => self.description.clone().unwrap_or_else(|| "N/A".to_string()),
            _ => return None,
        })
    }
}
