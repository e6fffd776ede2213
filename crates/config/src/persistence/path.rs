//! Path helpers for configuration file locations.
//!
//! Uses the `directories` crate for platform-appropriate paths.

use std::path::PathBuf;

use anyhow::Context;

use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};

/// Returns the default path to the configuration file.
///
/// - Linux: `~/.config/splunkd-monitor/config.json`
/// - macOS: `~/Library/Application Support/splunkd-monitor/config.json`
/// - Windows: `%AppData%\splunkd-monitor\config\config.json`
pub fn default_config_path() -> Result<PathBuf, anyhow::Error> {
    let proj_dirs = directories::ProjectDirs::from("", "", CONFIG_DIR_NAME)
        .context("Failed to determine project directories")?;

    Ok(proj_dirs.config_dir().join(CONFIG_FILE_NAME))
}
