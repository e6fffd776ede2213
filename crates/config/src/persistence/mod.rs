//! Writing the configuration file.
//!
//! Responsibilities:
//! - Create the default configuration file on request.
//! - Save a `MonitorConfig` after saved hosts change.
//!
//! Does NOT handle:
//! - Loading or merging configuration (see `loader`).
//!
//! Invariants:
//! - An existing file is never overwritten by `write_default_config` unless forced.
//! - Writes go through a sibling temp file and a rename.

use std::path::{Path, PathBuf};

mod path;

pub use path::default_config_path;

use crate::loader::ConfigError;
use crate::types::MonitorConfig;

/// Write `config` to `path`, creating parent directories as needed.
pub fn save_config(path: &Path, config: &MonitorConfig) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let body = serde_json::to_string_pretty(config).map_err(|e| ConfigError::ConfigFileParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, body)?;
    std::fs::rename(&tmp, path)?;
    tracing::info!(path = %path.display(), "Saved configuration");
    Ok(())
}

/// Create a configuration file holding the built-in defaults.
pub fn write_default_config(path: &Path, force: bool) -> Result<PathBuf, ConfigError> {
    if path.exists() && !force {
        return Err(ConfigError::ConfigFileExists(path.to_path_buf()));
    }
    save_config(path, &MonitorConfig::default())?;
    Ok(path.to_path_buf())
}
