//! Config file reading.
//!
//! A missing file is not an error: the loader falls back to built-in defaults.

use std::path::Path;

use super::error::ConfigError;
use crate::types::MonitorConfig;

/// Read `path` if it exists.
pub(crate) fn read_config_file(path: &Path) -> Result<Option<MonitorConfig>, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(None);
        }
        Err(source) => {
            return Err(ConfigError::ConfigFileRead {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| ConfigError::ConfigFileParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}
