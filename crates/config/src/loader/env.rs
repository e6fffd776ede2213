//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read the `SPLUNKD_*` variables and apply them to a `ConfigLoader`.
//! - Provide a helper for reading env vars with empty/whitespace filtering.
//!
//! Does NOT handle:
//! - Loading the config file (see file.rs).
//! - .env file loading (handled by ConfigLoader::load_dotenv).
//!
//! Invariants:
//! - Environment variables take precedence over config file values.
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Invalid numeric values return ConfigError::InvalidValue.

use secrecy::SecretString;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;
use crate::types::Scheme;

pub const ENV_CONFIG_PATH: &str = "SPLUNKD_CONFIG_PATH";
pub const ENV_ADDRESS: &str = "SPLUNKD_ADDRESS";
pub const ENV_USERNAME: &str = "SPLUNKD_USERNAME";
pub const ENV_PASSWORD: &str = "SPLUNKD_PASSWORD";
pub const ENV_POLL_INTERVAL: &str = "SPLUNKD_POLL_INTERVAL";
pub const ENV_SCHEME: &str = "SPLUNKD_SCHEME";
pub const ENV_SKIP_VERIFY: &str = "SPLUNKD_SKIP_VERIFY";
pub const ENV_TIMEOUT: &str = "SPLUNKD_TIMEOUT";
pub const ENV_MAX_RETRIES: &str = "SPLUNKD_MAX_RETRIES";

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn parse_env<T: FromStr>(var: &str, message: &str) -> Result<Option<T>, ConfigError> {
    env_var_or_none(var)
        .map(|raw| {
            raw.parse::<T>().map_err(|_| ConfigError::InvalidValue {
                var: var.to_string(),
                message: message.to_string(),
            })
        })
        .transpose()
}

/// Apply environment variable configuration to the loader.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if loader.config_path().is_none()
        && let Some(path) = env_var_or_none(ENV_CONFIG_PATH)
    {
        loader.set_config_path(Some(PathBuf::from(path)));
    }
    if let Some(address) = env_var_or_none(ENV_ADDRESS) {
        loader.set_address(Some(address));
    }
    if let Some(username) = env_var_or_none(ENV_USERNAME) {
        loader.set_username(Some(username));
    }
    if let Some(password) = env_var_or_none(ENV_PASSWORD) {
        loader.set_password(Some(SecretString::new(password.into())));
    }
    if let Some(interval) = parse_env::<u64>(ENV_POLL_INTERVAL, "must be a number of seconds")? {
        loader.set_poll_interval_secs(Some(interval));
    }
    if let Some(raw) = env_var_or_none(ENV_SCHEME) {
        let scheme = raw
            .parse::<Scheme>()
            .map_err(|message| ConfigError::InvalidValue {
                var: ENV_SCHEME.to_string(),
                message,
            })?;
        loader.set_scheme(Some(scheme));
    }
    if let Some(skip) = parse_env::<bool>(ENV_SKIP_VERIFY, "must be true or false")? {
        loader.set_skip_verify(Some(skip));
    }
    if let Some(secs) = parse_env::<u64>(ENV_TIMEOUT, "must be a number")? {
        loader.set_timeout(Some(Duration::from_secs(secs)));
    }
    if let Some(retries) = parse_env::<usize>(ENV_MAX_RETRIES, "must be a non-negative integer")? {
        loader.set_max_retries(Some(retries));
    }
    Ok(())
}
