//! Configuration management for splunkd-monitor.
//!
//! This crate provides the login defaults, saved hosts, preset ad-hoc query
//! URIs and connection tuning consumed by the client and the CLI, loaded from
//! `.env`, environment variables and a JSON file.

pub mod constants;
mod loader;
pub mod persistence;
pub mod types;

pub use loader::{
    ConfigError, ConfigLoader, ENV_ADDRESS, ENV_CONFIG_PATH, ENV_MAX_RETRIES, ENV_PASSWORD,
    ENV_POLL_INTERVAL, ENV_SCHEME, ENV_SKIP_VERIFY, ENV_TIMEOUT, ENV_USERNAME, env_var_or_none,
};
pub use persistence::{default_config_path, save_config, write_default_config};
pub use types::{
    ConnectionConfig, DefaultLogin, LoginDetails, MonitorConfig, SavedHost, Scheme,
    normalize_address,
};
