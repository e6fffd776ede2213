//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` for hierarchical configuration merging.
//! - Support loading from the config file, environment variables and direct builder methods.
//! - Validate and build the final `MonitorConfig`.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//! - Writing configuration back to disk (see persistence).
//!
//! Invariants / Assumptions:
//! - Environment variables take precedence over config file values.
//! - Builder methods take precedence over environment variables when called after `from_env`.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

use secrecy::SecretString;
use std::path::PathBuf;
use std::time::Duration;

use super::env::apply_env;
use super::error::ConfigError;
use super::file::read_config_file;
use crate::constants::{MAX_MAX_RETRIES, MAX_POLL_INTERVAL_SECS, MAX_TIMEOUT_SECS};
use crate::persistence::default_config_path;
use crate::types::{MonitorConfig, Scheme};

/// Configuration loader that builds config from the file, env vars and overrides.
#[derive(Default)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    file_config: Option<MonitorConfig>,
    address: Option<String>,
    username: Option<String>,
    password: Option<SecretString>,
    poll_interval_secs: Option<u64>,
    scheme: Option<Scheme>,
    skip_verify: Option<bool>,
    timeout: Option<Duration>,
    max_retries: Option<usize>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var("DOTENV_DISABLED").ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` is set to "true" or "1", the .env file is skipped.
    /// Missing `.env` files are silently ignored.
    ///
    /// SAFETY: Error messages never include raw .env line contents to prevent secret leakage.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    /// Check if a dotenv error indicates the file was not found.
    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Override the config file path.
    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    /// Read environment variables.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    /// Read the config file at the configured path, or the platform default.
    pub fn from_file(mut self) -> Result<Self, ConfigError> {
        let path = self.resolved_config_path()?;
        self.file_config = read_config_file(&path)?;
        self.config_path = Some(path);
        Ok(self)
    }

    /// Set the default address.
    pub fn with_address(mut self, address: String) -> Self {
        self.address = Some(address);
        self
    }

    /// Set the default username.
    pub fn with_username(mut self, username: String) -> Self {
        self.username = Some(username);
        self
    }

    /// Set the default password.
    pub fn with_password(mut self, password: String) -> Self {
        self.password = Some(SecretString::new(password.into()));
        self
    }

    /// Set the watch-mode poll interval.
    pub fn with_poll_interval_secs(mut self, secs: u64) -> Self {
        self.poll_interval_secs = Some(secs);
        self
    }

    /// Set the URL scheme.
    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = Some(scheme);
        self
    }

    /// Set whether to skip TLS verification.
    pub fn with_skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = Some(skip);
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the maximum number of retries.
    pub fn with_max_retries(mut self, retries: usize) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// Path the config file is (or would be) read from.
    pub fn config_path(&self) -> Option<&PathBuf> {
        self.config_path.as_ref()
    }

    pub(crate) fn set_config_path(&mut self, path: Option<PathBuf>) {
        self.config_path = path;
    }

    pub(crate) fn set_address(&mut self, address: Option<String>) {
        self.address = address;
    }

    pub(crate) fn set_username(&mut self, username: Option<String>) {
        self.username = username;
    }

    pub(crate) fn set_password(&mut self, password: Option<SecretString>) {
        self.password = password;
    }

    pub(crate) fn set_poll_interval_secs(&mut self, secs: Option<u64>) {
        self.poll_interval_secs = secs;
    }

    pub(crate) fn set_scheme(&mut self, scheme: Option<Scheme>) {
        self.scheme = scheme;
    }

    pub(crate) fn set_skip_verify(&mut self, skip: Option<bool>) {
        self.skip_verify = skip;
    }

    pub(crate) fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    pub(crate) fn set_max_retries(&mut self, retries: Option<usize>) {
        self.max_retries = retries;
    }

    fn resolved_config_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.config_path {
            Some(path) => Ok(path.clone()),
            None => default_config_path()
                .map_err(|e| ConfigError::ConfigDirUnavailable(format!("{e:#}"))),
        }
    }

    /// Build the final configuration.
    pub fn build(self) -> Result<MonitorConfig, ConfigError> {
        let mut config = self.file_config.unwrap_or_default();

        if let Some(address) = self.address {
            config.defaults.address = address;
        }
        if let Some(username) = self.username {
            config.defaults.username = username;
        }
        if let Some(password) = self.password {
            config.defaults.password = password;
        }
        if let Some(secs) = self.poll_interval_secs {
            config.poll_interval_secs = secs;
        }
        if let Some(scheme) = self.scheme {
            config.connection.scheme = scheme;
        }
        if let Some(skip) = self.skip_verify {
            config.connection.skip_verify = skip;
        }
        if let Some(timeout) = self.timeout {
            config.connection.timeout = timeout;
        }
        if let Some(retries) = self.max_retries {
            config.connection.max_retries = retries;
        }

        validate(&config)?;
        Ok(config)
    }
}

fn validate(config: &MonitorConfig) -> Result<(), ConfigError> {
    let timeout = config.connection.timeout.as_secs();
    if timeout == 0 || timeout > MAX_TIMEOUT_SECS {
        return Err(ConfigError::InvalidTimeout {
            message: format!("must be between 1 and {MAX_TIMEOUT_SECS} seconds (got {timeout})"),
        });
    }

    let retries = config.connection.max_retries;
    if retries > MAX_MAX_RETRIES {
        return Err(ConfigError::InvalidMaxRetries {
            message: format!("must be between 0 and {MAX_MAX_RETRIES} (got {retries})"),
        });
    }

    let interval = config.poll_interval_secs;
    if interval == 0 || interval > MAX_POLL_INTERVAL_SECS {
        return Err(ConfigError::InvalidPollInterval {
            message: format!(
                "must be between 1 and {MAX_POLL_INTERVAL_SECS} seconds (got {interval})"
            ),
        });
    }

    validate_address("defaults.address", &config.defaults.address)?;
    for address in config.hosts.keys() {
        validate_address("hosts", address)?;
    }
    Ok(())
}

/// An address must parse as the authority part of a URL.
fn validate_address(var: &str, address: &str) -> Result<(), ConfigError> {
    let parsed = url::Url::parse(&format!("https://{}", address.trim()));
    match parsed {
        Ok(url) if url.host_str().is_some_and(|h| !h.is_empty()) && url.path() == "/" => Ok(()),
        _ => Err(ConfigError::InvalidValue {
            var: var.to_string(),
            message: format!("'{address}' is not a valid host[:port]"),
        }),
    }
}
