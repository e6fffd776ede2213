//! Top-level monitor configuration: login defaults, saved hosts and presets.
//!
//! Responsibilities:
//! - Hold the default address and credentials offered at startup.
//! - Hold saved `host:port` to credential mappings.
//! - Hold preset ad-hoc query URIs and the watch-mode poll interval.
//! - Resolve which credentials apply to a given address.
//!
//! Does NOT handle:
//! - Reading or writing the file (see `loader` and `persistence`).
//! - Validating that credentials are non-empty (the client does that at connect time).
//!
//! Invariants:
//! - Saved host keys are stored normalized as `host:port`.
//! - Passwords never appear in `Debug` output.

use crate::constants::{
    DEFAULT_ADDRESS, DEFAULT_ENDPOINTS, DEFAULT_PASSWORD, DEFAULT_POLL_INTERVAL_SECS,
    DEFAULT_SPLUNK_PORT, DEFAULT_USERNAME,
};
use crate::types::connection::ConnectionConfig;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Serde helpers that write secrets in clear text to the config file.
mod secret_string {
    use secrecy::{ExposeSecret, SecretString};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        secret.expose_secret().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(SecretString::new(s.into()))
    }

    pub mod option {
        use secrecy::{ExposeSecret, SecretString};
        use serde::{Deserialize, Deserializer, Serialize, Serializer};

        pub fn serialize<S>(secret: &Option<SecretString>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            secret
                .as_ref()
                .map(|s| s.expose_secret().to_string())
                .serialize(serializer)
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = Option::<String>::deserialize(deserializer)?;
            Ok(s.map(|s| SecretString::new(s.into())))
        }
    }
}

/// Normalize an operator-entered address to `host:port`.
///
/// A bare host gets the default management port appended.
pub fn normalize_address(address: &str) -> String {
    let trimmed = address.trim();
    if trimmed.contains(':') {
        trimmed.to_string()
    } else {
        format!("{trimmed}:{DEFAULT_SPLUNK_PORT}")
    }
}

/// Address and credentials pre-filled when no saved host matches.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultLogin {
    pub address: String,
    pub username: String,
    #[serde(with = "secret_string")]
    pub password: SecretString,
}

impl Default for DefaultLogin {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            username: DEFAULT_USERNAME.to_string(),
            password: SecretString::new(DEFAULT_PASSWORD.to_string().into()),
        }
    }
}

/// Credentials remembered for one `host:port`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SavedHost {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(
        default,
        with = "secret_string::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub password: Option<SecretString>,
}

/// Address plus the credentials that apply to it.
#[derive(Debug, Clone)]
pub struct LoginDetails {
    pub address: String,
    pub username: String,
    pub password: SecretString,
}

/// Complete monitor configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub defaults: DefaultLogin,
    pub hosts: BTreeMap<String, SavedHost>,
    pub endpoints: Vec<String>,
    pub poll_interval_secs: u64,
    pub connection: ConnectionConfig,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            defaults: DefaultLogin::default(),
            hosts: BTreeMap::new(),
            endpoints: DEFAULT_ENDPOINTS.iter().map(|e| e.to_string()).collect(),
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            connection: ConnectionConfig::default(),
        }
    }
}

impl MonitorConfig {
    /// Resolve the login for `address`, or for the default address when `None`.
    ///
    /// Saved-host values win over defaults field by field.
    pub fn login_for(&self, address: Option<&str>) -> LoginDetails {
        let address = normalize_address(address.unwrap_or(&self.defaults.address));
        let saved = self.hosts.get(&address);

        let username = saved
            .and_then(|h| h.username.clone())
            .unwrap_or_else(|| self.defaults.username.clone());
        let password = saved
            .and_then(|h| h.password.clone())
            .unwrap_or_else(|| self.defaults.password.clone());

        LoginDetails {
            address,
            username,
            password,
        }
    }

    /// Remember credentials for `address`, replacing any previous entry.
    pub fn save_host(
        &mut self,
        address: &str,
        username: Option<String>,
        password: Option<SecretString>,
    ) -> String {
        let key = normalize_address(address);
        self.hosts
            .insert(key.clone(), SavedHost { username, password });
        key
    }

    /// Saved addresses in sorted order.
    pub fn saved_addresses(&self) -> impl Iterator<Item = &str> {
        self.hosts.keys().map(String::as_str)
    }
}
