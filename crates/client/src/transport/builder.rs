//! Connection options and HTTP client construction.
//!
//! Responsibilities:
//! - Fluent [`ConnectOptions`] for scheme, TLS verification, timeout and retries
//! - Building the `reqwest::Client` with a bounded redirect policy
//!
//! Does NOT handle:
//! - Authentication (see [`super::Transport::login`])
//!
//! Invariants:
//! - The base URL never carries a trailing slash
//! - `skip_verify` only affects HTTPS connections; HTTP connections log a warning

use std::time::Duration;

use splunkd_config::{
    ConnectionConfig, Scheme,
    constants::{DEFAULT_MAX_REDIRECTS, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS},
};

use crate::error::Result;
use crate::metrics::MetricsCollector;

/// Tuning applied when a session opens its transport.
#[derive(Debug, Clone)]
pub struct ConnectOptions {
    pub scheme: Scheme,
    pub skip_verify: bool,
    pub timeout: Duration,
    pub max_retries: usize,
    pub metrics: Option<MetricsCollector>,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            scheme: Scheme::Https,
            skip_verify: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            metrics: None,
        }
    }
}

impl ConnectOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ConnectionConfig) -> Self {
        Self {
            scheme: config.scheme,
            skip_verify: config.skip_verify,
            timeout: config.timeout,
            max_retries: config.max_retries,
            metrics: None,
        }
    }

    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn with_skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = skip;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, retries: usize) -> Self {
        self.max_retries = retries;
        self
    }

    pub fn with_metrics(mut self, metrics: MetricsCollector) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// `scheme://host:port` with no trailing slash.
    pub fn base_url(&self, host: &str, port: u16) -> String {
        normalize_base_url(format!("{}://{}:{}", self.scheme, host.trim(), port))
    }

    pub(crate) fn build_http_client(&self) -> Result<reqwest::Client> {
        let mut http_builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(DEFAULT_MAX_REDIRECTS));

        if self.skip_verify {
            if self.scheme == Scheme::Https {
                http_builder = http_builder.danger_accept_invalid_certs(true);
            } else {
                tracing::warn!(
                    "skip_verify=true has no effect on HTTP URLs. TLS verification only applies to HTTPS connections."
                );
            }
        }

        Ok(http_builder.build()?)
    }
}

fn normalize_base_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_preserves_settings() {
        let config = ConnectionConfig {
            scheme: Scheme::Http,
            skip_verify: true,
            timeout: Duration::from_secs(120),
            max_retries: 7,
        };

        let options = ConnectOptions::from_config(&config);

        assert_eq!(options.scheme, Scheme::Http);
        assert!(options.skip_verify);
        assert_eq!(options.timeout, Duration::from_secs(120));
        assert_eq!(options.max_retries, 7);
        assert!(options.metrics.is_none());
    }

    #[test]
    fn test_base_url_uses_scheme_and_port() {
        let options = ConnectOptions::new();
        assert_eq!(
            options.base_url("splunk.example.com", 8089),
            "https://splunk.example.com:8089"
        );
        let options = options.with_scheme(Scheme::Http);
        assert_eq!(options.base_url(" idx01 ", 18089), "http://idx01:18089");
    }

    #[test]
    fn test_normalize_base_url_trailing_slashes() {
        assert_eq!(
            normalize_base_url("https://example.com:8089//".to_string()),
            "https://example.com:8089"
        );
    }

    #[test]
    fn test_build_http_client_with_skip_verify() {
        assert!(ConnectOptions::new().with_skip_verify(true).build_http_client().is_ok());
        assert!(
            ConnectOptions::new()
                .with_scheme(Scheme::Http)
                .with_skip_verify(true)
                .build_http_client()
                .is_ok()
        );
    }
}
