//! Prometheus metrics exporter.
//!
//! Serves metrics collected by the `metrics` crate in Prometheus text format
//! at `/metrics`, using `metrics-exporter-prometheus`.
//!
//! # Example
//!
//! ```rust,ignore
//! use splunkd_client::MetricsExporter;
//!
//! let exporter = MetricsExporter::install("127.0.0.1:9090")?;
//! // Exporter runs until the process exits
//! ```

use std::net::SocketAddr;

use metrics_exporter_prometheus::{Matcher, PrometheusBuilder};

use crate::metrics::{METRIC_POLL_DURATION, METRIC_POLL_STEP_DURATION, METRIC_REQUEST_DURATION};

/// Metrics exporter for Prometheus scraping.
pub struct MetricsExporter {
    bind_addr: SocketAddr,
}

impl MetricsExporter {
    /// Install the Prometheus exporter as the global metrics recorder.
    ///
    /// # Errors
    /// Returns an error if the bind address is invalid, another recorder is
    /// already installed, or the HTTP listener cannot be built.
    pub fn install(bind_addr: &str) -> Result<Self, MetricsExporterError> {
        let addr: SocketAddr = bind_addr
            .parse()
            .map_err(|e| MetricsExporterError::InvalidBindAddress(bind_addr.to_string(), e))?;

        PrometheusBuilder::new()
            .set_buckets_for_metric(
                Matcher::Full(METRIC_REQUEST_DURATION.to_string()),
                &[
                    0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
                ],
            )?
            .set_buckets_for_metric(
                Matcher::Full(METRIC_POLL_STEP_DURATION.to_string()),
                &[0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0],
            )?
            .set_buckets_for_metric(
                Matcher::Full(METRIC_POLL_DURATION.to_string()),
                &[0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0],
            )?
            .with_http_listener(addr)
            .install()
            .map_err(|_| MetricsExporterError::RecorderAlreadyInstalled)?;

        Ok(Self { bind_addr: addr })
    }

    /// Get the bind address.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

/// Errors that can occur when installing the metrics exporter.
#[derive(Debug, thiserror::Error)]
pub enum MetricsExporterError {
    /// Invalid bind address provided.
    #[error("Invalid bind address '{0}': {1}")]
    InvalidBindAddress(String, std::net::AddrParseError),

    /// A metrics recorder is already installed.
    #[error("A metrics recorder is already installed")]
    RecorderAlreadyInstalled,

    /// Failed to build the Prometheus recorder.
    #[error("Failed to build Prometheus recorder: {0}")]
    BuildError(String),
}

impl From<metrics_exporter_prometheus::BuildError> for MetricsExporterError {
    fn from(err: metrics_exporter_prometheus::BuildError) -> Self {
        MetricsExporterError::BuildError(err.to_string())
    }
}
