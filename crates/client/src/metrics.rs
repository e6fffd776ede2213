//! Metrics collection for splunkd calls and poll cycles.
//!
//! This module provides metrics collection for:
//! - Request latency histograms and request counters
//! - Errors labelled by failure kind
//! - Poll step and poll cycle durations
//! - Session teardowns
//!
//! # What this module does NOT handle:
//! - Metrics exposition/export (see `metrics_exporter`)
//!
//! # Invariants
//! - All metrics use consistent label names: `endpoint`, `method`, `status`, `kind`, `step`
//! - Metric recording is infallible
//! - Zero-cost when no metrics recorder is installed

use crate::error::{ClientError, FailureKind};
use std::time::Duration;

/// Metric name for request duration histogram.
pub const METRIC_REQUEST_DURATION: &str = "splunkd_api_request_duration_seconds";

/// Metric name for total request counter.
pub const METRIC_REQUESTS_TOTAL: &str = "splunkd_api_requests_total";

/// Metric name for retry counter.
pub const METRIC_RETRIES_TOTAL: &str = "splunkd_api_retries_total";

/// Metric name for error counter.
pub const METRIC_ERRORS_TOTAL: &str = "splunkd_api_errors_total";

/// Metric name for per-step poll duration histogram.
pub const METRIC_POLL_STEP_DURATION: &str = "splunkd_poll_step_duration_seconds";

/// Metric name for full poll duration histogram.
pub const METRIC_POLL_DURATION: &str = "splunkd_poll_duration_seconds";

/// Metric name for session teardown counter.
pub const METRIC_SESSION_TEARDOWNS: &str = "splunkd_session_teardowns_total";

/// Metrics collector for splunkd calls.
///
/// A lightweight wrapper around the `metrics` crate macros with consistent labels.
#[derive(Debug, Clone, Default)]
pub struct MetricsCollector {
    enabled: bool,
}

impl MetricsCollector {
    /// Create an enabled collector.
    pub fn new() -> Self {
        Self { enabled: true }
    }

    /// Create a collector that records nothing.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    /// Check if metrics collection is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record the duration and outcome of one HTTP request.
    pub fn record_request_duration(
        &self,
        endpoint: &str,
        method: &str,
        duration: Duration,
        status: Option<u16>,
    ) {
        if !self.enabled {
            return;
        }

        let status_label = status.map_or("error".to_string(), |s| s.to_string());

        metrics::histogram!(METRIC_REQUEST_DURATION,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
            "status" => status_label.clone(),
        )
        .record(duration.as_secs_f64());

        metrics::counter!(METRIC_REQUESTS_TOTAL,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
            "status" => status_label,
        )
        .increment(1);
    }

    /// Record a rate-limit retry.
    pub fn record_retry(&self, endpoint: &str, attempt: usize) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_RETRIES_TOTAL,
            "endpoint" => endpoint.to_string(),
            "attempt" => attempt.to_string(),
        )
        .increment(1);
    }

    /// Record an error by its failure kind.
    pub fn record_error(&self, endpoint: &str, error: &ClientError) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_ERRORS_TOTAL,
            "endpoint" => endpoint.to_string(),
            "kind" => error.kind().as_str(),
        )
        .increment(1);
    }

    /// Record how long one poll step took.
    pub fn record_poll_step(&self, step: &'static str, duration: Duration) {
        if !self.enabled {
            return;
        }

        metrics::histogram!(METRIC_POLL_STEP_DURATION, "step" => step)
            .record(duration.as_secs_f64());
    }

    /// Record a full poll cycle.
    pub fn record_poll(&self, duration: Duration, success: bool) {
        if !self.enabled {
            return;
        }

        metrics::histogram!(METRIC_POLL_DURATION,
            "outcome" => if success { "success" } else { "failure" },
        )
        .record(duration.as_secs_f64());
    }

    /// Record a session teardown and what caused it.
    pub fn record_teardown(&self, cause: Option<FailureKind>) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_SESSION_TEARDOWNS,
            "cause" => cause.map_or("disconnect", |k| k.as_str()),
        )
        .increment(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_enabled_flags() {
        assert!(MetricsCollector::new().is_enabled());
        assert!(!MetricsCollector::disabled().is_enabled());
        assert!(!MetricsCollector::default().is_enabled());
    }

    #[test]
    fn test_recording_without_recorder_is_noop() {
        let collector = MetricsCollector::new();
        collector.record_request_duration(
            "/services/server/info",
            "GET",
            Duration::from_millis(5),
            Some(200),
        );
        collector.record_retry("/services/server/info", 1);
        collector.record_error("/services/server/info", &ClientError::SessionExpired);
        collector.record_poll_step("apps", Duration::from_millis(1));
        collector.record_poll(Duration::from_millis(10), true);
        collector.record_teardown(Some(FailureKind::Transport));
    }
}
