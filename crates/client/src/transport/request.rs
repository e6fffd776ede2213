//! Request dispatch with rate-limit backoff.
//!
//! HTTP 429 responses are retried with exponential backoff (1s, 2s, 4s = 2^attempt).
//! Every other response is handed back unchanged; [`check_status`] turns a
//! non-success response into [`ClientError::ApiError`] for callers that want it.

use std::time::Instant;

use reqwest::{RequestBuilder, Response};
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::models::SplunkMessages;

/// Send a request, retrying HTTP 429 up to `max_retries` times.
///
/// # Errors
///
/// Returns `ClientError::MaxRetriesExceeded` when every attempt was rate limited,
/// and propagates `reqwest` failures as `ClientError::HttpError`.
pub(crate) async fn send_with_backoff(
    builder: RequestBuilder,
    max_retries: usize,
    endpoint: &str,
    metrics: Option<&MetricsCollector>,
) -> Result<Response> {
    let method = builder
        .try_clone()
        .and_then(|b| b.build().ok())
        .map(|r| r.method().to_string())
        .unwrap_or_else(|| "UNKNOWN".to_string());

    for attempt in 0..=max_retries {
        let attempt_builder = match builder.try_clone() {
            Some(cloned) => cloned,
            None if attempt == 0 => {
                debug!("Request builder cannot be cloned, single attempt only");
                return timed_send(builder, endpoint, &method, metrics).await;
            }
            None => return Err(ClientError::MaxRetriesExceeded(attempt)),
        };

        let response = timed_send(attempt_builder, endpoint, &method, metrics).await?;
        if response.status().as_u16() != 429 {
            if attempt > 0 {
                debug!(attempt = attempt + 1, "Request succeeded after retry");
            }
            return Ok(response);
        }

        if attempt < max_retries {
            let backoff_secs = 2u64.pow(attempt as u32);
            debug!(
                endpoint,
                attempt = attempt + 1,
                max_retries = max_retries + 1,
                backoff_secs,
                "Rate limited (HTTP 429), retrying with exponential backoff"
            );
            if let Some(m) = metrics {
                m.record_retry(endpoint, attempt + 1);
            }
            tokio::time::sleep(tokio::time::Duration::from_secs(backoff_secs)).await;
        }
    }

    debug!(endpoint, "Max retries exhausted for rate-limited request");
    let err = ClientError::MaxRetriesExceeded(max_retries + 1);
    if let Some(m) = metrics {
        m.record_error(endpoint, &err);
    }
    Err(err)
}

async fn timed_send(
    builder: RequestBuilder,
    endpoint: &str,
    method: &str,
    metrics: Option<&MetricsCollector>,
) -> Result<Response> {
    let started = Instant::now();
    let result = builder.send().await;
    if let Some(m) = metrics {
        let status = result.as_ref().ok().map(|r| r.status().as_u16());
        m.record_request_duration(endpoint, method, started.elapsed(), status);
    }
    result.map_err(|e| {
        let err = ClientError::from(e);
        if let Some(m) = metrics {
            m.record_error(endpoint, &err);
        }
        err
    })
}

/// Pass a successful response through, or convert it into `ClientError::ApiError`.
///
/// Splunk's `{"messages": [...]}` error bodies are flattened to `TYPE: text` pairs.
pub(crate) async fn check_status(response: Response) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let url = response.url().to_string();
    let request_id = response
        .headers()
        .get("X-Splunk-Request-Id")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string());
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Could not read error response body".to_string());

    let message = match serde_json::from_str::<SplunkMessages>(&body) {
        Ok(m) => m.joined(),
        Err(_) => body,
    };

    Err(ClientError::ApiError {
        status,
        url,
        message,
        request_id,
    })
}
