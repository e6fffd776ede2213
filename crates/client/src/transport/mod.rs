//! Transport gateway: authenticated HTTP(S) calls to one splunkd management port.
//!
//! Responsibilities:
//! - Owning the `reqwest::Client`, the base URL and the session key
//! - Structured (`output_mode=json`) GET/POST helpers and a raw pass-through for ad-hoc queries
//! - Converting HTTP and network failures into [`ClientError`]
//!
//! Does NOT handle:
//! - Session lifecycle or teardown decisions (see [`crate::session`])
//! - Interpreting response payloads (see [`crate::endpoints`])
//!
//! Invariants:
//! - Every call except `login` carries `Authorization: Splunk <key>`; without a key it fails with `NotConnected`
//! - After [`Transport::release`] no further request is sent

mod builder;
mod request;

pub use builder::ConnectOptions;

use reqwest::{Method, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::debug;

use crate::adhoc::RestResponse;
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::telemetry::inject_trace_context;

use request::{check_status, send_with_backoff};

/// Live HTTP handle to a splunkd instance.
#[derive(Debug)]
pub struct Transport {
    http: reqwest::Client,
    base_url: String,
    session_key: Option<SecretString>,
    max_retries: usize,
    metrics: Option<MetricsCollector>,
}

impl Transport {
    /// Build the HTTP client for `host:port`. No request is sent.
    pub fn open(host: &str, port: u16, options: &ConnectOptions) -> Result<Self> {
        let base_url = options.base_url(host, port);
        url::Url::parse(&base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;

        Ok(Self {
            http: options.build_http_client()?,
            base_url,
            session_key: None,
            max_retries: options.max_retries,
            metrics: options.metrics.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_authenticated(&self) -> bool {
        self.session_key.is_some()
    }

    /// Drop the session key. Subsequent calls fail with `NotConnected`.
    pub fn release(&mut self) {
        self.session_key = None;
    }

    /// `POST /services/auth/login` and keep the returned session key.
    pub async fn login(&mut self, username: &str, password: &SecretString) -> Result<()> {
        debug!("Logging in to splunkd as {}", username);

        let path = "/services/auth/login";
        let builder = self
            .http
            .post(self.url(path))
            .form(&[("username", username), ("password", password.expose_secret())])
            .query(&[("output_mode", "json")]);

        let response =
            send_with_backoff(builder, self.max_retries, path, self.metrics.as_ref()).await?;
        let response = check_status(response).await.map_err(|e| match e {
            ClientError::ApiError { status: 401, message, .. } => ClientError::AuthFailed(message),
            other => other,
        })?;

        let body: Value = response.json().await?;
        let key = body["sessionKey"]
            .as_str()
            .or_else(|| body["entry"][0]["content"]["sessionKey"].as_str())
            .ok_or_else(|| {
                ClientError::InvalidResponse("Missing sessionKey in response".to_string())
            })?;

        self.session_key = Some(SecretString::new(key.to_string().into()));
        Ok(())
    }

    /// Authenticated GET with `output_mode=json&count=-1`, returning the parsed body.
    pub async fn get_json(&self, path: &str, query: &[(&str, &str)]) -> Result<Value> {
        let builder = self
            .authorized(Method::GET, path)?
            .query(&[("output_mode", "json"), ("count", "-1")])
            .query(query);
        let response = self.send_checked(builder, path).await?;
        response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(format!("{path}: {e}")))
    }

    /// Authenticated GET of a plain-text body, used for single property values.
    pub async fn get_text(&self, path: &str) -> Result<String> {
        let builder = self.authorized(Method::GET, path)?;
        let response = self.send_checked(builder, path).await?;
        Ok(response.text().await?)
    }

    /// Authenticated form POST with `output_mode=json`. An empty body yields `Value::Null`.
    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Result<Value> {
        let builder = self
            .authorized(Method::POST, path)?
            .query(&[("output_mode", "json")])
            .form(form);
        let response = self.send_checked(builder, path).await?;
        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body)
            .map_err(|e| ClientError::InvalidResponse(format!("{path}: {e}")))
    }

    /// Authenticated form POST that checks the status and discards the body.
    pub async fn post_status(&self, path: &str, form: &[(&str, &str)]) -> Result<()> {
        let builder = self.authorized(Method::POST, path)?.form(form);
        self.send_checked(builder, path).await?;
        Ok(())
    }

    /// Authenticated request whose response is returned whatever its status, except 401.
    pub async fn send_raw(
        &self,
        method: Method,
        path: &str,
        params: &[(String, String)],
        body: Option<&str>,
    ) -> Result<RestResponse> {
        let mut builder = self.authorized(method, path)?.query(params);
        if let Some(body) = body {
            builder = builder
                .header(reqwest::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(body.to_string());
        }

        let response =
            send_with_backoff(builder, self.max_retries, path, self.metrics.as_ref()).await?;
        if response.status().as_u16() == 401 {
            return Err(check_status(response).await.err().unwrap_or(ClientError::SessionExpired));
        }
        RestResponse::from_response(response).await
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn authorized(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let key = self.session_key.as_ref().ok_or(ClientError::NotConnected)?;
        let builder = self
            .http
            .request(method, self.url(path))
            .header("Authorization", format!("Splunk {}", key.expose_secret()));
        Ok(inject_trace_context(builder))
    }

    async fn send_checked(&self, builder: RequestBuilder, path: &str) -> Result<reqwest::Response> {
        let response =
            send_with_backoff(builder, self.max_retries, path, self.metrics.as_ref()).await?;
        check_status(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_paths() {
        let transport = Transport::open("localhost", 8089, &ConnectOptions::new()).unwrap();
        assert_eq!(
            transport.url("/services/server/info"),
            "https://localhost:8089/services/server/info"
        );
        assert_eq!(
            transport.url("services/apps/local"),
            "https://localhost:8089/services/apps/local"
        );
    }

    #[test]
    fn test_unauthenticated_requests_fail_fast() {
        let transport = Transport::open("localhost", 8089, &ConnectOptions::new()).unwrap();
        assert!(!transport.is_authenticated());
        assert!(matches!(
            transport.authorized(Method::GET, "/services/server/info"),
            Err(ClientError::NotConnected)
        ));
    }

    #[test]
    fn test_open_rejects_unparseable_host() {
        let result = Transport::open("bad host", 8089, &ConnectOptions::new());
        assert!(matches!(result, Err(ClientError::InvalidUrl(_))));
    }
}
