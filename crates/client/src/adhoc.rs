//! Ad-hoc REST queries.
//!
//! Responsibilities:
//! - Splitting a caller-supplied URI into path and inline query parameters
//! - Merging separately supplied parameters over the inline ones
//! - Dispatching GET, POST or DELETE and returning the raw response as text
//!
//! Does NOT handle:
//! - Decoding the body; output is rendered as plain text
//!
//! Invariants:
//! - Malformed URIs are rejected before anything is sent
//! - Non-2xx responses are results, not errors. HTTP 401 is the exception: it is an
//!   authentication failure and tears the session down

use std::fmt;
use std::str::FromStr;

use percent_encoding::percent_decode_str;
use reqwest::Method;
use serde::Serialize;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "DELETE" => Ok(Self::Delete),
            other => Err(ClientError::ValidationError(format!(
                "Unsupported method '{other}' (expected GET, POST or DELETE)"
            ))),
        }
    }
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Delete => Method::DELETE,
        }
    }
}

/// Split `path?k=v&k=v` into the path and its decoded parameters.
///
/// Values may contain `=`; only the first one separates key and value.
///
/// # Errors
///
/// `ClientError::ValidationError` for an empty path, a pair without `=`
/// (which covers an empty query and a trailing `&`) or a second `?`.
pub fn parse_uri(uri: &str) -> Result<(String, Vec<(String, String)>)> {
    let uri = uri.trim();
    let (path, query) = match uri.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (uri, None),
    };
    if path.is_empty() {
        return Err(ClientError::ValidationError(format!("No path in '{uri}'")));
    }

    let Some(query) = query else {
        return Ok((path.to_string(), Vec::new()));
    };
    if query.contains('?') {
        return Err(ClientError::ValidationError(format!(
            "More than one '?' in '{uri}'"
        )));
    }

    let params = query
        .split('&')
        .map(|pair| {
            pair.split_once('=')
                .map(|(k, v)| (decode(k), decode(v)))
                .ok_or_else(|| {
                    ClientError::ValidationError(format!(
                        "Query parameter '{pair}' in '{uri}' is not of the form key=value"
                    ))
                })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok((path.to_string(), params))
}

fn decode(s: &str) -> String {
    percent_decode_str(s).decode_utf8_lossy().into_owned()
}

/// Inline parameters followed by explicit ones; an explicit key replaces
/// every inline parameter of the same name.
pub fn merge_params(
    inline: Vec<(String, String)>,
    explicit: &[(String, String)],
) -> Vec<(String, String)> {
    let mut merged: Vec<(String, String)> = inline
        .into_iter()
        .filter(|(key, _)| !explicit.iter().any(|(k, _)| k == key))
        .collect();
    merged.extend(explicit.iter().cloned());
    merged
}

/// Raw response of an ad-hoc query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestResponse {
    pub status: u16,
    pub reason: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RestResponse {
    pub(crate) async fn from_response(response: reqwest::Response) -> Result<Self> {
        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.text().await?;

        Ok(Self {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body,
        })
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// `HTTP <status> <reason>`, a blank line, one `name: value` line per
    /// header, a blank line, then the body.
    pub fn to_plaintext(&self) -> String {
        let mut out = format!("HTTP {} {}\n\n", self.status, self.reason);
        for (name, value) in &self.headers {
            out.push_str(name);
            out.push_str(": ");
            out.push_str(value);
            out.push('\n');
        }
        out.push('\n');
        out.push_str(&self.body);
        out
    }
}

impl Session {
    /// Send an ad-hoc request and return the raw response.
    ///
    /// # Errors
    ///
    /// `ValidationError` for a malformed URI, `NotConnected` on a torn-down
    /// session. HTTP 401 and transport failures tear the session down.
    pub async fn execute(
        &mut self,
        method: HttpMethod,
        uri: &str,
        params: &[(String, String)],
        body: Option<&str>,
    ) -> Result<RestResponse> {
        let (path, inline) = parse_uri(uri)?;
        let params = merge_params(inline, params);
        debug!(%method, path = %path, params = params.len(), "Executing ad-hoc request");

        let transport = self.transport()?;
        let result = transport.send_raw(method.into(), &path, &params, body).await;
        result.map_err(|e| self.fail(e))
    }
}
