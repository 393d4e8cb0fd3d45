//! Blocking Graph API client.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;
use usage_core::error::{ReportError, Result};

/// User agent string for API requests.
const USER_AGENT_VALUE: &str = concat!("app-usage-report/", env!("CARGO_PKG_VERSION"));

/// Error bodies longer than this are cut before they reach an error message.
const MAX_ERROR_BODY: usize = 512;

/// Authenticated client for one Graph endpoint.
#[derive(Debug, Clone)]
pub struct GraphClient {
    http: Client,
    base_url: String,
}

impl GraphClient {
    /// Create a client that sends `token` as a bearer credential.
    ///
    /// # Arguments
    /// * `base_url` - API root, e.g. `https://graph.microsoft.com/beta`
    /// * `token` - OAuth access token
    /// * `timeout_secs` - per-request timeout
    pub fn new(base_url: &str, token: &str, timeout_secs: u64) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| ReportError::Config("access token contains invalid characters".into()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/csv"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ReportError::Http(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of a collection or function below the base URL.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GET `url` and return the body as text, or `None` on 404.
    pub fn get_text(&self, url: &str) -> Result<Option<String>> {
        let response = self.send(url, &[])?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = Self::check_status(url, response)?;
        let body = response
            .text()
            .map_err(|e| ReportError::Http(format!("failed to read response from {url}: {e}")))?;
        Ok(Some(body))
    }

    /// GET `url` with `query` parameters and decode the JSON body.
    pub fn get_json(&self, url: &str, query: &[(&str, &str)]) -> Result<Value> {
        let response = Self::check_status(url, self.send(url, query)?)?;
        let body = response
            .text()
            .map_err(|e| ReportError::Http(format!("failed to read response from {url}: {e}")))?;
        Ok(serde_json::from_str(&body)?)
    }

    fn send(&self, url: &str, query: &[(&str, &str)]) -> Result<Response> {
        debug!("GET {}", url);
        self.http
            .get(url)
            .query(query)
            .send()
            .map_err(|e| ReportError::Http(format!("request to {url} failed: {e}")))
    }

    fn check_status(url: &str, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        Err(ReportError::HttpStatus {
            status: status.as_u16(),
            url: url.to_string(),
            body: truncate(&body, MAX_ERROR_BODY),
        })
    }
}

/// Cut `text` to at most `max` bytes on a character boundary.
fn truncate(text: &str, max: usize) -> String {
    if text.len() <= max {
        return text.to_string();
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}
