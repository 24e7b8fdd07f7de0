//! Outbound retrieval of the JSON resource to be transcoded.
//!
//! The fetcher is the only place that talks to the network. It validates
//! everything about the upstream response before the body is handed to
//! `serde_json`, so the transcoder only ever sees a parsed value.

use crate::formats::Format;
use log::{debug, warn};
use reqwest::Url;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Default limit for the upstream request, connect through last byte.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Default cap on the upstream body.
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("upstream request timed out")]
    Timeout(#[source] reqwest::Error),

    #[error("upstream request failed: {0}")]
    Network(#[source] reqwest::Error),

    #[error("upstream responded with status {0}")]
    UpstreamStatus(u16),

    #[error("upstream content type '{0}' is not JSON")]
    UnsupportedContentType(String),

    #[error("upstream body exceeds {0} bytes")]
    BodyTooLarge(usize),

    #[error("upstream body is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),
}

impl FetchError {
    fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout(err)
        } else {
            FetchError::Network(err)
        }
    }
}

/// Settings for outbound requests.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub timeout: Duration,
    pub max_body_bytes: usize,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        }
    }
}

/// HTTP client that retrieves and parses JSON resources.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    max_body_bytes: usize,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()
            .map_err(FetchError::Network)?;

        Ok(Self {
            client,
            max_body_bytes: config.max_body_bytes,
        })
    }

    /// GET `url` and parse the response body as JSON.
    pub async fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
        let url = parse_url(url)?;
        debug!("Fetching {}", url);

        let mut response = self
            .client
            .get(url.clone())
            .header(ACCEPT, Format::Json.mime_type())
            .send()
            .await
            .map_err(FetchError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            warn!("Upstream {} responded with {}", url, status);
            return Err(FetchError::UpstreamStatus(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if Format::from_content_type(&content_type) != Some(Format::Json) {
            warn!("Upstream {} returned content type '{}'", url, content_type);
            return Err(FetchError::UnsupportedContentType(content_type));
        }

        if let Some(declared) = response.content_length() {
            if declared > self.max_body_bytes as u64 {
                return Err(FetchError::BodyTooLarge(self.max_body_bytes));
            }
        }

        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(FetchError::from_transport)?
        {
            if body.len() + chunk.len() > self.max_body_bytes {
                return Err(FetchError::BodyTooLarge(self.max_body_bytes));
            }
            body.extend_from_slice(&chunk);
        }
        debug!("Received {} bytes from {}", body.len(), url);

        serde_json::from_slice(&body).map_err(FetchError::InvalidJson)
    }
}

/// Accept only absolute `http` and `https` URLs.
pub fn parse_url(raw: &str) -> Result<Url, FetchError> {
    let invalid = |reason: String| FetchError::InvalidUrl {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme '{}'", other))),
    }
}
