//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the shared HTTP clients
//! - HEAD probes to learn redirects and Content-Type cheaply
//! - GET requests to fetch page content
//! - Error classification into skip conditions

use reqwest::{header, redirect::Policy, Client};
use std::time::Duration;
use thiserror::Error;

/// Per-request timeout for both probes and fetches
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(3);

/// Metadata learned from a HEAD probe
#[derive(Debug, Clone, Default)]
pub struct Probe {
    /// Raw `Location` header, present when the server redirects.
    /// May be relative; the caller resolves it against the probed URL.
    pub redirect: Option<String>,

    /// `Content-Type` header value, if declared
    pub content_type: Option<String>,
}

/// A failed probe or fetch
///
/// Every variant is a non-fatal, skip-and-continue condition for the
/// orchestrator; no fetch failure ever aborts the crawl.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed")]
    Connect,

    #[error("too many redirects")]
    RedirectLimit,

    #[error("invalid URL or scheme")]
    InvalidUrl,

    #[error("failed to decode response body")]
    Decode,

    #[error("request failed: {0}")]
    Other(reqwest::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_connect() {
            Self::Connect
        } else if e.is_redirect() {
            Self::RedirectLimit
        } else if e.is_builder() || e.is_request() {
            Self::InvalidUrl
        } else if e.is_decode() || e.is_body() {
            Self::Decode
        } else {
            Self::Other(e)
        }
    }
}

/// Builds the shared HTTP client used for full content fetches
///
/// Redirects are followed automatically (reqwest's default 10-hop limit
/// yields [`FetchError::RedirectLimit`] when exceeded). The client pools
/// connections and is reused for every fetch of a crawl run.
pub fn build_fetch_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Builds the HTTP client used for HEAD probes
///
/// Automatic redirects are disabled so the `Location` header of the first
/// response stays observable.
pub fn build_probe_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .redirect(Policy::none())
        .build()
}

/// Sends a HEAD request and reports the redirect target and content type
///
/// The response status is not interpreted; only the headers matter here.
/// Transport failures map into [`FetchError`] skip conditions.
pub async fn probe(client: &Client, url: &str) -> Result<Probe, FetchError> {
    let response = client.head(url).send().await?;

    let header_str = |name: header::HeaderName| {
        response
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string())
    };

    Ok(Probe {
        redirect: header_str(header::LOCATION),
        content_type: header_str(header::CONTENT_TYPE),
    })
}

/// Fetches the full body of a URL with the shared session
pub async fn fetch(client: &Client, url: &str) -> Result<String, FetchError> {
    let response = client.get(url).send().await?;
    Ok(response.text().await?)
}
