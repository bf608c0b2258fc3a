//! Octolink: a same-host web crawler
//!
//! This crate recursively discovers the resources (pages, scripts, images,
//! media) reachable from a seed URL, staying on the seed's hostname and
//! within a configured link depth, and records every discovered URL in a
//! local SQLite store, deduplicated across runs.

pub mod crawler;
pub mod output;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for octolink operations
#[derive(Debug, Error)]
pub enum OctoError {
    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// URL classification errors
///
/// Every variant means the URL cannot be classified; the orchestrator treats
/// all of them as "out of scope", never as a crawl-fatal condition.
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("malformed URL (missing scheme separator): {0}")]
    MissingScheme(String),

    #[error("malformed URL (empty authority): {0}")]
    MissingHost(String),

    #[error("hostname {host} not found in {url}")]
    HostNotFound { url: String, host: String },
}

/// Result type alias for octolink operations
pub type Result<T> = std::result::Result<T, OctoError>;

/// Result type alias for URL classification
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use crawler::{Coordinator, CrawlStats};
pub use storage::{UrlRecord, UrlStore};
pub use crate::url::{depth_of, hostname_of, is_in_scope};
