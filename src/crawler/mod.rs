//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic:
//! - HEAD probing and GET fetching with a shared session
//! - HTML parsing and link extraction
//! - Depth-first crawl coordination with per-run deduplication

mod coordinator;
mod fetcher;
mod parser;

pub use coordinator::{Coordinator, CrawlStats};
pub use fetcher::{
    build_fetch_client, build_probe_client, fetch, probe, FetchError, Probe, REQUEST_TIMEOUT,
};
pub use parser::extract_links;

use crate::{OctoError, UrlStore};

/// Runs a complete crawl from `seed_url` against the given store
///
/// This is the main entry point for starting a crawl: it builds the HTTP
/// clients, walks the link graph depth-first within `max_depth` of the
/// seed's hostname, and records every in-scope discovery.
///
/// # Returns
///
/// The final progress counters, or an error when the seed is malformed or
/// the database fails.
pub async fn crawl(store: &UrlStore, seed_url: &str, max_depth: u32) -> Result<CrawlStats, OctoError> {
    let mut coordinator = Coordinator::new(store, seed_url, max_depth)?;
    coordinator.run(seed_url).await
}
