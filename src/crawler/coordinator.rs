//! Crawl coordinator - the recursive traversal driver
//!
//! For each candidate URL the coordinator consults the classifier, the
//! run-scoped in-flight set, and the store's existence check, probes and
//! possibly fetches the resource, records it, extracts its links, and
//! pushes the new candidates onto the work stack. Traversal is depth-first:
//! the stack replaces the reference design's call-stack recursion and keeps
//! the same at-most-once dispatch guarantee per URL.

use crate::crawler::fetcher::{build_fetch_client, build_probe_client, fetch, probe};
use crate::crawler::parser::extract_links;
use crate::url::{depth_of, hostname_of, is_in_scope};
use crate::{OctoError, UrlStore};
use reqwest::Client;
use std::collections::HashSet;
use url::Url;

/// Progress counters for one crawl run
///
/// Purely observational; never persisted. Both counters only grow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Distinct candidate URLs dispatched for processing
    pub discovered: u64,

    /// URL records durably added to the store
    pub added: u64,
}

/// Crawl orchestrator for a single run
pub struct Coordinator<'a> {
    store: &'a UrlStore,
    fetch_client: Client,
    probe_client: Client,
    max_depth: u32,
    root_hostname: String,
    /// URLs already dispatched during this run. Run-scoped on purpose:
    /// cross-run deduplication is the store's existence check.
    in_flight: HashSet<String>,
    stats: CrawlStats,
}

impl<'a> Coordinator<'a> {
    /// Creates a coordinator for one crawl rooted at `seed_url`
    ///
    /// # Errors
    ///
    /// Fails when the seed URL has no extractable hostname or when the
    /// HTTP clients cannot be built.
    pub fn new(store: &'a UrlStore, seed_url: &str, max_depth: u32) -> Result<Self, OctoError> {
        let root_hostname = hostname_of(seed_url)?.to_string();

        Ok(Self {
            store,
            fetch_client: build_fetch_client()?,
            probe_client: build_probe_client()?,
            max_depth,
            root_hostname,
            in_flight: HashSet::new(),
            stats: CrawlStats::default(),
        })
    }

    /// Runs the crawl to frontier exhaustion and returns the final counters
    ///
    /// Per-URL failures (scope rejections, probe/fetch errors, duplicates)
    /// are logged and skipped; only database errors propagate.
    pub async fn run(&mut self, seed_url: &str) -> Result<CrawlStats, OctoError> {
        tracing::info!(
            "Starting crawl of {} (hostname {}, max depth {})",
            seed_url,
            self.root_hostname,
            self.max_depth
        );

        let mut stack = vec![seed_url.to_string()];
        self.in_flight.insert(seed_url.to_string());
        self.stats.discovered = 1;

        while let Some(url) = stack.pop() {
            self.visit(&url, &mut stack).await?;
        }

        tracing::info!(
            "Crawl complete: {} URLs dispatched, {} added",
            self.stats.discovered,
            self.stats.added
        );

        Ok(self.stats)
    }

    /// Processes a single candidate URL
    ///
    /// Terminal outcomes (return without pushing children):
    /// 1. out of scope
    /// 2. probe failure
    /// 3. redirect target on the root hostname but out of scope
    /// 4. already stored
    /// 5. non-HTML content (recorded as a leaf)
    /// 6. fetch failure
    ///
    /// Otherwise the URL is recorded, its links extracted, and every
    /// not-yet-seen candidate pushed onto the stack.
    async fn visit(&mut self, url: &str, stack: &mut Vec<String>) -> Result<(), OctoError> {
        if !is_in_scope(url, self.max_depth, &self.root_hostname) {
            return Ok(());
        }

        let probe = match probe(&self.probe_client, url).await {
            Ok(p) => p,
            Err(e) => {
                tracing::info!("Skipping {}: could not probe ({})", url, e);
                return Ok(());
            }
        };

        // A probe-reported redirect becomes the effective URL when it stays
        // on the root hostname and re-passes the full scope check.
        let mut effective = url.to_string();
        if let Some(target) = probe.redirect.as_deref() {
            if let Some(resolved) = resolve_redirect(url, target) {
                match hostname_of(&resolved) {
                    Ok(host) if host == self.root_hostname => {
                        if is_in_scope(&resolved, self.max_depth, &self.root_hostname) {
                            tracing::info!("Following redirect {} -> {}", url, resolved);
                            effective = resolved;
                        } else {
                            tracing::info!(
                                "Skipping {}: redirect target {} out of scope",
                                url,
                                resolved
                            );
                            return Ok(());
                        }
                    }
                    // Off-host redirect: keep crawling the original URL
                    _ => {}
                }
            }
        }

        let depth = match depth_of(&effective, &self.root_hostname) {
            Ok(d) => d,
            Err(e) => {
                tracing::info!("Skipping {}: {}", effective, e);
                return Ok(());
            }
        };

        // Cross-run deduplication: whatever was recorded by an earlier run
        // is neither re-fetched nor re-recorded.
        if self.store.exists(&effective)? {
            tracing::info!("Skipping {}: URL already added", effective);
            return Ok(());
        }

        // Non-HTML content is a leaf: record it, never fetch its body
        if let Some(content_type) = probe.content_type.as_deref() {
            if !content_type.contains("text/html") {
                self.store.insert(&effective, depth)?;
                self.stats.added += 1;
                return Ok(());
            }
        }

        let body = match fetch(&self.fetch_client, &effective).await {
            Ok(b) => b,
            Err(e) => {
                tracing::info!("Skipping {}: could not retrieve content ({})", effective, e);
                return Ok(());
            }
        };

        self.store.insert(&effective, depth)?;
        self.stats.added += 1;

        let Ok(base) = Url::parse(&effective) else {
            // Fetch succeeded, so this should not happen; without a base
            // there is nothing to resolve links against.
            return Ok(());
        };

        for link in extract_links(&body, &base) {
            if self.in_flight.insert(link.clone()) {
                self.stats.discovered += 1;
                stack.push(link);
            }
        }

        Ok(())
    }
}

/// Resolves a raw `Location` header value against the probed URL
fn resolve_redirect(url: &str, target: &str) -> Option<String> {
    let target = target.trim();
    if target.is_empty() {
        return None;
    }

    let base = Url::parse(url).ok()?;
    base.join(target).ok().map(|u| u.to_string())
}
