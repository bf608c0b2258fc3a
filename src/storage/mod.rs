//! Storage module for persisting discovered URLs
//!
//! This module owns the durable store: schema bootstrap, insert-if-new
//! support, existence lookup by URL, and full-table retrieval. Records are
//! created exactly once per URL and never updated or deleted by the crawl;
//! deletion only happens through an explicit `--reset`, which discards and
//! recreates the whole store.

mod schema;
mod sqlite;

pub use schema::initialize_schema;
pub use sqlite::UrlStore;

/// A persisted URL record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    /// Surrogate identifier assigned by the store, monotonically increasing
    pub id: i64,

    /// Absolute URL string, unique within the store
    pub url: String,

    /// True iff the URL uses the encrypted scheme; derived at insert time
    pub secure: bool,

    /// Non-empty path segments after the hostname; derived at insert time
    pub depth: u32,
}
