//! SQLite persistence gateway
//!
//! Owns the durable store: open/reset, insert-if-new bookkeeping support,
//! existence lookup by URL, and full-table retrieval.

use crate::storage::schema::initialize_schema;
use crate::storage::UrlRecord;
use crate::OctoError;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// SQLite-backed URL store
pub struct UrlStore {
    conn: Connection,
}

impl UrlStore {
    /// Opens (creating and bootstrapping if absent) the store at `path`
    ///
    /// When `reset` is true and a store already exists, the database file
    /// and its WAL sidecars are deleted first, leaving a freshly
    /// bootstrapped, empty store.
    pub fn open(path: &Path, reset: bool) -> Result<Self, OctoError> {
        if reset && path.exists() {
            tracing::info!("Deleting old database file");
            std::fs::remove_file(path)?;
            for suffix in ["-wal", "-shm"] {
                let mut sidecar = path.as_os_str().to_os_string();
                sidecar.push(suffix);
                let _ = std::fs::remove_file(sidecar);
            }
        }

        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory store (for testing)
    pub fn open_in_memory() -> Result<Self, OctoError> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Returns true when a record with exactly this URL string exists
    pub fn exists(&self, url: &str) -> Result<bool, OctoError> {
        let id: Option<i64> = self
            .conn
            .query_row(
                "SELECT id FROM page_url WHERE url = ?1 LIMIT 1",
                params![url],
                |row| row.get(0),
            )
            .optional()?;

        Ok(id.is_some())
    }

    /// Appends a new URL record
    ///
    /// `secure` is derived from the scheme at insert time. The insert is
    /// committed durably before returning (autocommit, no batching).
    pub fn insert(&self, url: &str, depth: u32) -> Result<(), OctoError> {
        tracing::info!("[depth {}] Adding URL {}", depth, url);
        self.conn.execute(
            "INSERT INTO page_url (url, secure, depth) VALUES (?1, ?2, ?3)",
            params![url, url.starts_with("https://"), depth],
        )?;
        Ok(())
    }

    /// Returns every stored record, ordered by id
    pub fn list_all(&self) -> Result<Vec<UrlRecord>, OctoError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, url, secure, depth FROM page_url ORDER BY id")?;

        let records = stmt
            .query_map([], |row| {
                Ok(UrlRecord {
                    id: row.get(0)?,
                    url: row.get(1)?,
                    secure: row.get::<_, i64>(2)? != 0,
                    depth: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    /// Returns the number of stored records
    pub fn count(&self) -> Result<u64, OctoError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM page_url", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory() {
        assert!(UrlStore::open_in_memory().is_ok());
    }

    #[test]
    fn test_insert_and_exists() {
        let store = UrlStore::open_in_memory().unwrap();
        assert!(!store.exists("https://example.com/").unwrap());

        store.insert("https://example.com/", 0).unwrap();
        assert!(store.exists("https://example.com/").unwrap());
    }

    #[test]
    fn test_exists_is_exact_match() {
        let store = UrlStore::open_in_memory().unwrap();
        store.insert("https://example.com/a", 1).unwrap();

        assert!(!store.exists("https://example.com/a/").unwrap());
        assert!(!store.exists("https://example.com/A").unwrap());
    }

    #[test]
    fn test_insert_roundtrip() {
        let store = UrlStore::open_in_memory().unwrap();
        store.insert("https://example.com/a", 1).unwrap();
        store.insert("http://example.com/b/c", 2).unwrap();

        let records = store.list_all().unwrap();
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].url, "https://example.com/a");
        assert!(records[0].secure);
        assert_eq!(records[0].depth, 1);

        assert_eq!(records[1].url, "http://example.com/b/c");
        assert!(!records[1].secure);
        assert_eq!(records[1].depth, 2);

        // Ids are assigned monotonically by the store
        assert!(records[0].id < records[1].id);
    }

    #[test]
    fn test_count() {
        let store = UrlStore::open_in_memory().unwrap();
        assert_eq!(store.count().unwrap(), 0);
        store.insert("https://example.com/", 0).unwrap();
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_open_reset_discards_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("octo_find.db");

        {
            let store = UrlStore::open(&path, false).unwrap();
            store.insert("https://example.com/", 0).unwrap();
        }

        // Reopening without reset keeps the data
        {
            let store = UrlStore::open(&path, false).unwrap();
            assert_eq!(store.count().unwrap(), 1);
        }

        // Reopening with reset starts empty
        let store = UrlStore::open(&path, true).unwrap();
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_open_reset_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh.db");
        let store = UrlStore::open(&path, true).unwrap();
        assert_eq!(store.count().unwrap(), 0);
    }
}
