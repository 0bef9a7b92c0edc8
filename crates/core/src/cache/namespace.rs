//! Namespace handles and entry CRUD.
//!
//! A namespace is a named generation of the cache ("static-v1",
//! "dynamic-v1"). Exactly one generation per logical role is current at any
//! time; superseded generations are deleted by startup reconciliation.

use super::connection::CacheStore;
use super::entry::CacheEntry;
use crate::Error;
use chrono::{DateTime, Utc};
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite;
use tokio_rusqlite::rusqlite::Row;

/// Handle to one namespace of the cache store.
///
/// Obtained via [`CacheStore::namespace`]. Cheap to clone; clones share the
/// underlying connection.
#[derive(Clone, Debug)]
pub struct Namespace {
    store: CacheStore,
    name: String,
}

fn entry_from_row(row: &Row<'_>) -> Result<CacheEntry, rusqlite::Error> {
    let headers_json: String = row.get(2)?;
    let stored_at: String = row.get(4)?;
    let freshness_stamp: Option<String> = row.get(5)?;

    let headers = serde_json::from_str(&headers_json)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e)))?;
    let stored_at = DateTime::parse_from_rfc3339(&stored_at)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e)))?
        .with_timezone(&Utc);
    let freshness_stamp = freshness_stamp
        .map(|s| {
            DateTime::parse_from_rfc3339(&s)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e)))
        })
        .transpose()?;

    Ok(CacheEntry {
        key: row.get(0)?,
        status: row.get::<_, i64>(1)? as u16,
        headers,
        body: row.get(3)?,
        stored_at,
        freshness_stamp,
    })
}

const ENTRY_COLUMNS: &str = "key, status, headers_json, body, stored_at, freshness_stamp";

impl Namespace {
    /// Namespace name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up an entry by fingerprint.
    ///
    /// Returns None if the key is not present in this namespace.
    pub async fn lookup(&self, key: &str) -> Result<Option<CacheEntry>, Error> {
        let name = self.name.clone();
        let key = key.to_string();
        self.store
            .conn
            .call(move |conn| -> Result<Option<CacheEntry>, Error> {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {ENTRY_COLUMNS} FROM entries WHERE namespace = ?1 AND key = ?2"
                ))?;

                let result = stmt.query_row(params![name, key], entry_from_row);

                match result {
                    Ok(entry) => Ok(Some(entry)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// Insert or replace an entry.
    ///
    /// Registers the namespace row and upserts the entry in a single
    /// connection call, so concurrent writers resolve last-write-wins and a
    /// reader never observes a partial entry.
    pub async fn put(&self, entry: &CacheEntry) -> Result<(), Error> {
        let name = self.name.clone();
        let entry = entry.clone();
        let headers_json =
            serde_json::to_string(&entry.headers).map_err(|e| Error::CorruptEntry(e.to_string()))?;
        self.store
            .conn
            .call(move |conn| -> Result<(), Error> {
                conn.execute(
                    "INSERT OR IGNORE INTO namespaces (name, created_at) VALUES (?1, ?2)",
                    params![name, Utc::now().to_rfc3339()],
                )?;
                conn.execute(
                    "INSERT INTO entries (namespace, key, status, headers_json, body, stored_at, freshness_stamp)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                     ON CONFLICT(namespace, key) DO UPDATE SET
                        status = excluded.status,
                        headers_json = excluded.headers_json,
                        body = excluded.body,
                        stored_at = excluded.stored_at,
                        freshness_stamp = excluded.freshness_stamp",
                    params![
                        name,
                        entry.key,
                        entry.status as i64,
                        headers_json,
                        entry.body,
                        entry.stored_at.to_rfc3339(),
                        entry.freshness_stamp.map(|s| s.to_rfc3339()),
                    ],
                )?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }
}

impl CacheStore {
    /// Open a handle to the named namespace.
    ///
    /// The namespace row is created lazily on first put, or eagerly via
    /// [`CacheStore::ensure_namespace`].
    pub fn namespace(&self, name: &str) -> Namespace {
        Namespace { store: self.clone(), name: name.to_string() }
    }

    /// Create a namespace row if it does not exist yet.
    pub async fn ensure_namespace(&self, name: &str) -> Result<(), Error> {
        let name = name.to_string();
        self.conn
            .call(move |conn| -> Result<(), Error> {
                conn.execute(
                    "INSERT OR IGNORE INTO namespaces (name, created_at) VALUES (?1, ?2)",
                    params![name, Utc::now().to_rfc3339()],
                )?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    /// List all namespaces, including empty ones, in name order.
    pub async fn list_namespaces(&self) -> Result<Vec<String>, Error> {
        self.conn
            .call(|conn| -> Result<Vec<String>, Error> {
                let mut stmt = conn.prepare("SELECT name FROM namespaces ORDER BY name")?;
                let names = stmt
                    .query_map([], |row| row.get::<_, String>(0))?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(names)
            })
            .await
            .map_err(Error::from)
    }

    /// Delete a namespace and all of its entries.
    ///
    /// Returns the number of entries that were removed with it.
    pub async fn delete_namespace(&self, name: &str) -> Result<u64, Error> {
        let name = name.to_string();
        self.conn
            .call(move |conn| -> Result<u64, Error> {
                let count: i64 = conn.query_row(
                    "SELECT COUNT(*) FROM entries WHERE namespace = ?1",
                    params![name],
                    |row| row.get(0),
                )?;
                conn.execute("DELETE FROM namespaces WHERE name = ?1", params![name])?;
                Ok(count as u64)
            })
            .await
            .map_err(Error::from)
    }

    /// Look up a key across all namespaces.
    ///
    /// Used for the offline fallback page, which may live in any current
    /// generation. Namespaces are searched in creation order.
    pub async fn lookup_any(&self, key: &str) -> Result<Option<CacheEntry>, Error> {
        let key = key.to_string();
        self.conn
            .call(move |conn| -> Result<Option<CacheEntry>, Error> {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {ENTRY_COLUMNS} FROM entries
                     WHERE key = ?1
                     ORDER BY (SELECT created_at FROM namespaces WHERE name = entries.namespace)
                     LIMIT 1"
                ))?;

                let result = stmt.query_row(params![key], entry_from_row);

                match result {
                    Ok(entry) => Ok(Some(entry)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::fingerprint::fingerprint;

    fn make_entry(url: &str, body: &[u8]) -> CacheEntry {
        CacheEntry::new(
            fingerprint("GET", url),
            200,
            vec![("content-type".into(), "text/plain".into())],
            body.to_vec(),
        )
    }

    #[tokio::test]
    async fn test_put_and_lookup() {
        let store = CacheStore::open_in_memory().await.unwrap();
        let ns = store.namespace("static-v1");
        let entry = make_entry("https://example.com/assets/app.js", b"console.log(1)");

        ns.put(&entry).await.unwrap();

        let found = ns.lookup(&entry.key).await.unwrap().unwrap();
        assert_eq!(found.body, entry.body);
        assert_eq!(found.status, 200);
        assert_eq!(found.header("content-type"), Some("text/plain"));
    }

    #[tokio::test]
    async fn test_lookup_missing() {
        let store = CacheStore::open_in_memory().await.unwrap();
        let ns = store.namespace("static-v1");
        assert!(ns.lookup("nonexistent").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_overwrites_by_key() {
        let store = CacheStore::open_in_memory().await.unwrap();
        let ns = store.namespace("static-v1");
        let url = "https://example.com/assets/app.js";

        ns.put(&make_entry(url, b"v1")).await.unwrap();
        ns.put(&make_entry(url, b"v2")).await.unwrap();

        let found = ns.lookup(&fingerprint("GET", url)).await.unwrap().unwrap();
        assert_eq!(found.body, b"v2");
    }

    #[tokio::test]
    async fn test_namespaces_are_isolated() {
        let store = CacheStore::open_in_memory().await.unwrap();
        let entry = make_entry("https://example.com/page", b"html");

        store.namespace("dynamic-v1").put(&entry).await.unwrap();

        assert!(store.namespace("static-v1").lookup(&entry.key).await.unwrap().is_none());
        assert!(store.namespace("dynamic-v1").lookup(&entry.key).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_list_and_delete_namespace() {
        let store = CacheStore::open_in_memory().await.unwrap();
        store.ensure_namespace("static-v1").await.unwrap();
        let ns = store.namespace("old-v0");
        ns.put(&make_entry("https://example.com/a", b"a")).await.unwrap();
        ns.put(&make_entry("https://example.com/b", b"b")).await.unwrap();

        assert_eq!(store.list_namespaces().await.unwrap(), vec!["old-v0", "static-v1"]);

        let removed = store.delete_namespace("old-v0").await.unwrap();
        assert_eq!(removed, 2);
        assert_eq!(store.list_namespaces().await.unwrap(), vec!["static-v1"]);
        assert!(
            store
                .namespace("old-v0")
                .lookup(&fingerprint("GET", "https://example.com/a"))
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_lookup_any_finds_across_namespaces() {
        let store = CacheStore::open_in_memory().await.unwrap();
        let entry = make_entry("https://example.com/offline", b"offline page");

        store.namespace("static-v1").put(&entry).await.unwrap();

        let found = store.lookup_any(&entry.key).await.unwrap().unwrap();
        assert_eq!(found.body, b"offline page");
        assert!(store.lookup_any("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_freshness_stamp_round_trip() {
        let store = CacheStore::open_in_memory().await.unwrap();
        let ns = store.namespace("dynamic-v1");
        let stamp = Utc::now();
        let entry = make_entry("https://example.com/api/status", b"{}").with_freshness_stamp(stamp);

        ns.put(&entry).await.unwrap();

        let found = ns.lookup(&entry.key).await.unwrap().unwrap();
        let found_stamp = found.freshness_stamp.unwrap();
        assert!((found_stamp - stamp).num_milliseconds().abs() < 1000);
    }
}
