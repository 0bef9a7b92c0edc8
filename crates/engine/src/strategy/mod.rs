//! Serving strategies.
//!
//! One strategy per request class, each an `impl CacheEngine` block in its
//! own file:
//!
//! - [`network_first`]: documents and uncategorized requests
//! - [`cache_first`]: static assets, with detached background refresh
//! - [`ttl`]: API requests, network-first with a freshness cutoff
//!
//! Shared here: conversions between stored entries and served responses,
//! and the store helpers that make strategy paths non-fatal (reads degrade
//! to miss, writes are logged and dropped).

pub mod cache_first;
pub mod network_first;
pub mod ttl;

use crate::engine::CacheEngine;
use crate::types::Response;
use reqwest::StatusCode;
use strata_core::CacheEntry;
use strata_core::cache::Namespace;

/// Copy a response into a storable entry.
pub(crate) fn snapshot(key: &str, response: &Response) -> CacheEntry {
    CacheEntry::new(key, response.status.as_u16(), response.headers.clone(), response.body.to_vec())
}

/// Materialize a stored entry back into a served response.
pub(crate) fn materialize(entry: CacheEntry) -> Response {
    Response::new(
        StatusCode::from_u16(entry.status).unwrap_or(StatusCode::OK),
        entry.headers,
        entry.body,
    )
}

impl CacheEngine {
    /// Cache read that degrades to a miss instead of failing the request.
    pub(crate) async fn cached(&self, ns: &Namespace, key: &str) -> Option<CacheEntry> {
        match ns.lookup(key).await {
            Ok(found) => found,
            Err(err) => {
                tracing::warn!(namespace = %ns.name(), error = %err, "cache read failed, treating as miss");
                None
            }
        }
    }

    /// Cache write whose failure never affects the served response.
    pub(crate) async fn store_entry(&self, ns: &Namespace, entry: CacheEntry) {
        if let Err(err) = ns.put(&entry).await {
            tracing::warn!(namespace = %ns.name(), error = %err, "cache write failed, serving without caching");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[test]
    fn test_snapshot_materialize_round_trip() {
        let response = Response::new(
            StatusCode::OK,
            vec![("content-type".into(), "text/javascript".into())],
            Bytes::from_static(b"console.log(1)"),
        );

        let entry = snapshot("key", &response);
        assert_eq!(entry.status, 200);
        assert!(entry.freshness_stamp.is_none());

        let served = materialize(entry);
        assert_eq!(served.status, StatusCode::OK);
        assert_eq!(served.body, response.body);
        assert_eq!(served.header("content-type"), Some("text/javascript"));
    }
}
