//! Cached response entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A cached response.
///
/// Owned exclusively by the cache store; replacement is overwrite-by-key,
/// never in-place mutation. `headers` preserves insertion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Request fingerprint this entry is keyed by.
    pub key: String,
    /// HTTP status of the stored response.
    pub status: u16,
    /// Response headers, ordered.
    pub headers: Vec<(String, String)>,
    /// Response body bytes.
    pub body: Vec<u8>,
    /// When the entry was written.
    pub stored_at: DateTime<Utc>,
    /// Insertion-time marker set by the TTL strategy; entries without one
    /// are always treated as stale.
    pub freshness_stamp: Option<DateTime<Utc>>,
}

impl CacheEntry {
    /// Build an entry stamped now, without a freshness stamp.
    pub fn new(key: impl Into<String>, status: u16, headers: Vec<(String, String)>, body: Vec<u8>) -> Self {
        Self { key: key.into(), status, headers, body, stored_at: Utc::now(), freshness_stamp: None }
    }

    /// Same entry with a freshness stamp attached.
    pub fn with_freshness_stamp(mut self, stamp: DateTime<Utc>) -> Self {
        self.freshness_stamp = Some(stamp);
        self
    }

    /// First header value with the given name, case-insensitive.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
