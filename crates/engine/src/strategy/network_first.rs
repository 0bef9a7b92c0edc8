//! Network-first strategy for documents and uncategorized requests.
//!
//! A reachable network always wins over any cached value. Only
//! success-range responses are written to the dynamic namespace; non-ok
//! responses pass through to the caller uncached. On transport failure the
//! strategy falls back to the cache, then (for documents) to the cached
//! offline page, then to the synthesized offline response.

use super::{materialize, snapshot};
use crate::classify::RequestClass;
use crate::engine::CacheEngine;
use crate::offline::offline_response;
use crate::types::{Request, Response};
use chrono::Utc;
use strata_core::cache::fingerprint;

impl CacheEngine {
    pub(crate) async fn serve_network_first(&self, request: &Request, class: RequestClass) -> Response {
        let key = request.fingerprint();
        let dynamic = self.store.namespace(&self.config.dynamic_cache);

        match self.transport.fetch(request).await {
            Ok(response) => {
                if response.is_ok() {
                    self.store_entry(&dynamic, snapshot(&key, &response)).await;
                }
                response
            }
            Err(err) => {
                tracing::debug!(url = %request.url, error = %err, "network-first fetch failed, falling back to cache");
                match self.cached(&dynamic, &key).await {
                    Some(entry) => materialize(entry),
                    None if class == RequestClass::Document => self.offline_document(request).await,
                    None => offline_response(Utc::now()),
                }
            }
        }
    }

    /// Document fallback on total miss: the cached offline page if present
    /// in any current namespace, else the synthesized offline response.
    async fn offline_document(&self, request: &Request) -> Response {
        if let Ok(offline_url) = request.url.join(&self.config.offline_path) {
            let key = fingerprint("GET", offline_url.as_str());
            match self.store.lookup_any(&key).await {
                Ok(Some(entry)) => return materialize(entry),
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!(error = %err, "offline page lookup failed");
                }
            }
        }
        offline_response(Utc::now())
    }
}
