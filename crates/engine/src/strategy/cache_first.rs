//! Cache-first strategy for static assets.
//!
//! Assets are assumed immutable-by-version (the namespace is the version),
//! so a hit is served immediately and a detached refresh keeps the entry
//! from going permanently stale. Refresh failures are swallowed: they are
//! debug-logged, never surfaced to the caller, and never retried by a
//! timer.

use super::{materialize, snapshot};
use crate::engine::CacheEngine;
use crate::offline::offline_response;
use crate::types::{Request, Response};
use chrono::Utc;
use std::sync::Arc;
use strata_core::cache::Namespace;

impl CacheEngine {
    pub(crate) async fn serve_cache_first(&self, request: &Request) -> Response {
        let key = request.fingerprint();
        let statics = self.store.namespace(&self.config.static_cache);

        if let Some(entry) = self.cached(&statics, &key).await {
            tracing::debug!(url = %request.url, "cache-first hit, refreshing in background");
            self.spawn_refresh(request.clone(), statics, key);
            return materialize(entry);
        }

        match self.transport.fetch(request).await {
            Ok(response) => {
                if response.is_ok() {
                    self.store_entry(&statics, snapshot(&key, &response)).await;
                }
                response
            }
            Err(err) => {
                tracing::debug!(url = %request.url, error = %err, "cache-first miss and fetch failed");
                offline_response(Utc::now())
            }
        }
    }

    /// Launch a detached refresh of a cached asset.
    ///
    /// Not awaited by the serving path; a concurrent foreground read of the
    /// same key races the refresh write and resolves last-write-wins at the
    /// store.
    fn spawn_refresh(&self, request: Request, statics: Namespace, key: String) {
        let transport = Arc::clone(&self.transport);
        tokio::spawn(async move {
            match transport.fetch(&request).await {
                Ok(response) if response.is_ok() => {
                    if let Err(err) = statics.put(&snapshot(&key, &response)).await {
                        tracing::debug!(url = %request.url, error = %err, "background refresh write failed, discarded");
                    }
                }
                Ok(response) => {
                    tracing::debug!(url = %request.url, status = %response.status, "background refresh got non-ok, discarded");
                }
                Err(err) => {
                    tracing::debug!(url = %request.url, error = %err, "background refresh failed, discarded");
                }
            }
        });
    }
}
