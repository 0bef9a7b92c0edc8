//! The cache engine: host-facing interface and strategy dispatch.
//!
//! The host runtime invokes [`CacheEngine::on_startup`] once, before any
//! request is served, then [`CacheEngine::on_intercept`] per intercepted
//! request. The engine never installs event listeners or global state of
//! its own; everything it consults lives in the [`EngineConfig`] it was
//! constructed with.

use crate::classify::{RequestClass, classify};
use crate::transport::Transport;
use crate::types::{Request, Response};
use reqwest::Method;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use strata_core::{CacheStore, EngineConfig, Error};

/// Request-interception caching engine.
///
/// Holds the configuration, the namespaced cache store, and the network
/// transport. Cheap to share behind an `Arc`; each intercepted request is
/// handled independently.
pub struct CacheEngine {
    pub(crate) config: EngineConfig,
    pub(crate) store: CacheStore,
    pub(crate) transport: Arc<dyn Transport>,
    ready: AtomicBool,
}

impl CacheEngine {
    /// Create an engine. Call [`CacheEngine::on_startup`] before serving.
    pub fn new(config: EngineConfig, store: CacheStore, transport: Arc<dyn Transport>) -> Self {
        Self { config, store, transport, ready: AtomicBool::new(false) }
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The underlying cache store.
    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    /// The namespace allow-list: everything not in this set is garbage from
    /// a previous generation and gets deleted at startup.
    pub fn current_namespaces(&self) -> BTreeSet<String> {
        BTreeSet::from([
            self.config.cache_name.clone(),
            self.config.static_cache.clone(),
            self.config.dynamic_cache.clone(),
        ])
    }

    /// Startup reconciliation: delete superseded cache generations and
    /// create the current ones.
    ///
    /// Must complete before the first [`CacheEngine::on_intercept`] call;
    /// until it does, serving fails with [`Error::NotReady`].
    pub async fn on_startup(&self) -> Result<(), Error> {
        let keep = self.current_namespaces();

        for name in self.store.list_namespaces().await? {
            if !keep.contains(&name) {
                let removed = self.store.delete_namespace(&name).await?;
                tracing::info!(namespace = %name, entries = removed, "deleted superseded cache generation");
            }
        }

        for name in &keep {
            self.store.ensure_namespace(name).await?;
        }

        self.ready.store(true, Ordering::Release);
        tracing::info!("cache engine ready");
        Ok(())
    }

    /// Serve one intercepted request.
    ///
    /// Non-GET requests are forwarded to the transport unconditionally; the
    /// cache is never consulted or written for them. GET requests are
    /// classified and dispatched to the matching strategy; every strategy
    /// path terminates in a response, so the only error cases here are
    /// [`Error::NotReady`] and a failed non-GET forward.
    pub async fn on_intercept(&self, request: &Request) -> Result<Response, Error> {
        if !self.ready.load(Ordering::Acquire) {
            return Err(Error::NotReady);
        }

        if request.method != Method::GET {
            return self
                .transport
                .fetch(request)
                .await
                .map_err(|e| Error::Transport(e.to_string()));
        }

        let class = classify(request, &self.config);
        tracing::debug!(url = %request.url, class = ?class, "intercepted");

        let response = match class {
            RequestClass::StaticAsset => self.serve_cache_first(request).await,
            RequestClass::Api => self.serve_network_first_ttl(request).await,
            RequestClass::Document | RequestClass::Other => self.serve_network_first(request, class).await,
        };

        Ok(response)
    }
}
