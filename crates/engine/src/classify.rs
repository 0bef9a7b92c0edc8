//! Request classification.
//!
//! Pure mapping from an intercepted request to a request class, which in
//! turn selects the serving strategy. Precedence when a request could
//! nominally match more than one rule family:
//! document > static-asset > api > other.

use crate::types::{Destination, Request};
use strata_core::EngineConfig;

/// Class of an intercepted request; selects the serving strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestClass {
    /// Top-level navigation; served network-first with offline-page fallback.
    Document,
    /// Versioned asset; served cache-first with background refresh.
    StaticAsset,
    /// API call; served network-first with a freshness cutoff.
    Api,
    /// Everything else; served network-first.
    Other,
}

/// Classify a request. Pure, no side effects.
pub fn classify(request: &Request, config: &EngineConfig) -> RequestClass {
    if request.destination == Destination::Document {
        return RequestClass::Document;
    }

    if is_static_asset(request, config) {
        return RequestClass::StaticAsset;
    }

    let path = request.url.path();
    if config.api_patterns.iter().any(|p| path.contains(p.as_str())) {
        return RequestClass::Api;
    }

    RequestClass::Other
}

fn is_static_asset(request: &Request, config: &EngineConfig) -> bool {
    if matches!(
        request.destination,
        Destination::Style | Destination::Script | Destination::Image | Destination::Font
    ) {
        return true;
    }

    let path = request.url.path();
    if config.asset_segments.iter().any(|s| path.contains(s.as_str())) {
        return true;
    }

    match request.url.host_str() {
        Some(host) => config.font_hosts.iter().any(|h| h == host),
        None => false,
    }
}
