//! Caching-strategy engine for strata.
//!
//! This crate decides, per intercepted request, whether to serve from the
//! local store, fetch from the network, or both with a defined precedence:
//! request classification, the three serving strategies (cache-first,
//! network-first, network-first-with-TTL), and offline-response synthesis.
//!
//! The host runtime wires its event system to [`CacheEngine::on_startup`]
//! and [`CacheEngine::on_intercept`]; the engine owns no event loop itself.

pub mod classify;
pub mod engine;
pub mod offline;
pub mod strategy;
pub mod transport;
pub mod types;

pub use classify::{RequestClass, classify};
pub use engine::CacheEngine;
pub use offline::offline_response;
pub use transport::{HttpTransport, Transport, TransportError};
pub use types::{Destination, Request, Response};
