//! SQLite-backed namespaced cache store.
//!
//! This module provides a persistent key-value store mapping request
//! fingerprints to stored responses, partitioned into named generations
//! ("static-v1", "dynamic-v1", ...) with async access via tokio-rusqlite.
//! It supports:
//!
//! - Fingerprint keys derived from method + URL (SHA-256)
//! - Atomic per-key put/get (last write wins)
//! - Namespace enumeration and whole-namespace deletion
//! - Automatic schema migrations
//! - WAL mode for concurrent access

pub mod connection;
pub mod entry;
pub mod fingerprint;
pub mod freshness;
pub mod migrations;
pub mod namespace;

pub use crate::Error;

pub use connection::CacheStore;
pub use entry::CacheEntry;
pub use fingerprint::fingerprint;
pub use freshness::is_fresh;
pub use namespace::Namespace;
