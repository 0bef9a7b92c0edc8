//! Core types and shared functionality for strata.
//!
//! This crate provides:
//! - Namespaced cache store with SQLite backend
//! - Request fingerprinting and freshness policy
//! - Unified error types
//! - Engine configuration

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{CacheEntry, CacheStore, Namespace};
pub use config::EngineConfig;
pub use error::Error;
