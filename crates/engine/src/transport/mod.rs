//! Network transport abstraction.
//!
//! Strategies talk to the network through the [`Transport`] trait so the
//! serving logic can be exercised against a scripted double. The real
//! implementation is [`HttpTransport`] over reqwest.

pub mod http;

pub use http::HttpTransport;

use crate::types::{Request, Response};
use async_trait::async_trait;

/// Transport-level failures.
///
/// Any variant counts as a "transport failure" for the strategies: the
/// fetch did not produce a response, so cache fallback applies. Non-ok HTTP
/// responses are not transport errors; they are returned as responses.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    #[error("response too large: {0} bytes exceeds {1}")]
    TooLarge(usize, usize),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Outbound network transport.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch a request, returning the response or a transport failure.
    async fn fetch(&self, request: &Request) -> Result<Response, TransportError>;
}
