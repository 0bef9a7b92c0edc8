//! Intercepted request and served response types.

use bytes::Bytes;
use reqwest::{Method, StatusCode};
use strata_core::cache::fingerprint;
use url::Url;

/// Target type of an intercepted request, as reported by the host runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// Top-level navigation (HTML page load).
    Document,
    Style,
    Script,
    Image,
    Font,
    /// Anything else (XHR, beacon, unknown).
    Other,
}

/// An intercepted request.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub url: Url,
    pub destination: Destination,
    /// Request headers, forwarded untouched on pass-through.
    pub headers: Vec<(String, String)>,
}

impl Request {
    /// Convenience constructor for a GET request without extra headers.
    pub fn get(url: Url, destination: Destination) -> Self {
        Self { method: Method::GET, url, destination, headers: Vec::new() }
    }

    /// Cache key for this request.
    pub fn fingerprint(&self) -> String {
        fingerprint(self.method.as_str(), self.url.as_str())
    }
}

/// The value returned to the caller: a live network response, a cache entry
/// materialized back into a response, or a synthesized offline response.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code.
    pub status: StatusCode,
    /// Response headers, ordered.
    pub headers: Vec<(String, String)>,
    /// Response body bytes.
    pub body: Bytes,
}

impl Response {
    pub fn new(status: StatusCode, headers: Vec<(String, String)>, body: impl Into<Bytes>) -> Self {
        Self { status, headers, body: body.into() }
    }

    /// Whether the status is in the success range.
    pub fn is_ok(&self) -> bool {
        self.status.is_success()
    }

    /// First header value with the given name, case-insensitive.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
