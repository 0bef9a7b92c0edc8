//! HTTP transport over reqwest.

use super::{Transport, TransportError};
use crate::types::{Request, Response};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Instant;
use strata_core::EngineConfig;

/// Maximum number of redirects to follow.
const MAX_REDIRECTS: usize = 5;

/// Network transport backed by a reqwest client.
///
/// Applies the configured user agent, redirect limit, and body-size cap.
/// Has no timeout unless one is configured; a hung fetch then blocks that
/// one request indefinitely.
pub struct HttpTransport {
    http: Client,
    max_bytes: usize,
}

impl HttpTransport {
    /// Build a transport from the engine configuration.
    pub fn new(config: &EngineConfig) -> Result<Self, TransportError> {
        let mut builder = Client::builder()
            .user_agent(&config.user_agent)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true);

        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        let http = builder
            .build()
            .map_err(|e| TransportError::InvalidRequest(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, max_bytes: config.max_bytes })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, request: &Request) -> Result<Response, TransportError> {
        let start = Instant::now();

        let mut builder = self.http.request(request.method.clone(), request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() { TransportError::Timeout } else { TransportError::Network(e.to_string()) }
        })?;

        let status = response.status();

        if let Some(len) = response.content_length()
            && len as usize > self.max_bytes
        {
            return Err(TransportError::TooLarge(len as usize, self.max_bytes));
        }

        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::Network(format!("failed to read response: {}", e)))?;

        if bytes.len() > self.max_bytes {
            return Err(TransportError::TooLarge(bytes.len(), self.max_bytes));
        }

        tracing::debug!(
            "fetched {} -> {} in {}ms ({} bytes)",
            request.url,
            status,
            start.elapsed().as_millis(),
            bytes.len()
        );

        Ok(Response { status, headers, body: bytes })
    }
}
