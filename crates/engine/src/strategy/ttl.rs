//! Network-first-with-TTL strategy for API requests.
//!
//! Successful responses are stored with a freshness stamp; on transport
//! failure the cached entry is served only while it is fresh. Freshness is
//! a hard cutoff, not a hint: a stale entry is never served, the caller
//! gets the synthesized offline response instead.

use super::{materialize, snapshot};
use crate::engine::CacheEngine;
use crate::offline::offline_response;
use crate::types::{Request, Response};
use chrono::Utc;
use strata_core::cache::is_fresh;

impl CacheEngine {
    pub(crate) async fn serve_network_first_ttl(&self, request: &Request) -> Response {
        let key = request.fingerprint();
        let dynamic = self.store.namespace(&self.config.dynamic_cache);

        match self.transport.fetch(request).await {
            Ok(response) => {
                if response.is_ok() {
                    let entry = snapshot(&key, &response).with_freshness_stamp(Utc::now());
                    self.store_entry(&dynamic, entry).await;
                }
                response
            }
            Err(err) => {
                tracing::debug!(url = %request.url, error = %err, "API fetch failed, checking cache freshness");
                let now = Utc::now();
                match self.cached(&dynamic, &key).await {
                    Some(entry) if is_fresh(&entry, now, self.config.api_max_age()) => materialize(entry),
                    Some(_) => {
                        tracing::debug!(url = %request.url, "cached API entry is stale, not serving");
                        offline_response(now)
                    }
                    None => offline_response(now),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::tests::{engine_with_mock, ok_response, request};
    use crate::strategy::snapshot;
    use crate::types::Destination;
    use chrono::{Duration, Utc};
    use reqwest::StatusCode;

    #[tokio::test]
    async fn test_network_success_serves_live_response() {
        let (engine, mock) = engine_with_mock().await;
        let req = request("https://app.example.com/api/status", Destination::Other);

        mock.route("https://app.example.com/api/status", ok_response(b"{\"up\":true}"));
        let served = engine.on_intercept(&req).await.unwrap();
        assert_eq!(served.status, StatusCode::OK);
        assert_eq!(served.body.as_ref(), b"{\"up\":true}");
    }

    #[tokio::test]
    async fn test_offline_fresh_entry_served() {
        let (engine, mock) = engine_with_mock().await;
        let req = request("https://app.example.com/api/status", Destination::Other);

        mock.route("https://app.example.com/api/status", ok_response(b"{\"up\":true}"));
        engine.on_intercept(&req).await.unwrap();

        mock.set_offline(true);
        let served = engine.on_intercept(&req).await.unwrap();
        assert_eq!(served.status, StatusCode::OK);
        assert_eq!(served.body.as_ref(), b"{\"up\":true}");
    }

    #[tokio::test]
    async fn test_offline_no_entry_synthesizes_503() {
        let (engine, mock) = engine_with_mock().await;
        mock.set_offline(true);

        let req = request("https://app.example.com/api/status", Destination::Other);
        let served = engine.on_intercept(&req).await.unwrap();
        assert_eq!(served.status, StatusCode::SERVICE_UNAVAILABLE);

        let body: serde_json::Value = serde_json::from_slice(&served.body).unwrap();
        assert_eq!(body["error"], "Offline");
    }

    /// Back-date the stored stamp to probe the 5-minute cutoff.
    async fn serve_with_entry_age(age_secs: i64) -> StatusCode {
        let (engine, mock) = engine_with_mock().await;
        let req = request("https://app.example.com/api/status", Destination::Other);

        let entry = snapshot(&req.fingerprint(), &ok_response(b"{}"))
            .with_freshness_stamp(Utc::now() - Duration::seconds(age_secs));
        engine.store().namespace("dynamic-v1").put(&entry).await.unwrap();

        mock.set_offline(true);
        engine.on_intercept(&req).await.unwrap().status
    }

    // The exact max-age tick is covered by the pure freshness tests in
    // strata-core; going through the engine adds wall-clock skew, so here
    // the probe sits one second inside and one second outside the window.
    #[tokio::test]
    async fn test_entry_servable_just_inside_window() {
        assert_eq!(serve_with_entry_age(299).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_entry_stale_past_window() {
        assert_eq!(serve_with_entry_age(301).await, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(serve_with_entry_age(400).await, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_entry_without_stamp_never_served() {
        let (engine, mock) = engine_with_mock().await;
        let req = request("https://app.example.com/api/status", Destination::Other);

        let entry = snapshot(&req.fingerprint(), &ok_response(b"{}"));
        engine.store().namespace("dynamic-v1").put(&entry).await.unwrap();

        mock.set_offline(true);
        let served = engine.on_intercept(&req).await.unwrap();
        assert_eq!(served.status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
