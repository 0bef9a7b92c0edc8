//! Synthesized offline error response.

use crate::types::Response;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;

/// Build the 503 response served when both the network and the cache have
/// nothing usable.
///
/// Wire format is fixed: JSON body with `error`, `message`, and an RFC-3339
/// `timestamp`, plus `Content-Type: application/json` and
/// `Cache-Control: no-cache`.
pub fn offline_response(now: DateTime<Utc>) -> Response {
    let body = serde_json::json!({
        "error": "Offline",
        "message": "You are currently offline. Please check your internet connection.",
        "timestamp": now.to_rfc3339(),
    });

    Response::new(
        StatusCode::SERVICE_UNAVAILABLE,
        vec![
            ("Content-Type".into(), "application/json".into()),
            ("Cache-Control".into(), "no-cache".into()),
        ],
        body.to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offline_response_wire_format() {
        let now = Utc::now();
        let response = offline_response(now);

        assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(response.header("content-type"), Some("application/json"));
        assert_eq!(response.header("cache-control"), Some("no-cache"));

        let body: serde_json::Value = serde_json::from_slice(&response.body).unwrap();
        assert_eq!(body["error"], "Offline");
        assert_eq!(
            body["message"],
            "You are currently offline. Please check your internet connection."
        );
        assert_eq!(body["timestamp"], now.to_rfc3339());
    }
}
