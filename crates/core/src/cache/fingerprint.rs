//! Request fingerprinting.
//!
//! A fingerprint is the cache key for a request: SHA-256 over method and
//! full URL (query included), hex-encoded. Only GET requests are ever
//! fingerprinted by the engine; the function itself is method-agnostic.

use sha2::{Digest, Sha256};

/// Compute the cache key for a request.
pub fn fingerprint(method: &str, url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(method.as_bytes());
    hasher.update(b"\n");
    hasher.update(url.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_stability() {
        let fp1 = fingerprint("GET", "https://example.com/api/status");
        let fp2 = fingerprint("GET", "https://example.com/api/status");
        assert_eq!(fp1, fp2);
    }

    #[test]
    fn test_fingerprint_includes_query() {
        let fp1 = fingerprint("GET", "https://example.com/api/items?page=1");
        let fp2 = fingerprint("GET", "https://example.com/api/items?page=2");
        assert_ne!(fp1, fp2);
    }

    #[test]
    fn test_fingerprint_includes_method() {
        let fp1 = fingerprint("GET", "https://example.com/api/items");
        let fp2 = fingerprint("HEAD", "https://example.com/api/items");
        assert_ne!(fp1, fp2);
    }

    #[test]
    fn test_fingerprint_format() {
        let fp = fingerprint("GET", "https://example.com");
        assert_eq!(fp.len(), 64);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
