//! Freshness policy for TTL-bound entries.
//!
//! Freshness only affects serving eligibility; stale entries are never
//! physically deleted by this policy.

use super::entry::CacheEntry;
use chrono::{DateTime, Duration, Utc};

/// Whether an entry may still be served under the given max-age.
///
/// An entry without a freshness stamp is always stale. The boundary is
/// inclusive: an entry aged exactly `max_age` is still fresh.
pub fn is_fresh(entry: &CacheEntry, now: DateTime<Utc>, max_age: Duration) -> bool {
    match entry.freshness_stamp {
        None => false,
        Some(stamp) => now - stamp <= max_age,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_stamped(age_secs: i64, now: DateTime<Utc>) -> CacheEntry {
        CacheEntry::new("k", 200, vec![], vec![]).with_freshness_stamp(now - Duration::seconds(age_secs))
    }

    #[test]
    fn test_no_stamp_is_stale() {
        let entry = CacheEntry::new("k", 200, vec![], vec![]);
        assert!(!is_fresh(&entry, Utc::now(), Duration::seconds(300)));
    }

    #[test]
    fn test_fresh_within_window() {
        let now = Utc::now();
        assert!(is_fresh(&entry_stamped(299, now), now, Duration::seconds(300)));
    }

    #[test]
    fn test_fresh_at_exact_boundary() {
        let now = Utc::now();
        assert!(is_fresh(&entry_stamped(300, now), now, Duration::seconds(300)));
    }

    #[test]
    fn test_stale_past_boundary() {
        let now = Utc::now();
        assert!(!is_fresh(&entry_stamped(301, now), now, Duration::seconds(300)));
    }

    #[test]
    fn test_future_stamp_is_fresh() {
        let now = Utc::now();
        let entry = CacheEntry::new("k", 200, vec![], vec![]).with_freshness_stamp(now + Duration::seconds(10));
        assert!(is_fresh(&entry, now, Duration::seconds(300)));
    }
}
