use dashmap::DashMap;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::{Duration, Instant};
use crate::clock::Clock;

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

// Cache entry with timestamp
#[derive(Clone, Debug)]
pub struct CacheEntry {
    pub value: String,
    pub stored_at: Instant,
}

/// Completion cache with lazy TTL expiry.
///
/// Reads filter out expired entries but leave them in place; only
/// [`ResponseCache::sweep`] removes them.
pub struct ResponseCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl ResponseCache {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            clock,
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let entry = self.entries.get(key)?;
        if self.is_fresh(&entry, self.clock.now()) {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    pub fn put(&self, key: &str, value: &str) {
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                value: value.to_string(),
                stored_at: self.clock.now(),
            },
        );
    }

    /// Drop expired entries, returning how many were removed
    pub fn sweep(&self) -> usize {
        let now = self.clock.now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| self.is_fresh(entry, now));
        before - self.entries.len()
    }

    // Number of stored entries, expired ones included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn is_fresh(&self, entry: &CacheEntry, now: Instant) -> bool {
        now.saturating_duration_since(entry.stored_at) < self.ttl
    }
}

// Create a cache key (sha256 of request kind + serialized request)
pub fn make_cache_key<T: Serialize>(kind: &str, data: &T) -> String {
    let payload = serde_json::json!({ "type": kind, "data": data });
    let mut hasher = Sha256::new();
    hasher.update(payload.to_string());
    format!("{}_{:x}", kind, hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn cache_with_clock() -> (ResponseCache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        (ResponseCache::new(DEFAULT_CACHE_TTL, clock.clone()), clock)
    }

    #[test]
    fn put_then_get_returns_value() {
        let (cache, _) = cache_with_clock();
        cache.put("k", "v");
        assert_eq!(cache.get("k").as_deref(), Some("v"));
        assert_eq!(cache.get("missing"), None);
    }

    #[test]
    fn expired_entry_reads_as_miss_but_stays_stored() {
        let (cache, clock) = cache_with_clock();
        cache.put("k", "v");

        clock.advance(Duration::from_secs(3599));
        assert_eq!(cache.get("k").as_deref(), Some("v"));

        clock.advance(Duration::from_secs(1));
        assert_eq!(cache.get("k"), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn put_overwrites_and_refreshes_timestamp() {
        let (cache, clock) = cache_with_clock();
        cache.put("k", "old");
        clock.advance(Duration::from_secs(3000));
        cache.put("k", "new");
        clock.advance(Duration::from_secs(3000));

        assert_eq!(cache.get("k").as_deref(), Some("new"));
    }

    #[test]
    fn sweep_removes_only_expired() {
        let (cache, clock) = cache_with_clock();
        cache.put("old", "1");
        clock.advance(Duration::from_secs(3700));
        cache.put("fresh", "2");

        assert_eq!(cache.sweep(), 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("fresh").as_deref(), Some("2"));
    }

    #[test]
    fn cache_key_is_deterministic_and_prefixed() {
        let a = make_cache_key("content_ideas", &serde_json::json!({"n": 1}));
        let b = make_cache_key("content_ideas", &serde_json::json!({"n": 1}));
        let c = make_cache_key("content_ideas", &serde_json::json!({"n": 2}));

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.starts_with("content_ideas_"));
    }
}
