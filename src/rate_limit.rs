use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use crate::clock::Clock;

pub const DEFAULT_RATE_LIMIT: u32 = 10;
pub const DEFAULT_RATE_WINDOW: Duration = Duration::from_secs(3600);

/// Sliding-window limiter: per key, the timestamps of recorded requests.
///
/// Only timestamps inside the trailing window count. Older ones are
/// ignored on read and removed by [`RateLimiter::sweep`].
pub struct RateLimiter {
    windows: DashMap<String, Vec<Instant>>,
    limit: u32,
    window: Duration,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    pub fn new(limit: u32, window: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            windows: DashMap::new(),
            limit,
            window,
            clock,
        }
    }

    pub fn is_limited(&self, key: &str) -> bool {
        self.recent_count(key) >= self.limit as usize
    }

    pub fn record(&self, key: &str) {
        let now = self.clock.now();
        self.windows.entry(key.to_string()).or_default().push(now);
    }

    // Requests for key strictly inside the trailing window
    pub fn recent_count(&self, key: &str) -> usize {
        let now = self.clock.now();
        self.windows
            .get(key)
            .map(|stamps| stamps.iter().filter(|t| self.in_window(**t, now)).count())
            .unwrap_or(0)
    }

    /// Prune stale timestamps and drop keys left empty.
    /// Returns the number of keys removed.
    pub fn sweep(&self) -> usize {
        let now = self.clock.now();
        let before = self.windows.len();
        self.windows.retain(|_, stamps| {
            stamps.retain(|t| self.in_window(*t, now));
            !stamps.is_empty()
        });
        before - self.windows.len()
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn tracked_keys(&self) -> usize {
        self.windows.len()
    }

    fn in_window(&self, stamp: Instant, now: Instant) -> bool {
        now.saturating_duration_since(stamp) < self.window
    }
}
