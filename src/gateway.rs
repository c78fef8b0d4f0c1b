use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::interval;
use crate::cache::ResponseCache;
use crate::error::{GatewayError, GatewayResult};
use crate::metrics::{
    CACHE_HITS, CACHE_MISSES, CACHE_SIZE, PROVIDER_ERRORS, PROVIDER_LATENCY, RATE_LIMITED,
    REQUEST_TOTAL,
};
use crate::provider::CompletionProvider;
use crate::rate_limit::RateLimiter;

// One completion call plus its optional policy keys
#[derive(Debug, Clone, Default)]
pub struct CompletionRequest {
    pub prompt: String,
    pub cache_key: Option<String>,
    pub rate_limit_key: Option<String>,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    pub fn cache_key(mut self, key: impl Into<String>) -> Self {
        self.cache_key = Some(key.into());
        self
    }

    pub fn rate_limit_key(mut self, key: impl Into<String>) -> Self {
        self.rate_limit_key = Some(key.into());
        self
    }
}

/// Cache + rate limit + provider.
///
/// Order per call: cache hit short-circuits everything, then the rate
/// limit is checked, then the provider is called. Only successful
/// generations are cached and counted against the quota.
pub struct Gateway {
    provider: Arc<dyn CompletionProvider>,
    cache: ResponseCache,
    rate_limiter: RateLimiter,
}

impl Gateway {
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        cache: ResponseCache,
        rate_limiter: RateLimiter,
    ) -> Self {
        Self {
            provider,
            cache,
            rate_limiter,
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }

    /// Plain provider call, no cache and no quota
    pub async fn generate(&self, prompt: &str) -> GatewayResult<String> {
        self.generate_with_policy(CompletionRequest::new(prompt)).await
    }

    pub async fn generate_with_policy(&self, request: CompletionRequest) -> GatewayResult<String> {
        REQUEST_TOTAL.inc();

        if let Some(key) = request.cache_key.as_deref() {
            if let Some(value) = self.cache.get(key) {
                CACHE_HITS.inc();
                tracing::debug!(cache_key = key, "cache hit");
                return Ok(value);
            }
            CACHE_MISSES.inc();
            tracing::debug!(cache_key = key, "cache miss");
        }

        if let Some(key) = request.rate_limit_key.as_deref() {
            if self.rate_limiter.is_limited(key) {
                RATE_LIMITED.inc();
                tracing::warn!(rate_limit_key = key, "rate limit exceeded");
                return Err(GatewayError::RateLimitExceeded {
                    key: key.to_string(),
                });
            }
        }

        let started = Instant::now();
        let result = self.provider.generate(&request.prompt).await;
        PROVIDER_LATENCY.observe(started.elapsed().as_secs_f64());

        let text = match result {
            Ok(text) => text,
            Err(e) => {
                PROVIDER_ERRORS.inc();
                tracing::error!(provider = self.provider.name(), error = %e, "provider call failed");
                return Err(e);
            }
        };

        if let Some(key) = request.cache_key.as_deref() {
            self.cache.put(key, &text);
            CACHE_SIZE.set(self.cache.len() as f64);
        }
        if let Some(key) = request.rate_limit_key.as_deref() {
            self.rate_limiter.record(key);
        }

        Ok(text)
    }

    // Remove expired cache entries and stale rate windows
    pub fn sweep(&self) -> (usize, usize) {
        let evicted = self.cache.sweep();
        let dropped = self.rate_limiter.sweep();
        CACHE_SIZE.set(self.cache.len() as f64);
        (evicted, dropped)
    }
}

// Periodic sweeper - keeps cache and limiter maps from growing without bound
pub async fn sweeper(gateway: Arc<Gateway>, every: Duration) {
    let mut ticker = interval(every);
    tracing::info!(interval = ?every, "sweeper started");

    loop {
        ticker.tick().await;
        let (evicted, dropped) = gateway.sweep();
        if evicted > 0 || dropped > 0 {
            tracing::debug!(evicted, dropped, "swept expired entries");
        }
    }
}
