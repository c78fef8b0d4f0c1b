// Test doubles shared by the unit test modules

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::cache::{DEFAULT_CACHE_TTL, ResponseCache};
use crate::clock::ManualClock;
use crate::error::{GatewayError, GatewayResult};
use crate::gateway::Gateway;
use crate::provider::CompletionProvider;
use crate::rate_limit::{DEFAULT_RATE_LIMIT, DEFAULT_RATE_WINDOW, RateLimiter};

type Responder = Box<dyn Fn(&str) -> GatewayResult<String> + Send + Sync>;

/// Provider that answers from a closure and counts calls
pub struct MockProvider {
    responder: Responder,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl MockProvider {
    pub fn with(responder: impl Fn(&str) -> GatewayResult<String> + Send + Sync + 'static) -> Self {
        Self {
            responder: Box::new(responder),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn always(text: &str) -> Self {
        let text = text.to_string();
        Self::with(move |_| Ok(text.clone()))
    }

    pub fn failing(message: &str) -> Self {
        let message = message.to_string();
        Self::with(move |_| Err(GatewayError::provider("Mock", message.clone())))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    fn name(&self) -> &'static str {
        "Mock"
    }

    async fn generate(&self, prompt: &str) -> GatewayResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        (self.responder)(prompt)
    }
}

/// Gateway with default policy over a manual clock
pub fn gateway_with(provider: Arc<MockProvider>) -> (Gateway, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new());
    let gateway = Gateway::new(
        provider,
        ResponseCache::new(DEFAULT_CACHE_TTL, clock.clone()),
        RateLimiter::new(DEFAULT_RATE_LIMIT, DEFAULT_RATE_WINDOW, clock.clone()),
    );
    (gateway, clock)
}
