use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{GatewayError, GatewayResult};

mod anthropic;
mod gemini;
mod openai;

pub use anthropic::AnthropicProvider;
pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;

/// Instruction sent ahead of every prompt for providers with a system slot
pub const SYSTEM_PROMPT: &str = "You are a professional marketing strategist. Always respond with valid JSON only, no additional formatting or text.";

pub const DEFAULT_MAX_TOKENS: u32 = 4000;
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Send one prompt and return the trimmed text response
    async fn generate(&self, prompt: &str) -> GatewayResult<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Openai,
    Anthropic,
    Gemini,
}

impl ProviderKind {
    pub fn default_model(self) -> &'static str {
        match self {
            ProviderKind::Openai => "gpt-4o",
            ProviderKind::Anthropic => "claude-3-5-sonnet-20241022",
            ProviderKind::Gemini => "gemini-2.0-flash-exp",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ProviderKind::Openai => "OpenAI",
            ProviderKind::Anthropic => "Anthropic",
            ProviderKind::Gemini => "Gemini",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub api_key: String,
    /// Overrides the vendor endpoint, e.g. a proxy or a mock server
    pub base_url: Option<String>,
    pub timeout: Duration,
}

impl ProviderConfig {
    pub fn new(kind: ProviderKind, api_key: impl Into<String>) -> Self {
        Self {
            kind,
            model: kind.default_model().to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            api_key: api_key.into(),
            base_url: None,
            timeout: Duration::from_secs(120),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn base_url_or(&self, default: &str) -> String {
        self.base_url
            .as_deref()
            .unwrap_or(default)
            .trim_end_matches('/')
            .to_string()
    }

    fn http_client(&self) -> GatewayResult<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| GatewayError::Config(format!("failed to build HTTP client: {}", e)))
    }
}

/// Build the configured provider
pub fn build_provider(config: ProviderConfig) -> GatewayResult<Arc<dyn CompletionProvider>> {
    if config.api_key.trim().is_empty() {
        return Err(GatewayError::Config(format!(
            "missing API key for provider {}",
            config.kind.display_name()
        )));
    }
    if config.model.trim().is_empty() {
        return Err(GatewayError::Config(format!(
            "missing model for provider {}",
            config.kind.display_name()
        )));
    }

    let kind = config.kind;
    let provider: Arc<dyn CompletionProvider> = match kind {
        ProviderKind::Openai => Arc::new(OpenAiProvider::new(config)?),
        ProviderKind::Anthropic => Arc::new(AnthropicProvider::new(config)?),
        ProviderKind::Gemini => Arc::new(GeminiProvider::new(config)?),
    };
    Ok(provider)
}

// Shared POST + status handling; returns the parsed JSON body
async fn post_json(
    provider: &str,
    request: reqwest::RequestBuilder,
    body: &serde_json::Value,
) -> GatewayResult<serde_json::Value> {
    let response = request
        .json(body)
        .send()
        .await
        .map_err(|e| GatewayError::provider(provider, format!("Network error: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(GatewayError::provider(
            provider,
            format!("API error ({}): {}", status.as_u16(), message),
        ));
    }

    response
        .json::<serde_json::Value>()
        .await
        .map_err(|e| GatewayError::provider(provider, format!("Invalid response body: {}", e)))
}

// Trim and reject empty output
fn usable_text(provider: &str, text: Option<&str>) -> GatewayResult<String> {
    match text.map(str::trim) {
        Some(t) if !t.is_empty() => Ok(t.to_string()),
        _ => Err(GatewayError::provider(
            provider,
            format!("No response generated from {}", provider),
        )),
    }
}
