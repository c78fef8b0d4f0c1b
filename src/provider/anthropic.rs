// Anthropic Messages API adapter

use async_trait::async_trait;
use serde_json::{Value, json};

use super::{CompletionProvider, ProviderConfig, post_json, usable_text};
use crate::error::{GatewayError, GatewayResult};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const NAME: &str = "Anthropic";

#[derive(Debug, Clone)]
pub struct AnthropicProvider {
    client: reqwest::Client,
    config: ProviderConfig,
    endpoint: String,
}

impl AnthropicProvider {
    pub fn new(config: ProviderConfig) -> GatewayResult<Self> {
        let endpoint = format!("{}/v1/messages", config.base_url_or(ANTHROPIC_API_URL));
        Ok(Self {
            client: config.http_client()?,
            config,
            endpoint,
        })
    }

    fn build_request_body(&self, prompt: &str) -> Value {
        json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
            "messages": [{ "role": "user", "content": prompt }],
        })
    }
}

#[async_trait]
impl CompletionProvider for AnthropicProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn generate(&self, prompt: &str) -> GatewayResult<String> {
        let request = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION);
        let body = post_json(NAME, request, &self.build_request_body(prompt)).await?;

        let block = body
            .pointer("/content/0")
            .ok_or_else(|| GatewayError::provider(NAME, "No response generated from Anthropic"))?;
        if block.get("type").and_then(Value::as_str) != Some("text") {
            return Err(GatewayError::provider(
                NAME,
                "Unexpected response type from Anthropic",
            ));
        }
        usable_text(NAME, block.get("text").and_then(Value::as_str))
    }
}
