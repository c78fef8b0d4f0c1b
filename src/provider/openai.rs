// OpenAI Chat Completions adapter

use async_trait::async_trait;
use serde_json::{Value, json};

use super::{CompletionProvider, ProviderConfig, SYSTEM_PROMPT, post_json, usable_text};
use crate::error::GatewayResult;

const OPENAI_API_URL: &str = "https://api.openai.com";
const NAME: &str = "OpenAI";

#[derive(Debug, Clone)]
pub struct OpenAiProvider {
    client: reqwest::Client,
    config: ProviderConfig,
    endpoint: String,
}

impl OpenAiProvider {
    pub fn new(config: ProviderConfig) -> GatewayResult<Self> {
        let endpoint = format!("{}/v1/chat/completions", config.base_url_or(OPENAI_API_URL));
        Ok(Self {
            client: config.http_client()?,
            config,
            endpoint,
        })
    }

    fn build_request_body(&self, prompt: &str) -> Value {
        json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": prompt },
            ],
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
        })
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn generate(&self, prompt: &str) -> GatewayResult<String> {
        let request = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.config.api_key));
        let body = post_json(NAME, request, &self.build_request_body(prompt)).await?;

        let content = body
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str);
        usable_text(NAME, content)
    }
}
