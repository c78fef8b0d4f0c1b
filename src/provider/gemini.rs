use async_trait::async_trait;
use serde_json::{Value, json};

use super::{CompletionProvider, ProviderConfig, SYSTEM_PROMPT, post_json, usable_text};
use crate::error::GatewayResult;

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com";
const NAME: &str = "Gemini";

#[derive(Debug, Clone)]
pub struct GeminiProvider {
    client: reqwest::Client,
    config: ProviderConfig,
    endpoint: String,
}

impl GeminiProvider {
    pub fn new(config: ProviderConfig) -> GatewayResult<Self> {
        let endpoint = format!(
            "{}/v1beta/models/{}:generateContent",
            config.base_url_or(GEMINI_API_URL),
            config.model
        );
        Ok(Self {
            client: config.http_client()?,
            config,
            endpoint,
        })
    }

    // no system slot, so the instruction rides in front of the prompt
    fn build_request_body(&self, prompt: &str) -> Value {
        json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": format!("{}\n\n{}", SYSTEM_PROMPT, prompt) }],
            }],
            "generationConfig": {
                "maxOutputTokens": self.config.max_tokens,
                "temperature": self.config.temperature,
            },
        })
    }
}

#[async_trait]
impl CompletionProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn generate(&self, prompt: &str) -> GatewayResult<String> {
        let request = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.config.api_key);
        let body = post_json(NAME, request, &self.build_request_body(prompt)).await?;

        let text = body
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str);
        usable_text(NAME, text)
    }
}
