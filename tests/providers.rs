use std::time::Duration;

use creatorbrief_gateway::GatewayError;
use creatorbrief_gateway::provider::{
    AnthropicProvider, CompletionProvider, GeminiProvider, OpenAiProvider, ProviderConfig,
    ProviderKind,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(kind: ProviderKind, server: &MockServer) -> ProviderConfig {
    ProviderConfig::new(kind, "test-key")
        .with_base_url(server.uri())
        .with_timeout(Duration::from_secs(5))
}

#[tokio::test]
async fn openai_returns_trimmed_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("Authorization", "Bearer test-key"))
        .and(body_partial_json(json!({ "model": "gpt-4o", "max_tokens": 4000 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": "  [1,2]\n" } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = OpenAiProvider::new(config(ProviderKind::Openai, &server)).unwrap();
    assert_eq!(provider.generate("hi").await.unwrap(), "[1,2]");
}

#[tokio::test]
async fn openai_empty_content_is_provider_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "content": null } }]
        })))
        .mount(&server)
        .await;

    let provider = OpenAiProvider::new(config(ProviderKind::Openai, &server)).unwrap();
    let err = provider.generate("hi").await.unwrap_err();
    assert!(
        matches!(&err, GatewayError::Provider { message, .. } if message.contains("No response generated from OpenAI")),
        "{err}"
    );
}

#[tokio::test]
async fn http_error_status_keeps_original_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let provider = OpenAiProvider::new(config(ProviderKind::Openai, &server)).unwrap();
    let err = provider.generate("hi").await.unwrap_err();
    match err {
        GatewayError::Provider { provider, message } => {
            assert_eq!(provider, "OpenAI");
            assert!(message.contains("401"));
            assert!(message.contains("invalid api key"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn anthropic_reads_first_text_block() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "test-key"))
        .and(header("anthropic-version", "2023-06-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{ "type": "text", "text": "{\"ok\":true}" }]
        })))
        .mount(&server)
        .await;

    let provider = AnthropicProvider::new(config(ProviderKind::Anthropic, &server)).unwrap();
    assert_eq!(provider.generate("hi").await.unwrap(), "{\"ok\":true}");
}

#[tokio::test]
async fn anthropic_non_text_block_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{ "type": "tool_use", "id": "t1", "name": "x", "input": {} }]
        })))
        .mount(&server)
        .await;

    let provider = AnthropicProvider::new(config(ProviderKind::Anthropic, &server)).unwrap();
    let err = provider.generate("hi").await.unwrap_err();
    assert!(err.to_string().contains("Unexpected response type from Anthropic"));
}

#[tokio::test]
async fn gemini_prepends_system_instruction() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.0-flash-exp:generateContent"))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "generationConfig": { "maxOutputTokens": 4000 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": "[]" }] } }]
        })))
        .mount(&server)
        .await;

    let provider = GeminiProvider::new(config(ProviderKind::Gemini, &server)).unwrap();
    assert_eq!(provider.generate("hi").await.unwrap(), "[]");

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let text = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(text.starts_with("You are a professional marketing strategist."));
    assert!(text.ends_with("\n\nhi"));
}

#[tokio::test]
async fn unexpected_shape_is_provider_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "promptFeedback": {} })))
        .mount(&server)
        .await;

    let provider = GeminiProvider::new(config(ProviderKind::Gemini, &server)).unwrap();
    assert!(matches!(
        provider.generate("hi").await,
        Err(GatewayError::Provider { .. })
    ));
}
