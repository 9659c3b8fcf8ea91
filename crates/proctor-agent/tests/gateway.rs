//! Contract tests for proctor-agent: ModelConfig defaults, LlmProvider
//! serialization, and the OpenAI-compatible backend against a wiremock server.

use proctor_agent::{LlmClient, LlmProvider, ModelConfig};
use proctor_core::{ChatMessage, ProctorError};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(base_url: &str) -> ModelConfig {
    ModelConfig {
        provider: LlmProvider::Groq,
        model_id: "llama3-70b-8192".to_string(),
        api_key: "gsk-test-123".to_string(),
        api_base_url: Some(base_url.to_string()),
        temperature: 0.3,
        max_tokens: 1024,
        request_timeout_secs: 5,
    }
}

// --- ModelConfig & LlmProvider ---

#[test]
fn test_llm_provider_groq_serialization() {
    let provider = LlmProvider::Groq;
    let json = serde_json::to_string(&provider).unwrap();
    assert_eq!(json, "\"groq\"");

    let deserialized: LlmProvider = serde_json::from_str(&json).unwrap();
    assert!(matches!(deserialized, LlmProvider::Groq));
}

#[test]
fn test_model_config_base_url_defaults() {
    let mut config = test_config("unused");
    config.api_base_url = None;
    assert_eq!(config.base_url(), "https://api.groq.com/openai");

    config.provider = LlmProvider::OpenAi;
    assert_eq!(config.base_url(), "https://api.openai.com");

    config.provider = LlmProvider::OpenRouter;
    assert_eq!(config.base_url(), "https://openrouter.ai/api");

    config.provider = LlmProvider::Claude;
    assert_eq!(config.base_url(), "https://api.anthropic.com");
}

#[test]
fn test_model_config_base_url_custom_override() {
    let config = test_config("http://localhost:8080");
    assert_eq!(config.base_url(), "http://localhost:8080");
}

#[test]
fn test_model_config_deserialization_with_defaults() {
    let toml_str = r#"
        provider = "groq"
        model_id = "llama3-70b-8192"
        api_key = "gsk-test"
    "#;

    let config: ModelConfig = toml::from_str(toml_str).unwrap();
    assert!(matches!(config.provider, LlmProvider::Groq));
    assert_eq!(config.temperature, 0.3); // default
    assert_eq!(config.max_tokens, 1024); // default
    assert_eq!(config.request_timeout_secs, 60); // default
    assert!(config.api_base_url.is_none());
}

// --- OpenAI-compatible backend against wiremock ---

#[tokio::test]
async fn test_complete_returns_completion_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("Authorization", "Bearer gsk-test-123"))
        .and(body_partial_json(serde_json::json!({
            "model": "llama3-70b-8192"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{
                "message": {"role": "assistant", "content": "What does your loop iterate over?"},
                "finish_reason": "stop"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = LlmClient::new(test_config(&server.uri()));
    let reply = client
        .complete(Some("You are a Socratic tutor."), &[ChatMessage::user("help")])
        .await
        .unwrap();

    assert_eq!(reply, "What does your loop iterate over?");
}

#[tokio::test]
async fn test_complete_sends_system_prompt_first() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(serde_json::json!({
            "messages": [
                {"role": "system", "content": "policy"},
                {"role": "user", "content": "hi"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "hello"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = LlmClient::new(test_config(&server.uri()));
    let reply = client
        .complete(Some("policy"), &[ChatMessage::user("hi")])
        .await
        .unwrap();
    assert_eq!(reply, "hello");
}

#[tokio::test]
async fn test_server_error_maps_to_model_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "error": {"message": "internal"}
        })))
        .mount(&server)
        .await;

    let client = LlmClient::new(test_config(&server.uri()));
    let result = client.complete(None, &[ChatMessage::user("hi")]).await;

    assert!(matches!(result, Err(ProctorError::ModelUnavailable(_))));
}

#[tokio::test]
async fn test_unreachable_endpoint_maps_to_model_unavailable() {
    let client = LlmClient::new(test_config("http://127.0.0.1:1"));
    let result = client.complete(None, &[ChatMessage::user("hi")]).await;

    assert!(matches!(result, Err(ProctorError::ModelUnavailable(_))));
}
