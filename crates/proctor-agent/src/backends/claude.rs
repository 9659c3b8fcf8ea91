use super::LlmBackend;
use crate::config::ModelConfig;
use async_trait::async_trait;
use proctor_core::{ChatMessage, ProctorError, ProctorResult, Role};
use serde::Serialize;
use std::time::Duration;

/// Claude (Anthropic) API backend.
pub struct ClaudeBackend {
    config: ModelConfig,
    http: reqwest::Client,
}

#[derive(Serialize)]
struct ClaudeMessage {
    role: String,
    content: String,
}

impl ClaudeBackend {
    pub fn new(config: ModelConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .unwrap_or_default();
        Self { config, http }
    }
}

#[async_trait]
impl LlmBackend for ClaudeBackend {
    async fn complete(
        &self,
        system_prompt: Option<&str>,
        messages: &[ChatMessage],
    ) -> ProctorResult<String> {
        let url = format!("{}/v1/messages", self.config.base_url());

        let api_messages: Vec<ClaudeMessage> = messages
            .iter()
            .filter(|m| m.role != Role::System)
            .map(|m| ClaudeMessage {
                role: match m.role {
                    Role::User => "user".to_string(),
                    Role::Assistant => "assistant".to_string(),
                    Role::System => unreachable!(),
                },
                content: m.content.clone(),
            })
            .collect();

        let mut body = serde_json::json!({
            "model": self.config.model_id,
            "temperature": self.config.temperature,
            "max_tokens": self.config.max_tokens,
            "messages": api_messages,
        });

        if let Some(sys) = system_prompt {
            body["system"] = serde_json::json!(sys);
        }

        let resp = self
            .http
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ProctorError::ModelUnavailable(e.to_string()))?;

        let status = resp.status();
        let resp_body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| ProctorError::ModelUnavailable(e.to_string()))?;

        if !status.is_success() {
            return Err(ProctorError::ModelUnavailable(format!(
                "Claude API error {status}: {resp_body}"
            )));
        }

        // First text content block is the completion.
        resp_body["content"]
            .as_array()
            .and_then(|blocks| {
                blocks
                    .iter()
                    .find_map(|b| b["text"].as_str().map(str::to_owned))
            })
            .ok_or_else(|| {
                ProctorError::ModelUnavailable("Claude response had no text content".into())
            })
    }
}
