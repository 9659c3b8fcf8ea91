use crate::backends::claude::ClaudeBackend;
use crate::backends::openai::OpenAiBackend;
use crate::backends::LlmBackend;
use crate::config::{LlmProvider, ModelConfig};
use proctor_core::{ChatMessage, ProctorResult};

/// LLM client that dispatches to the correct provider backend.
///
/// Uses the `LlmBackend` trait to abstract away provider-specific API
/// differences. To add a new provider: implement `LlmBackend` in `backends/`
/// and wire it here.
pub struct LlmClient {
    backend: Box<dyn LlmBackend>,
}

impl LlmClient {
    pub fn new(config: ModelConfig) -> Self {
        let backend: Box<dyn LlmBackend> = match config.provider {
            LlmProvider::Groq | LlmProvider::OpenAi | LlmProvider::OpenRouter => {
                Box::new(OpenAiBackend::new(config))
            }
            LlmProvider::Claude => Box::new(ClaudeBackend::new(config)),
        };
        Self { backend }
    }

    /// Create from a pre-built backend (for custom/external providers and tests).
    pub fn from_backend(backend: Box<dyn LlmBackend>) -> Self {
        Self { backend }
    }

    /// Single blocking chat completion.
    pub async fn complete(
        &self,
        system_prompt: Option<&str>,
        messages: &[ChatMessage],
    ) -> ProctorResult<String> {
        self.backend.complete(system_prompt, messages).await
    }
}
