pub mod claude;
pub mod openai;

use async_trait::async_trait;
use proctor_core::{ChatMessage, ProctorResult};

/// Trait for LLM provider backends.
///
/// Each provider (Groq, OpenAI, OpenRouter, Claude) implements this trait to
/// handle API communication. Every call is blocking from the caller's point
/// of view: one request, one awaited completion, no streaming.
///
/// Completions are deterministic-ish at low temperature but callers must not
/// assume byte-identical output across retries.
///
/// To add a new provider:
/// 1. Create a new module in `backends/`
/// 2. Implement `LlmBackend` for your struct
/// 3. Add the variant to `LlmProvider` enum in `config.rs`
/// 4. Wire it up in `LlmClient::new()` in `llm.rs`
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Single chat completion: role-tagged messages in, completion text out.
    async fn complete(
        &self,
        system_prompt: Option<&str>,
        messages: &[ChatMessage],
    ) -> ProctorResult<String>;
}
