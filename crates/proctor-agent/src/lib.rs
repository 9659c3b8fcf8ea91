//! Model gateway for the Proctor workflow: provider configuration, the
//! `LlmBackend` trait, and concrete backends for OpenAI-compatible APIs
//! (Groq, OpenAI, OpenRouter) and Claude.

pub mod backends;
pub mod config;
pub mod llm;

pub use backends::LlmBackend;
pub use config::{LlmProvider, ModelConfig};
pub use llm::LlmClient;
