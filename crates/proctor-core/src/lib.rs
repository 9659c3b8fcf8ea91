//! Core types and error definitions for the Proctor exam workflow.
//!
//! This crate provides the foundational types shared across all Proctor
//! crates: the unified error enum and the wire-level chat message types
//! exchanged with a language-model backend.
//!
//! # Main types
//!
//! - [`ProctorError`] — Unified error enum for all Proctor subsystems.
//! - [`ProctorResult`] — Convenience alias for `Result<T, ProctorError>`.
//! - [`Role`] — Wire-level chat role (system, user, assistant).
//! - [`ChatMessage`] — A single role-tagged message sent to a model backend.

use serde::{Deserialize, Serialize};

// --- Error types ---

/// Top-level error type for the Proctor workflow.
///
/// Each variant corresponds to a subsystem or failure class that can block
/// a phase transition. Malformed auditor output deliberately has no variant
/// here: the question parser degrades instead of failing.
#[derive(Debug, thiserror::Error)]
pub enum ProctorError {
    /// User input failed a local validation check (empty identification
    /// field, incomplete defense answers). Recovered by re-prompting; never
    /// mutates session state.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The model backend could not be reached or refused the request.
    /// Retryable; the triggering transition must not have written any
    /// session field.
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    /// An operation was attempted in a phase where it is not legal.
    #[error("Session error: {0}")]
    Session(String),

    /// An error in configuration parsing or validation.
    #[error("Config error: {0}")]
    Config(String),

    /// Evidence delivery failed. Never fatal: the engine converts this into
    /// a degraded export outcome.
    #[error("Export error: {0}")]
    Export(String),

    /// A JSON serialization or deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenience `Result` alias using [`ProctorError`].
pub type ProctorResult<T> = Result<T, ProctorError>;

// --- Wire message types ---

/// The role tag of a [`ChatMessage`] as understood by model backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A system-level instruction or policy prompt.
    System,
    /// The human participant (the student, in this workflow).
    User,
    /// The model's reply.
    Assistant,
}

/// A single role-tagged message in a model request.
///
/// This is the gateway wire type only. The student-facing transcript keeps
/// its own speaker-tagged turns and is converted to wire messages at call
/// time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// The role of the message author.
    pub role: Role,
    /// The textual content of the message.
    pub content: String,
}

impl ChatMessage {
    /// Creates a new message with the given role and content.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Creates a new message with [`Role::System`].
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Creates a new message with [`Role::User`].
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Creates a new message with [`Role::Assistant`].
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_message_creation() {
        let msg = ChatMessage::user("Hello");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "Hello");
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::System).unwrap(), "\"system\"");
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&Role::Assistant).unwrap(),
            "\"assistant\""
        );
    }

    #[test]
    fn test_chat_message_round_trip() {
        let msg = ChatMessage::assistant("reply");
        let json = serde_json::to_string(&msg).unwrap();
        let back: ChatMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back.role, Role::Assistant);
        assert_eq!(back.content, "reply");
    }

    #[test]
    fn test_error_display() {
        let err = ProctorError::ModelUnavailable("timeout".into());
        assert_eq!(err.to_string(), "Model unavailable: timeout");
    }
}
