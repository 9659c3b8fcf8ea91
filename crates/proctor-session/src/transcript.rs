use chrono::{DateTime, Utc};
use proctor_core::{ProctorError, ProctorResult};
use serde::{Deserialize, Serialize};

/// Who authored a transcript turn. Explicitly tagged rather than inferred
/// from the value's type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    Student,
    Tutor,
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Speaker::Student => write!(f, "STUDENT"),
            Speaker::Tutor => write!(f, "TUTOR"),
        }
    }
}

/// A single exchange in the tutoring conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Speaker,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// The tutoring conversation: append-only while the Tutoring phase is open,
/// frozen for good once the exam artifact is submitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    turns: Vec<Turn>,
    #[serde(default)]
    frozen: bool,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn. Fails once the transcript has been frozen.
    pub fn append(&mut self, speaker: Speaker, content: impl Into<String>) -> ProctorResult<()> {
        if self.frozen {
            return Err(ProctorError::Session(
                "transcript is frozen; tutoring has ended".into(),
            ));
        }
        self.turns.push(Turn {
            speaker,
            content: content.into(),
            timestamp: Utc::now(),
        });
        Ok(())
    }

    /// Seal the transcript. Idempotent.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Render as labelled plain text, one line per turn, in order. Used both
    /// for the judge's evidence block and the export bundle.
    pub fn render(&self) -> String {
        self.turns
            .iter()
            .map(|t| format!("{}: {}", t.speaker, t.content))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn append_preserves_order() {
        let mut t = Transcript::new();
        t.append(Speaker::Student, "how do loops work?").unwrap();
        t.append(Speaker::Tutor, "what have you tried?").unwrap();

        assert_eq!(t.len(), 2);
        assert_eq!(t.turns()[0].speaker, Speaker::Student);
        assert_eq!(t.turns()[1].speaker, Speaker::Tutor);
    }

    #[test]
    fn frozen_transcript_rejects_appends() {
        let mut t = Transcript::new();
        t.append(Speaker::Student, "hi").unwrap();
        t.freeze();

        assert!(t.is_frozen());
        assert!(t.append(Speaker::Tutor, "too late").is_err());
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn freeze_is_idempotent() {
        let mut t = Transcript::new();
        t.freeze();
        t.freeze();
        assert!(t.is_frozen());
    }

    #[test]
    fn render_labels_each_speaker() {
        let mut t = Transcript::new();
        t.append(Speaker::Student, "question").unwrap();
        t.append(Speaker::Tutor, "counter-question").unwrap();

        let text = t.render();
        assert_eq!(text, "STUDENT: question\nTUTOR: counter-question");
    }

    #[test]
    fn empty_transcript_renders_empty() {
        assert_eq!(Transcript::new().render(), "");
    }
}
