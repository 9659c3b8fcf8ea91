use proctor_session::Identity;
use serde::{Deserialize, Serialize};

/// One named artifact inside the evidence package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleEntry {
    pub name: String,
    pub content: String,
}

/// The in-memory evidence package handed to the export transport: chat log,
/// submitted code, defense Q&A, and verdict report, named deterministically
/// from the student's surname. Packaging beyond this container (compression,
/// mail attachments) belongs to the transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceBundle {
    pub entries: Vec<BundleEntry>,
}

impl EvidenceBundle {
    pub fn new(
        identity: &Identity,
        transcript_text: &str,
        artifact_text: &str,
        defense_text: &str,
        verdict_text: &str,
    ) -> Self {
        let stem = identity.surname.trim().to_lowercase();
        let entry = |suffix: &str, content: &str| BundleEntry {
            name: format!("{stem}_{suffix}.txt"),
            content: content.to_string(),
        };
        Self {
            entries: vec![
                entry("chat_log", transcript_text),
                entry("submission", artifact_text),
                entry("defense", defense_text),
                entry("verdict", verdict_text),
            ],
        }
    }

    pub fn entry(&self, name: &str) -> Option<&BundleEntry> {
        self.entries.iter().find(|e| e.name == name)
    }
}
