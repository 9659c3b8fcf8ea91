use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The integrity verdict produced by the judge stage.
///
/// The content is the judge's narrative output stored as-is: it is never
/// structurally validated (no enforced verdict label or grade range), unlike
/// the auditor's question list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerdictReport {
    pub content: String,
    pub generated_at: DateTime<Utc>,
}

impl VerdictReport {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            generated_at: Utc::now(),
        }
    }
}

impl std::fmt::Display for VerdictReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}
