use crate::report::VerdictReport;
use crate::transcript::Transcript;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The phases of one exam attempt, in the only order they may occur.
/// `Ord` follows declaration order, so "phase never decreases" is a plain
/// comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Identification,
    Tutoring,
    Audit,
    Verdict,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Identification => write!(f, "identification"),
            Phase::Tutoring => write!(f, "tutoring"),
            Phase::Audit => write!(f, "audit"),
            Phase::Verdict => write!(f, "verdict"),
        }
    }
}

/// Who is taking the exam. Set once at identification, immutable afterward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub surname: String,
    pub student_id: String,
}

/// Whether the evidence bundle left the building.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportOutcome {
    /// No verdict yet, so no export was tried.
    NotAttempted,
    /// Delivered to the configured transport.
    Succeeded,
    /// Transport missing or delivery failed; the verdict was still shown
    /// in-session.
    Degraded,
}

/// One student's exam attempt. Exclusively owned by the engine driving it;
/// there is no cross-session sharing and no concurrent mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub phase: Phase,
    pub identity: Option<Identity>,
    pub transcript: Transcript,
    /// The submitted exam code, opaque to the core. Set exactly once.
    pub submitted_artifact: Option<String>,
    /// Set exactly once by the auditor stage (possibly the fallback list).
    pub audit_questions: Vec<String>,
    /// Index-aligned with `audit_questions`; populated atomically in one
    /// submission.
    pub audit_answers: Vec<String>,
    pub verdict: Option<VerdictReport>,
    pub export_outcome: ExportOutcome,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            phase: Phase::Identification,
            identity: None,
            transcript: Transcript::new(),
            submitted_artifact: None,
            audit_questions: Vec::new(),
            audit_answers: Vec::new(),
            verdict: None,
            export_outcome: ExportOutcome::NotAttempted,
            created_at: now,
            updated_at: now,
        }
    }

    /// Advance to `next`, which must be strictly later in the phase order.
    /// Phase regressions only happen through [`Session::reset`].
    pub fn advance(&mut self, next: Phase) {
        debug_assert!(next > self.phase, "phase must only advance");
        self.phase = next;
        self.touch();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// True once every evidence source the judge needs is populated.
    pub fn ready_for_verdict(&self) -> bool {
        self.submitted_artifact.is_some()
            && !self.audit_questions.is_empty()
            && self.audit_answers.len() == self.audit_questions.len()
    }

    /// Full-state clear: back to Identification with a fresh attempt.
    /// Keeps nothing, not even the session id.
    pub fn reset(&mut self) {
        *self = Session::new();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::transcript::Speaker;

    #[test]
    fn phases_are_strictly_ordered() {
        assert!(Phase::Identification < Phase::Tutoring);
        assert!(Phase::Tutoring < Phase::Audit);
        assert!(Phase::Audit < Phase::Verdict);
    }

    #[test]
    fn new_session_starts_empty_at_identification() {
        let s = Session::new();
        assert_eq!(s.phase, Phase::Identification);
        assert!(s.identity.is_none());
        assert!(s.transcript.is_empty());
        assert!(s.submitted_artifact.is_none());
        assert!(s.audit_questions.is_empty());
        assert!(s.audit_answers.is_empty());
        assert!(s.verdict.is_none());
        assert_eq!(s.export_outcome, ExportOutcome::NotAttempted);
    }

    #[test]
    fn advance_moves_phase_forward() {
        let mut s = Session::new();
        s.advance(Phase::Tutoring);
        assert_eq!(s.phase, Phase::Tutoring);
        s.advance(Phase::Audit);
        s.advance(Phase::Verdict);
        assert_eq!(s.phase, Phase::Verdict);
    }

    #[test]
    fn reset_discards_everything() {
        let mut s = Session::new();
        s.identity = Some(Identity {
            name: "Ada".into(),
            surname: "Lovelace".into(),
            student_id: "1815".into(),
        });
        s.advance(Phase::Tutoring);
        s.transcript.append(Speaker::Student, "hi").unwrap();
        s.submitted_artifact = Some("print(1)".into());
        s.audit_questions = vec!["Q1?".into()];
        s.audit_answers = vec!["A1".into()];
        s.verdict = Some(VerdictReport::new("ok"));
        s.export_outcome = ExportOutcome::Degraded;

        s.reset();

        assert_eq!(s.phase, Phase::Identification);
        assert!(s.identity.is_none());
        assert!(s.transcript.is_empty());
        assert!(!s.transcript.is_frozen());
        assert!(s.submitted_artifact.is_none());
        assert!(s.audit_questions.is_empty());
        assert!(s.audit_answers.is_empty());
        assert!(s.verdict.is_none());
        assert_eq!(s.export_outcome, ExportOutcome::NotAttempted);
    }

    #[test]
    fn ready_for_verdict_requires_all_evidence() {
        let mut s = Session::new();
        assert!(!s.ready_for_verdict());

        s.submitted_artifact = Some("code".into());
        assert!(!s.ready_for_verdict());

        s.audit_questions = vec!["Q1?".into(), "Q2?".into()];
        assert!(!s.ready_for_verdict());

        s.audit_answers = vec!["A1".into()];
        assert!(!s.ready_for_verdict());

        s.audit_answers.push("A2".into());
        assert!(s.ready_for_verdict());
    }

    #[test]
    fn session_serialization_round_trip() {
        let mut s = Session::new();
        s.audit_questions = vec!["Q1?".into()];
        let json = serde_json::to_string(&s).unwrap();
        let back: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, s.id);
        assert_eq!(back.phase, Phase::Identification);
        assert_eq!(back.audit_questions, vec!["Q1?".to_string()]);
    }
}
