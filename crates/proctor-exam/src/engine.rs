use crate::evidence;
use crate::parser::parse_question_list;
use crate::profiles::{
    auditor_profile, judge_profile, tutor_profile, RoleProfile, AUDITOR_PROMPT, JUDGE_PROMPT,
    TUTOR_PROMPT,
};
use proctor_agent::{LlmBackend, LlmClient, ModelConfig};
use proctor_core::{ChatMessage, ProctorError, ProctorResult};
use proctor_export::{EvidenceBundle, Exporter};
use proctor_session::{ExportOutcome, Identity, Phase, Session, Speaker, VerdictReport};
use std::sync::Arc;
use tracing::{info, warn};

/// One model role bound to its client and policy prompt.
struct RoleRunner {
    client: LlmClient,
    system_prompt: String,
}

impl RoleRunner {
    fn from_profile(profile: RoleProfile) -> Self {
        Self {
            client: LlmClient::new(profile.model),
            system_prompt: profile.system_prompt,
        }
    }

    async fn complete(&self, messages: &[ChatMessage]) -> ProctorResult<String> {
        self.client
            .complete(Some(&self.system_prompt), messages)
            .await
    }
}

/// The exam phase state machine.
///
/// Owns the three role runners and drives one [`Session`] through
/// Identification → Tutoring → Audit → Verdict. Every model call is awaited
/// before any session field is written, so a failed call never leaves a
/// half-applied transition behind.
pub struct ExamEngine {
    tutor: RoleRunner,
    auditor: RoleRunner,
    judge: RoleRunner,
    exporter: Option<Arc<dyn Exporter>>,
}

impl ExamEngine {
    /// Build the engine from a base model config using the default role
    /// profiles. `exporter` is `None` when transport credentials are absent,
    /// which is a normal, non-fatal condition.
    pub fn new(base_config: &ModelConfig, exporter: Option<Arc<dyn Exporter>>) -> Self {
        Self {
            tutor: RoleRunner::from_profile(tutor_profile(base_config)),
            auditor: RoleRunner::from_profile(auditor_profile(base_config)),
            judge: RoleRunner::from_profile(judge_profile(base_config)),
            exporter,
        }
    }

    /// Build from pre-built backends with the default prompts. Used by tests
    /// to inject mocks.
    pub fn with_backends(
        tutor: Box<dyn LlmBackend>,
        auditor: Box<dyn LlmBackend>,
        judge: Box<dyn LlmBackend>,
        exporter: Option<Arc<dyn Exporter>>,
    ) -> Self {
        Self {
            tutor: RoleRunner {
                client: LlmClient::from_backend(tutor),
                system_prompt: TUTOR_PROMPT.to_string(),
            },
            auditor: RoleRunner {
                client: LlmClient::from_backend(auditor),
                system_prompt: AUDITOR_PROMPT.to_string(),
            },
            judge: RoleRunner {
                client: LlmClient::from_backend(judge),
                system_prompt: JUDGE_PROMPT.to_string(),
            },
            exporter,
        }
    }

    /// Identification → Tutoring. All three identity fields must be
    /// non-blank; otherwise nothing changes.
    pub fn begin(&self, session: &mut Session, identity: Identity) -> ProctorResult<()> {
        self.require_phase(session, Phase::Identification)?;

        if identity.name.trim().is_empty()
            || identity.surname.trim().is_empty()
            || identity.student_id.trim().is_empty()
        {
            return Err(ProctorError::Validation(
                "name, surname and student id are all required".into(),
            ));
        }

        info!(session_id = %session.id, student = %identity.student_id, "Exam started");
        session.identity = Some(identity);
        session.advance(Phase::Tutoring);
        Ok(())
    }

    /// One tutoring exchange. The student message and the tutor's reply are
    /// appended to the transcript only after the model call succeeds, so an
    /// unavailable model leaves the transcript untouched. Does not change
    /// the phase.
    pub async fn tutor_reply(&self, session: &mut Session, input: &str) -> ProctorResult<String> {
        self.require_phase(session, Phase::Tutoring)?;

        if input.trim().is_empty() {
            return Err(ProctorError::Validation(
                "write something before sending".into(),
            ));
        }

        let mut messages = wire_history(session);
        messages.push(ChatMessage::user(input));

        let reply = self.tutor.complete(&messages).await?;

        session.transcript.append(Speaker::Student, input)?;
        session.transcript.append(Speaker::Tutor, reply.clone())?;
        session.touch();

        info!(session_id = %session.id, turns = session.transcript.len(), "Tutor replied");
        Ok(reply)
    }

    /// Tutoring → Audit. Stores the decoded artifact and freezes the
    /// transcript. The auditor call is deferred to the first
    /// [`ExamEngine::audit_questions`] call so a re-render never bills twice.
    pub fn submit_artifact(&self, session: &mut Session, code: &str) -> ProctorResult<()> {
        self.require_phase(session, Phase::Tutoring)?;

        if code.trim().is_empty() {
            return Err(ProctorError::Validation(
                "the submitted file decoded to empty text".into(),
            ));
        }

        session.submitted_artifact = Some(code.to_string());
        session.transcript.freeze();
        session.advance(Phase::Audit);

        info!(session_id = %session.id, bytes = code.len(), "Artifact submitted; tutoring closed");
        Ok(())
    }

    /// Return the audit questions, invoking the auditor exactly once per
    /// session. Subsequent calls (UI re-renders, retries after a failed
    /// answer submission) reuse the stored list.
    pub async fn audit_questions(&self, session: &mut Session) -> ProctorResult<Vec<String>> {
        self.require_phase(session, Phase::Audit)?;

        if !session.audit_questions.is_empty() {
            return Ok(session.audit_questions.clone());
        }

        let artifact = session.submitted_artifact.clone().ok_or_else(|| {
            ProctorError::Session("no artifact present in audit phase".into())
        })?;

        let raw = self
            .auditor
            .complete(&[ChatMessage::user(artifact)])
            .await?;

        let questions = parse_question_list(&raw);
        info!(session_id = %session.id, count = questions.len(), "Audit questions generated");

        session.audit_questions = questions.clone();
        session.touch();
        Ok(questions)
    }

    /// Audit → Verdict. Accepts the full answer set atomically, runs the
    /// judge once, stores the verdict, then attempts the best-effort export.
    /// On any failure before the verdict is stored the session is unchanged
    /// and stays in Audit for retry.
    pub async fn submit_answers(
        &self,
        session: &mut Session,
        answers: Vec<String>,
    ) -> ProctorResult<VerdictReport> {
        self.require_phase(session, Phase::Audit)?;

        if session.audit_questions.is_empty() {
            return Err(ProctorError::Session(
                "audit questions have not been generated yet".into(),
            ));
        }
        if answers.len() != session.audit_questions.len()
            || answers.iter().any(|a| a.trim().is_empty())
        {
            return Err(ProctorError::Validation(format!(
                "every one of the {} questions needs an answer",
                session.audit_questions.len()
            )));
        }

        let artifact = session.submitted_artifact.clone().ok_or_else(|| {
            ProctorError::Session("no artifact present in audit phase".into())
        })?;

        let evidence_text = evidence::assemble(
            &session.transcript,
            &artifact,
            &session.audit_questions,
            &answers,
        );

        let verdict_text = self
            .judge
            .complete(&[ChatMessage::user(evidence_text)])
            .await?;

        // The judge call succeeded: commit the transition in one go.
        session.audit_answers = answers;
        let report = VerdictReport::new(verdict_text);
        session.verdict = Some(report.clone());
        session.advance(Phase::Verdict);

        info!(session_id = %session.id, "Verdict produced");

        let outcome = self.export(session).await;
        session.export_outcome = outcome;
        session.touch();

        Ok(report)
    }

    /// Any phase → Identification, discarding the whole attempt.
    pub fn reset(&self, session: &mut Session) {
        info!(session_id = %session.id, phase = %session.phase, "Session reset");
        session.reset();
    }

    /// Best-effort evidence delivery. Never fails the session: missing
    /// transport or a delivery error degrades the outcome and the verdict
    /// stays on screen.
    async fn export(&self, session: &Session) -> ExportOutcome {
        let Some(exporter) = &self.exporter else {
            warn!(session_id = %session.id, "No export transport configured; keeping verdict in-session only");
            return ExportOutcome::Degraded;
        };
        let (Some(identity), Some(artifact), Some(verdict)) = (
            &session.identity,
            &session.submitted_artifact,
            &session.verdict,
        ) else {
            warn!(session_id = %session.id, "Evidence incomplete at export time");
            return ExportOutcome::Degraded;
        };

        let bundle = EvidenceBundle::new(
            identity,
            &session.transcript.render(),
            artifact,
            &evidence::defense_section(&session.audit_questions, &session.audit_answers),
            &verdict.content,
        );

        match exporter.deliver(&bundle, identity).await {
            Ok(()) => {
                info!(session_id = %session.id, transport = exporter.name(), "Evidence exported");
                ExportOutcome::Succeeded
            }
            Err(e) => {
                warn!(session_id = %session.id, error = %e, "Export failed; verdict delivered in-session only");
                ExportOutcome::Degraded
            }
        }
    }

    fn require_phase(&self, session: &Session, expected: Phase) -> ProctorResult<()> {
        if session.phase != expected {
            return Err(ProctorError::Session(format!(
                "operation requires the {expected} phase, session is in {}",
                session.phase
            )));
        }
        Ok(())
    }
}

/// Convert the speaker-tagged transcript into wire messages for the tutor
/// call: student turns become user messages, tutor turns assistant messages.
fn wire_history(session: &Session) -> Vec<ChatMessage> {
    session
        .transcript
        .turns()
        .iter()
        .map(|turn| match turn.speaker {
            Speaker::Student => ChatMessage::user(turn.content.clone()),
            Speaker::Tutor => ChatMessage::assistant(turn.content.clone()),
        })
        .collect()
}
