use proctor_agent::ModelConfig;
use serde::{Deserialize, Serialize};

/// How many probing questions the auditor is asked to produce.
pub const AUDIT_QUESTION_COUNT: usize = 5;

/// The three model roles in the exam workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExamRole {
    /// Answers student questions during the exam without revealing
    /// solutions, appending Socratic follow-ups.
    Tutor,
    /// Inspects the submitted code once and produces the probing questions.
    Auditor,
    /// Reconciles transcript, code, and defense answers into a narrative
    /// integrity verdict.
    Judge,
}

impl std::fmt::Display for ExamRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExamRole::Tutor => write!(f, "tutor"),
            ExamRole::Auditor => write!(f, "auditor"),
            ExamRole::Judge => write!(f, "judge"),
        }
    }
}

/// Configuration for one model role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleProfile {
    pub role: ExamRole,
    pub model: ModelConfig,
    pub system_prompt: String,
}

/// Create the default role profiles for the exam workflow.
/// Uses the provided base config as template, adjusting per role.
pub fn default_profiles(base_config: &ModelConfig) -> Vec<RoleProfile> {
    vec![
        tutor_profile(base_config),
        auditor_profile(base_config),
        judge_profile(base_config),
    ]
}

pub fn tutor_profile(base: &ModelConfig) -> RoleProfile {
    let mut model = base.clone();
    model.temperature = 0.3;

    RoleProfile {
        role: ExamRole::Tutor,
        model,
        system_prompt: TUTOR_PROMPT.to_string(),
    }
}

pub fn auditor_profile(base: &ModelConfig) -> RoleProfile {
    let mut model = base.clone();
    model.temperature = 0.2;

    RoleProfile {
        role: ExamRole::Auditor,
        model,
        system_prompt: AUDITOR_PROMPT.to_string(),
    }
}

pub fn judge_profile(base: &ModelConfig) -> RoleProfile {
    let mut model = base.clone();
    model.temperature = 0.2;

    RoleProfile {
        role: ExamRole::Judge,
        model,
        system_prompt: JUDGE_PROMPT.to_string(),
    }
}

// The prompts below are configuration text handed verbatim to the model
// backend; none of their wording is interpreted by the engine.

pub(crate) const TUTOR_PROMPT: &str = "\
You are a Socratic programming tutor supervising a student during an exam.

Rules:
1. Never give the direct answer or write code for the student.
2. Help the student think: respond with hints, analogies, and pointed
   questions about their own reasoning.
3. When an answer is exploratory, append one probing follow-up question.
4. Stay within the topic of the exam exercise; refuse unrelated requests.
5. Keep answers short — two or three sentences plus the follow-up question.
";

pub(crate) const AUDITOR_PROMPT: &str = "\
You are an examiner inspecting the code a student just submitted. Your job
is to produce exactly 5 probing questions that reveal whether the student
understands their own submission.

Rules:
1. Ask about design decisions, control flow, edge cases, and the behaviour
   of specific lines in the submitted code.
2. Each question must be answerable from the submission alone.
3. Respond with ONLY a JSON array of 5 strings. No prose, no markdown, no
   numbering outside the array.
";

pub(crate) const JUDGE_PROMPT: &str = "\
You are the integrity judge for an AI-assisted exam. You receive three
evidence blocks: CHAT HISTORY (the student's conversation with a restricted
tutor), CODE (the submitted solution), and DEFENSE (the student's answers to
probing questions about that code).

Reconcile the three sources against these archetypes:
1. Consistent understanding — the chat shows gradual work, the code matches
   the chat's level, the defense explains the code correctly. Verdict:
   AUTHENTIC WORK.
2. Unexplained capability — the code is far beyond anything explored in the
   chat and the defense is vague or contradicts the code. Verdict:
   LIKELY OUTSIDE ASSISTANCE.
3. Mixed signals — partial understanding with unexplained fragments.
   Verdict: INCONCLUSIVE, flag for manual review.

Write a short narrative report: the verdict label, the key observations
behind it, a confidence score from 0 to 100, and a suggested grade from 0
to 10.
";
