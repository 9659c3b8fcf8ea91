//! Evidence assembly for the judge stage: a deterministic, labelled
//! concatenation of the three evidence sources. Pure functions of their
//! inputs; also reused for the export bundle.

use proctor_session::Transcript;

/// Interleave each question with its answer, in question order.
pub fn defense_section(questions: &[String], answers: &[String]) -> String {
    questions
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let a = answers.get(i).map(String::as_str).unwrap_or_default();
            format!("Q{}: {}\nA{}: {}", i + 1, q, i + 1, a)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Assemble the judge's input: chat history, submitted code, and the
/// question/answer defense, under explicit section labels.
pub fn assemble(
    transcript: &Transcript,
    artifact: &str,
    questions: &[String],
    answers: &[String],
) -> String {
    format!(
        "=== CHAT HISTORY ===\n{}\n\n=== CODE ===\n{}\n\n=== DEFENSE ===\n{}",
        transcript.render(),
        artifact,
        defense_section(questions, answers)
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use proctor_session::Speaker;

    fn transcript() -> Transcript {
        let mut t = Transcript::new();
        t.append(Speaker::Student, "how do I sum a list?").unwrap();
        t.append(Speaker::Tutor, "what happens on each step?").unwrap();
        t
    }

    #[test]
    fn assemble_contains_all_three_sections() {
        let questions = vec!["Why a loop?".to_string()];
        let answers = vec!["It visits each element once.".to_string()];
        let text = assemble(&transcript(), "print(1)", &questions, &answers);

        assert!(text.contains("=== CHAT HISTORY ==="));
        assert!(text.contains("=== CODE ==="));
        assert!(text.contains("=== DEFENSE ==="));
        assert!(text.contains("print(1)"));
        assert!(text.contains("STUDENT: how do I sum a list?"));
    }

    #[test]
    fn assemble_is_pure() {
        let questions = vec!["Q1?".to_string(), "Q2?".to_string()];
        let answers = vec!["A1".to_string(), "A2".to_string()];
        let t = transcript();
        let first = assemble(&t, "code", &questions, &answers);
        let second = assemble(&t, "code", &questions, &answers);
        assert_eq!(first, second);
    }

    #[test]
    fn defense_interleaves_in_question_order() {
        let questions = vec!["Q1?".to_string(), "Q2?".to_string(), "Q3?".to_string()];
        let answers = vec!["A1".to_string(), "A2".to_string(), "A3".to_string()];
        let text = defense_section(&questions, &answers);

        assert_eq!(
            text,
            "Q1: Q1?\nA1: A1\nQ2: Q2?\nA2: A2\nQ3: Q3?\nA3: A3"
        );

        // Every question is immediately followed by its matching answer.
        for (i, q) in questions.iter().enumerate() {
            let q_pos = text.find(q.as_str()).unwrap();
            let a_pos = text.find(&format!("A{}: ", i + 1)).unwrap();
            assert!(a_pos > q_pos);
        }
    }
}
