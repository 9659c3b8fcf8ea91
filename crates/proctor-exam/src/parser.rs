use tracing::warn;

/// Shown as the single audit question when the auditor's output could not
/// be used. Guarantees the audit phase is always completable.
pub const FALLBACK_QUESTION: &str =
    "The automatic question generator failed. In your own words, describe what \
     your submitted code does and why you structured it the way you did.";

/// Parse the auditor's free-text output into the question list.
///
/// The auditor is instructed to emit only a JSON array of strings, but the
/// model may violate that. Any array of strings is accepted verbatim,
/// whatever its length; everything else (non-JSON, wrong shape, empty array)
/// degrades to the single fallback question. This function never fails.
pub fn parse_question_list(raw: &str) -> Vec<String> {
    match serde_json::from_str::<serde_json::Value>(raw.trim()) {
        Ok(serde_json::Value::Array(items)) => {
            let questions: Option<Vec<String>> = items
                .iter()
                .map(|v| v.as_str().map(str::to_owned))
                .collect();
            match questions {
                Some(list) if !list.is_empty() => list,
                _ => {
                    warn!("Auditor returned an unusable array; using fallback question");
                    vec![FALLBACK_QUESTION.to_string()]
                }
            }
        }
        _ => {
            warn!("Auditor output was not a JSON array; using fallback question");
            vec![FALLBACK_QUESTION.to_string()]
        }
    }
}
