//! Parsing of the model's JSON answer into a question list.
//!
//! Even in JSON mode some models wrap the object in a markdown fence or add
//! a sentence around it, so the outermost `{ ... }` span is tried as well.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::QuestionEngineError;

#[derive(Debug, Deserialize)]
struct QuestionsPayload {
    questions: Option<Value>,
}

/// Extracts the `questions` list from raw model output.
///
/// Entries may be strings or objects carrying a `question` string and are
/// returned as the model wrote them. Blank entries are dropped. An answer
/// with no usable question is malformed.
pub fn parse_questions(raw: &str) -> Result<Vec<String>, QuestionEngineError> {
    let payload =
        decode_payload(raw).ok_or_else(|| malformed("answer is not a JSON object", raw))?;

    let items = match payload.questions {
        Some(Value::Array(items)) => items,
        Some(_) => return Err(malformed("`questions` is not a list", raw)),
        None => return Err(malformed("missing `questions` key", raw)),
    };

    let questions: Vec<String> = items
        .into_iter()
        .filter_map(question_text)
        .filter(|q| !q.trim().is_empty())
        .collect();

    if questions.is_empty() {
        return Err(malformed("`questions` is empty", raw));
    }
    Ok(questions)
}

fn decode_payload(raw: &str) -> Option<QuestionsPayload> {
    let trimmed = raw.trim();
    if let Ok(p) = serde_json::from_str(trimmed) {
        return Some(p);
    }
    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    if end <= start {
        return None;
    }
    debug!("model output had text around the JSON object");
    serde_json::from_str(&trimmed[start..=end]).ok()
}

fn question_text(item: Value) -> Option<String> {
    match item {
        Value::String(s) => Some(s),
        Value::Object(mut map) => match map.remove("question") {
            Some(Value::String(s)) => Some(s),
            _ => None,
        },
        _ => None,
    }
}

fn malformed(reason: &str, raw: &str) -> QuestionEngineError {
    let preview: String = raw.chars().take(120).collect();
    QuestionEngineError::MalformedOutput(format!("{reason} (output: {preview:?})"))
}
