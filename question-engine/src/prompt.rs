//! Prompt builder for question generation.

use crate::answer_type::AnswerType;

/// System instruction sent with every generation request.
pub const SYSTEM_PROMPT: &str = "Act as a strict teacher.";

/// Difficulty requested from the model.
pub const DIFFICULTY: &str = "Medium";

/// Builds the user prompt asking for `count` questions of `answer_type`
/// about `context` (a topic or extracted document text).
///
/// # Example
/// ```
/// # use question_engine::{AnswerType, prompt::build_user_prompt};
/// let prompt = build_user_prompt("Binary Search Trees", 3, AnswerType::ShortAnswer);
/// assert!(prompt.contains("Generate 3 Medium level Short Answer questions"));
/// ```
pub fn build_user_prompt(context: &str, count: u32, answer_type: AnswerType) -> String {
    let mut out = String::with_capacity(context.len() + 256);
    out.push_str(&format!(
        "Generate {count} {DIFFICULTY} level {answer_type} questions based on this text:\n"
    ));
    out.push('"');
    out.push_str(context.trim());
    out.push_str("\"\n");
    out.push_str(
        "Strictly output a JSON object with a key \"questions\" which is a list of strings.\n",
    );
    out.push_str("Example: { \"questions\": [\"Q1...\", \"Q2...\"] }\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_names_count_type_and_context() {
        let p = build_user_prompt("  Java Thread Lifecycle \n", 5, AnswerType::LongAnswer);
        assert!(p.starts_with("Generate 5 Medium level Long Answer questions"));
        assert!(p.contains("\"Java Thread Lifecycle\""));
        assert!(p.contains("key \"questions\""));
    }
}
