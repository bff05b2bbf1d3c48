use question_engine::AnswerType;
use serde::Deserialize;

pub const DEFAULT_COUNT: u32 = 5;

fn default_count() -> u32 {
    DEFAULT_COUNT
}

/// Request payload for /api/generate.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    /// Free-text subject, e.g. "Binary Search Trees".
    pub topic: String,
    /// Number of questions to generate.
    #[serde(default = "default_count")]
    pub count: u32,
    #[serde(rename = "type", default)]
    pub answer_type: AnswerType,
}
