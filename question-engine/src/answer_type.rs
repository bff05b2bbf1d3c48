use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of answer the generated questions should call for.
///
/// Serialized as the human-readable labels used on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AnswerType {
    #[default]
    #[serde(rename = "Short Answer")]
    ShortAnswer,
    #[serde(rename = "Long Answer")]
    LongAnswer,
}

impl AnswerType {
    pub fn as_str(self) -> &'static str {
        match self {
            AnswerType::ShortAnswer => "Short Answer",
            AnswerType::LongAnswer => "Long Answer",
        }
    }
}

impl fmt::Display for AnswerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnswerType {
    type Err = String;

    /// Accepts the wire labels case-insensitively, plus `short` / `long`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "short answer" | "short" => Ok(AnswerType::ShortAnswer),
            "long answer" | "long" => Ok(AnswerType::LongAnswer),
            other => Err(format!(
                "unknown answer type `{other}`; expected \"Short Answer\" or \"Long Answer\""
            )),
        }
    }
}
