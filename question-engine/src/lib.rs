//! Exam question generation.
//!
//! Public API: [`QuestionGenerator`]. It turns a topic string or the text of
//! an uploaded PDF into a prompt, calls the configured LLM in JSON mode and
//! returns the `questions` list from the model's answer.

mod answer_type;
pub mod document;
mod error;
mod generator;
pub mod parse;
pub mod prompt;

pub use answer_type::AnswerType;
pub use document::DocumentError;
pub use error::QuestionEngineError;
pub use generator::{MAX_QUESTION_COUNT, QuestionGenerator, validate_count};

pub type Result<T> = std::result::Result<T, QuestionEngineError>;
