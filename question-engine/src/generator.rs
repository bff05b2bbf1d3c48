use std::sync::Arc;

use ai_llm_service::LlmService;
use tracing::{debug, info, instrument};

use crate::answer_type::AnswerType;
use crate::document::{self, DEFAULT_MAX_DOCUMENT_CHARS};
use crate::error::QuestionEngineError;
use crate::parse::parse_questions;
use crate::prompt::{SYSTEM_PROMPT, build_user_prompt};

/// Largest question count a single request may ask for.
pub const MAX_QUESTION_COUNT: u32 = 50;

/// Rejects counts outside `1..=MAX_QUESTION_COUNT`.
pub fn validate_count(count: u32) -> Result<(), QuestionEngineError> {
    if count == 0 || count > MAX_QUESTION_COUNT {
        return Err(QuestionEngineError::InvalidRequest(format!(
            "count must be between 1 and {MAX_QUESTION_COUNT}, got {count}"
        )));
    }
    Ok(())
}

/// Generates exam questions through a shared [`LlmService`].
#[derive(Clone)]
pub struct QuestionGenerator {
    llm: Arc<LlmService>,
    max_document_chars: usize,
}

impl QuestionGenerator {
    pub fn new(llm: Arc<LlmService>) -> Self {
        Self {
            llm,
            max_document_chars: DEFAULT_MAX_DOCUMENT_CHARS,
        }
    }

    /// Caps how much extracted document text is sent to the model.
    pub fn with_max_document_chars(mut self, max_chars: usize) -> Self {
        self.max_document_chars = max_chars.max(1);
        self
    }

    pub fn llm(&self) -> &LlmService {
        &self.llm
    }

    /// Questions about a free-text topic.
    #[instrument(skip(self, topic), fields(topic_len = topic.len()))]
    pub async fn from_topic(
        &self,
        topic: &str,
        count: u32,
        answer_type: AnswerType,
    ) -> Result<Vec<String>, QuestionEngineError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(QuestionEngineError::InvalidRequest(
                "topic must not be empty".into(),
            ));
        }
        validate_count(count)?;
        self.generate(topic, count, answer_type).await
    }

    /// Questions about the text of a PDF document.
    ///
    /// Extraction runs on the blocking pool; the text is truncated before
    /// it reaches the prompt.
    #[instrument(skip(self, pdf), fields(bytes = pdf.len()))]
    pub async fn from_document(
        &self,
        pdf: Vec<u8>,
        count: u32,
        answer_type: AnswerType,
    ) -> Result<Vec<String>, QuestionEngineError> {
        validate_count(count)?;
        let text = tokio::task::spawn_blocking(move || document::extract_text(&pdf)).await??;
        let context = document::truncate_chars(&text, self.max_document_chars);
        debug!(
            extracted = text.chars().count(),
            used = context.chars().count(),
            "document text ready"
        );
        self.generate(context, count, answer_type).await
    }

    async fn generate(
        &self,
        context: &str,
        count: u32,
        answer_type: AnswerType,
    ) -> Result<Vec<String>, QuestionEngineError> {
        let prompt = build_user_prompt(context, count, answer_type);
        let raw = self.llm.generate(&prompt, Some(SYSTEM_PROMPT)).await?;
        let questions = parse_questions(&raw)?;
        if questions.len() != count as usize {
            debug!(
                requested = count,
                received = questions.len(),
                "model returned a different number of questions"
            );
        }
        info!(questions = questions.len(), %answer_type, "questions generated");
        Ok(questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_bounds() {
        assert!(validate_count(0).is_err());
        assert!(validate_count(1).is_ok());
        assert!(validate_count(MAX_QUESTION_COUNT).is_ok());
        assert!(validate_count(MAX_QUESTION_COUNT + 1).is_err());
    }
}
