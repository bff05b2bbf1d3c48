use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Topic recorded for quizzes generated from an uploaded document.
pub const DOCUMENT_TOPIC: &str = "Uploaded PDF";

/// A stored set of generated questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: Uuid,
    pub topic: String,
    /// Questions in the order the model produced them.
    pub questions: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Quiz {
    pub fn new(topic: impl Into<String>, questions: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            topic: topic.into(),
            questions,
            created_at: Utc::now(),
        }
    }
}
