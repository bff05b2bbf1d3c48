use std::fmt;
use std::io;
use std::path::Path;
use std::sync::Arc;

pub use question_engine::AnswerType;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which input the form submits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Topic,
    Document,
}

/// A PDF picked by the user. Cloning shares the bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct DocumentUpload {
    pub file_name: String,
    pub bytes: Arc<[u8]>,
}

impl DocumentUpload {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    /// Reads `path` into memory; the file name is kept for the upload.
    pub async fn read(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document.pdf".to_string());
        Ok(Self::new(file_name, bytes))
    }
}

impl fmt::Debug for DocumentUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentUpload")
            .field("file_name", &self.file_name)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// One submission, either by topic (JSON) or by document (multipart).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationRequest {
    Topic {
        topic: String,
        count: u32,
        answer_type: AnswerType,
    },
    Document {
        file: DocumentUpload,
        count: u32,
        answer_type: AnswerType,
    },
}

impl GenerationRequest {
    pub fn endpoint(&self) -> &'static str {
        match self {
            GenerationRequest::Topic { .. } => "/api/generate",
            GenerationRequest::Document { .. } => "/api/generate-pdf",
        }
    }
}

/// JSON body of a topic submission.
#[derive(Debug, Serialize)]
pub(crate) struct TopicPayload<'a> {
    pub topic: &'a str,
    pub count: u32,
    #[serde(rename = "type")]
    pub answer_type: AnswerType,
}

/// Response of both generation endpoints. Only `questions` is required;
/// the quiz id is kept as whatever JSON the service sent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GenerationResult {
    pub questions: Vec<String>,
    #[serde(default)]
    pub id: Option<Value>,
}

impl GenerationResult {
    pub fn numbered(&self) -> Vec<String> {
        numbered(&self.questions)
    }
}

/// A quiz fetched back by id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoredQuiz {
    pub id: String,
    pub questions: Vec<String>,
}

/// `"1. first"`, `"2. second"`, ...
pub fn numbered(questions: &[String]) -> Vec<String> {
    questions
        .iter()
        .enumerate()
        .map(|(i, q)| format!("{}. {q}", i + 1))
        .collect()
}
