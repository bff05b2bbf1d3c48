//! HTTP client for the exam question generation API.
//!
//! - `POST {base}/api/generate`: JSON `{topic, count, type}`
//! - `POST {base}/api/generate-pdf`: multipart `file`, `count`, `type`
//! - `GET {base}/api/quiz/{id}`
//!
//! No retries and no request timeout; one call is one HTTP request.

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::error::{ClientError, Result};
use crate::model::{GenerationRequest, GenerationResult, StoredQuiz, TopicPayload};

const SNIPPET_CHARS: usize = 240;

#[derive(Debug, Clone)]
pub struct ExamApiClient {
    http: Client,
    base_url: String,
}

impl ExamApiClient {
    /// Builds a client for `base_url` (e.g. `http://localhost:8000`).
    ///
    /// # Errors
    /// [`ClientError::InvalidBaseUrl`] unless the URL is http(s).
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let raw = base_url.into();
        let trimmed = raw.trim().trim_end_matches('/');
        let has_host = trimmed
            .strip_prefix("http://")
            .or_else(|| trimmed.strip_prefix("https://"))
            .is_some_and(|rest| !rest.is_empty());
        if !has_host {
            return Err(ClientError::InvalidBaseUrl(raw));
        }

        let http = Client::builder().build()?;
        Ok(Self {
            http,
            base_url: trimmed.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends one generation request and decodes the question list.
    #[instrument(skip_all, fields(endpoint = request.endpoint()))]
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        let url = format!("{}{}", self.base_url, request.endpoint());
        let builder = match request {
            GenerationRequest::Topic {
                topic,
                count,
                answer_type,
            } => self.http.post(&url).json(&TopicPayload {
                topic,
                count: *count,
                answer_type: *answer_type,
            }),
            GenerationRequest::Document {
                file,
                count,
                answer_type,
            } => {
                let part = Part::bytes(file.bytes.to_vec())
                    .file_name(file.file_name.clone())
                    .mime_str("application/pdf")?;
                let form = Form::new()
                    .part("file", part)
                    .text("count", count.to_string())
                    .text("type", answer_type.as_str());
                self.http.post(&url).multipart(form)
            }
        };

        let res = builder.send().await?;
        let result: GenerationResult = read_json(res).await?;
        debug!(questions = result.questions.len(), "generation response decoded");
        Ok(result)
    }

    /// Fetches a stored quiz by id.
    #[instrument(skip(self))]
    pub async fn fetch_quiz(&self, id: &str) -> Result<StoredQuiz> {
        let url = format!("{}/api/quiz/{}", self.base_url, id.trim());
        let res = self.http.get(&url).send().await?;
        read_json(res).await
    }
}

/// Fails on non-2xx with a body snippet; decodes JSON otherwise.
async fn read_json<T: DeserializeOwned>(res: Response) -> Result<T> {
    let status = res.status();
    let body = res.text().await?;
    if !status.is_success() {
        return Err(ClientError::Status {
            status,
            snippet: snippet(&body),
        });
    }
    serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
}

fn snippet(body: &str) -> String {
    let trimmed = body.trim();
    let mut out: String = trimmed.chars().take(SNIPPET_CHARS).collect();
    if trimmed.chars().count() > SNIPPET_CHARS {
        out.push('…');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_validation() {
        let client = ExamApiClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert!(ExamApiClient::new("https://exams.example.com").is_ok());
        for bad in ["localhost:8000", "ftp://host", "http://", ""] {
            assert!(
                matches!(ExamApiClient::new(bad), Err(ClientError::InvalidBaseUrl(_))),
                "{bad}"
            );
        }
    }

    #[test]
    fn snippet_is_bounded() {
        assert_eq!(snippet("  short  "), "short");
        let long = "x".repeat(SNIPPET_CHARS + 10);
        assert_eq!(snippet(&long).chars().count(), SNIPPET_CHARS + 1);
    }
}
