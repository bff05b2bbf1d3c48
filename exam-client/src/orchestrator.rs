//! View state and submission flow of the question-generation form.
//!
//! One [`RequestOrchestrator`] owns the inputs (mode, topic, file, count,
//! answer type) and the outcome (loading flag, error, question list). A
//! submission issues at most one request; a second `submit` while one is in
//! flight is refused.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{error, info, warn};

use crate::client::ExamApiClient;
use crate::model::{AnswerType, DocumentUpload, GenerationRequest, InputMode, numbered};

/// Shown when document mode is submitted without a file.
pub const MISSING_FILE_MESSAGE: &str = "Please upload a PDF file here first.";

/// Shown for every transport, status or decode failure.
pub const GENERIC_ERROR_MESSAGE: &str =
    "Error: Backend not running or failed to generate question.";

pub const DEFAULT_COUNT: u32 = 5;

/// Snapshot of everything the form displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub mode: InputMode,
    pub topic: String,
    pub file: Option<DocumentUpload>,
    pub count: u32,
    pub answer_type: AnswerType,
    pub loading: bool,
    pub error: Option<String>,
    pub questions: Vec<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            mode: InputMode::Topic,
            topic: String::new(),
            file: None,
            count: DEFAULT_COUNT,
            answer_type: AnswerType::ShortAnswer,
            loading: false,
            error: None,
            questions: Vec::new(),
        }
    }
}

/// Where the form is in `Idle → Submitting → {Populated, Failed}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Submitting,
    Populated,
    Failed,
}

impl ViewState {
    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Submitting
        } else if self.error.is_some() {
            Phase::Failed
        } else if !self.questions.is_empty() {
            Phase::Populated
        } else {
            Phase::Idle
        }
    }

    /// Questions as displayed, numbered from 1.
    pub fn numbered(&self) -> Vec<String> {
        numbered(&self.questions)
    }

    /// The request the current inputs describe; `None` in document mode
    /// without a file. The topic is sent as typed.
    fn request(&self) -> Option<GenerationRequest> {
        match self.mode {
            InputMode::Topic => Some(GenerationRequest::Topic {
                topic: self.topic.clone(),
                count: self.count,
                answer_type: self.answer_type,
            }),
            InputMode::Document => self.file.clone().map(|file| GenerationRequest::Document {
                file,
                count: self.count,
                answer_type: self.answer_type,
            }),
        }
    }
}

/// Result of one call to [`RequestOrchestrator::submit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The service answered; `questions` holds its list.
    Populated,
    /// Document mode without a file; no request was sent.
    MissingFile,
    /// The request failed; `error` holds the generic message.
    Failed,
    /// Another submission is still running; nothing was changed.
    AlreadyInFlight,
}

pub struct RequestOrchestrator {
    client: ExamApiClient,
    state: Mutex<ViewState>,
}

/// Clears `loading` when the submission ends, however it ends.
struct InFlight<'a> {
    state: &'a Mutex<ViewState>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        lock(self.state).loading = false;
    }
}

fn lock(state: &Mutex<ViewState>) -> MutexGuard<'_, ViewState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl RequestOrchestrator {
    pub fn new(client: ExamApiClient) -> Self {
        Self {
            client,
            state: Mutex::new(ViewState::default()),
        }
    }

    /// Switches input mode. Results and errors stay until the next submit.
    pub fn set_mode(&self, mode: InputMode) {
        lock(&self.state).mode = mode;
    }

    pub fn set_topic(&self, topic: impl Into<String>) {
        lock(&self.state).topic = topic.into();
    }

    pub fn select_file(&self, file: DocumentUpload) {
        lock(&self.state).file = Some(file);
    }

    pub fn clear_file(&self) {
        lock(&self.state).file = None;
    }

    pub fn set_count(&self, count: u32) {
        lock(&self.state).count = count;
    }

    pub fn set_answer_type(&self, answer_type: AnswerType) {
        lock(&self.state).answer_type = answer_type;
    }

    pub fn snapshot(&self) -> ViewState {
        lock(&self.state).clone()
    }

    /// Submits the current inputs.
    ///
    /// Clears the previous error and questions, then sends exactly one
    /// request (JSON for topic mode, multipart for document mode). Any
    /// failure becomes [`GENERIC_ERROR_MESSAGE`]; the cause is only logged.
    pub async fn submit(&self) -> SubmitOutcome {
        let request = {
            let mut state = lock(&self.state);
            if state.loading {
                warn!("submission ignored: another one is in flight");
                return SubmitOutcome::AlreadyInFlight;
            }
            state.error = None;
            state.questions.clear();
            state.loading = true;

            match state.request() {
                Some(request) => request,
                None => {
                    state.error = Some(MISSING_FILE_MESSAGE.to_string());
                    state.loading = false;
                    return SubmitOutcome::MissingFile;
                }
            }
        };

        let _in_flight = InFlight { state: &self.state };

        match self.client.generate(&request).await {
            Ok(result) => {
                info!(questions = result.questions.len(), "questions received");
                lock(&self.state).questions = result.questions;
                SubmitOutcome::Populated
            }
            Err(err) => {
                error!(error = %err, endpoint = request.endpoint(), "question generation failed");
                lock(&self.state).error = Some(GENERIC_ERROR_MESSAGE.to_string());
                SubmitOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let state = ViewState::default();
        assert_eq!(state.mode, InputMode::Topic);
        assert_eq!(state.count, 5);
        assert_eq!(state.answer_type, AnswerType::ShortAnswer);
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn document_mode_needs_a_file() {
        let mut state = ViewState {
            mode: InputMode::Document,
            ..ViewState::default()
        };
        assert!(state.request().is_none());

        state.file = Some(DocumentUpload::new("notes.pdf", b"%PDF".to_vec()));
        assert!(matches!(
            state.request(),
            Some(GenerationRequest::Document { count: 5, .. })
        ));
    }

    #[test]
    fn phase_follows_fields() {
        let mut state = ViewState {
            questions: vec!["Q1".into()],
            ..ViewState::default()
        };
        assert_eq!(state.phase(), Phase::Populated);
        state.loading = true;
        assert_eq!(state.phase(), Phase::Submitting);
        state.loading = false;
        state.questions.clear();
        state.error = Some(GENERIC_ERROR_MESSAGE.into());
        assert_eq!(state.phase(), Phase::Failed);
    }

    #[test]
    fn in_flight_guard_clears_loading_on_drop() {
        let state = Mutex::new(ViewState {
            loading: true,
            ..ViewState::default()
        });
        drop(InFlight { state: &state });
        assert!(!lock(&state).loading);
    }
}
