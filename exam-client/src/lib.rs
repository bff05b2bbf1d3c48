//! Client for the exam question generation API.
//!
//! [`ExamApiClient`] speaks the HTTP contract; [`RequestOrchestrator`] owns
//! the view state of one question-generation form and drives the client,
//! one submission at a time.

pub mod client;
pub mod error;
pub mod model;
pub mod orchestrator;

pub use client::ExamApiClient;
pub use error::ClientError;
pub use model::{
    AnswerType, DocumentUpload, GenerationRequest, GenerationResult, InputMode, StoredQuiz,
};
pub use orchestrator::{Phase, RequestOrchestrator, SubmitOutcome, ViewState};
