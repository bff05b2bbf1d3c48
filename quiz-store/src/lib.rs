//! Persistence for generated quizzes.
//!
//! Every successful generation is stored as a [`Quiz`] (id, topic, questions,
//! creation time) so it can be fetched again by id.

pub mod errors;
mod quiz;
mod store;

pub use errors::{Result, StoreError};
pub use quiz::{DOCUMENT_TOPIC, Quiz};
pub use store::QuizStore;
