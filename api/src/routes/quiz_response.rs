use quiz_store::Quiz;
use serde::Serialize;
use uuid::Uuid;

/// Body returned by the generation endpoints and `GET /api/quiz/{quiz_id}`.
#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub id: Uuid,
    pub questions: Vec<String>,
}

impl From<Quiz> for QuizResponse {
    fn from(quiz: Quiz) -> Self {
        Self {
            id: quiz.id,
            questions: quiz.questions,
        }
    }
}
