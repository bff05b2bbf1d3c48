//! sled-backed quiz storage.

use std::path::Path;

use sled::{Db, Tree};
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::Result;
use crate::quiz::Quiz;

const TREE_QUIZZES: &str = "quizzes";

/// Handle to the quiz database. Cheap to clone; clones share the same db.
#[derive(Clone)]
pub struct QuizStore {
    db: Db,
    quizzes: Tree,
}

impl QuizStore {
    /// Opens (or creates) the database at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let db = sled::open(path)?;
        let store = Self::from_db(db)?;
        info!(path = %path.display(), quizzes = store.len(), "quiz store opened");
        Ok(store)
    }

    /// In-memory store removed on drop.
    pub fn temporary() -> Result<Self> {
        let db = sled::Config::new().temporary(true).open()?;
        Self::from_db(db)
    }

    fn from_db(db: Db) -> Result<Self> {
        let quizzes = db.open_tree(TREE_QUIZZES)?;
        Ok(Self { db, quizzes })
    }

    /// Stores a new quiz and returns it with its assigned id.
    pub fn save(&self, topic: &str, questions: Vec<String>) -> Result<Quiz> {
        let quiz = Quiz::new(topic, questions);
        self.put(&quiz)?;
        debug!(id = %quiz.id, topic = %quiz.topic, questions = quiz.questions.len(), "quiz saved");
        Ok(quiz)
    }

    /// Inserts or replaces `quiz` under its id.
    pub fn put(&self, quiz: &Quiz) -> Result<()> {
        let value = serde_json::to_vec(quiz)?;
        self.quizzes.insert(quiz.id.as_bytes(), value)?;
        Ok(())
    }

    pub fn get(&self, id: &Uuid) -> Result<Option<Quiz>> {
        let Some(raw) = self.quizzes.get(id.as_bytes())? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_slice(&raw)?))
    }

    pub fn len(&self) -> usize {
        self.quizzes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quizzes.is_empty()
    }

    /// Flushes dirty pages to disk.
    pub fn flush(&self) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }

    /// Round-trips a read against the tree; used by health checks.
    pub fn ping(&self) -> bool {
        self.quizzes.first().is_ok()
    }
}
