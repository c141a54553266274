//! Question model
//!
//! Questions are immutable once inserted. The only lifecycle transitions are
//! creation (which assigns the `id`) and deletion by id.

use crate::models::CategoryId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Store-assigned question identifier
pub type QuestionId = i64;

/// Validation errors for question input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid category: {0}")]
    InvalidCategory(CategoryId),

    #[error("Invalid difficulty: {0}")]
    InvalidDifficulty(i64),
}

/// A stored trivia question.
///
/// On the wire the question text is named `question`, matching the shape
/// the quiz frontend consumes:
///
/// ```json
/// {"id": 5, "question": "What is 2+2?", "answer": "4", "category": 1, "difficulty": 1}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,

    #[serde(rename = "question")]
    pub text: String,

    pub answer: String,

    /// Category id; not checked against the category table
    pub category: CategoryId,

    /// 1-5 by convention
    pub difficulty: i64,
}

impl Question {
    /// Whether the question text contains `needle_lower`.
    ///
    /// `needle_lower` must already be lowercased; the question text is
    /// lowercased here.
    pub fn text_contains_lowercase(&self, needle_lower: &str) -> bool {
        self.text.to_lowercase().contains(needle_lower)
    }
}

/// Input for creating a question. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub text: String,
    pub answer: String,
    pub category: CategoryId,
    pub difficulty: i64,
}

impl NewQuestion {
    pub fn new(
        text: impl Into<String>,
        answer: impl Into<String>,
        category: CategoryId,
        difficulty: i64,
    ) -> Self {
        Self {
            text: text.into(),
            answer: answer.into(),
            category,
            difficulty,
        }
    }

    /// Validate the question before insertion
    ///
    /// # Errors
    ///
    /// - `MissingField` if the text or answer is blank
    /// - `InvalidCategory` if the category is not a positive id (0 is the
    ///   quiz wildcard and never a stored category)
    /// - `InvalidDifficulty` if the difficulty is below 1
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.text.trim().is_empty() {
            return Err(ValidationError::MissingField("question".to_string()));
        }

        if self.answer.trim().is_empty() {
            return Err(ValidationError::MissingField("answer".to_string()));
        }

        if self.category <= 0 {
            return Err(ValidationError::InvalidCategory(self.category));
        }

        // Upper bound is a convention only
        if self.difficulty < 1 {
            return Err(ValidationError::InvalidDifficulty(self.difficulty));
        }

        Ok(())
    }

    /// Attach the store-assigned id
    pub fn into_question(self, id: QuestionId) -> Question {
        Question {
            id,
            text: self.text,
            answer: self.answer,
            category: self.category,
            difficulty: self.difficulty,
        }
    }
}
