//! TriviaStore Trait - Persistence Abstraction Layer
//!
//! Defines the contract the retrieval and quiz logic needs from persistence.
//! `TriviaService` only ever talks to a `dyn TriviaStore`, so the libsql
//! backend can be swapped without touching business logic.
//!
//! # Design Decisions
//!
//! 1. **Async-First**: every method is async; backends may do I/O.
//! 2. **No caching**: implementations return current state on every call.
//! 3. **Ordering**: listings are returned in id (insertion) order.
//! 4. **Pushed-down predicates**: only category and exclusion-set filtering
//!    are part of the contract. Text search is done by the caller over
//!    `list_all_questions()`.

use crate::db::DatabaseError;
use crate::models::{Category, CategoryId, NewQuestion, Question, QuestionId, QuizCategory};
use async_trait::async_trait;
use std::collections::HashSet;

/// Abstraction layer for question and category persistence
///
/// Implementations must be `Send + Sync` so a single store can be shared
/// by all request handlers.
#[async_trait]
pub trait TriviaStore: Send + Sync {
    //
    // QUESTIONS
    //

    /// Full scan of all questions, in id order
    async fn list_all_questions(&self) -> Result<Vec<Question>, DatabaseError>;

    /// Questions whose category equals `category`, in id order
    async fn list_questions_by_category(
        &self,
        category: CategoryId,
    ) -> Result<Vec<Question>, DatabaseError>;

    /// Questions eligible for the next quiz draw
    ///
    /// Returns every question whose id is not in `excluded` and which
    /// `category` admits.
    async fn list_quiz_candidates(
        &self,
        category: QuizCategory,
        excluded: &HashSet<QuestionId>,
    ) -> Result<Vec<Question>, DatabaseError>;

    /// Insert a question and return its new id
    ///
    /// # Errors
    ///
    /// Any storage failure (constraint violation, connectivity).
    async fn insert_question(&self, question: NewQuestion) -> Result<QuestionId, DatabaseError>;

    /// Delete a question by id
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the question existed and was deleted
    /// - `Ok(false)` if no question has that id
    /// - `Err(_)` on storage failure
    async fn delete_question(&self, id: QuestionId) -> Result<bool, DatabaseError>;

    //
    // CATEGORIES
    //

    /// All categories, in id order
    async fn list_all_categories(&self) -> Result<Vec<Category>, DatabaseError>;

    /// Category by id, `Ok(None)` if it doesn't exist
    async fn get_category(&self, id: CategoryId) -> Result<Option<Category>, DatabaseError>;

    /// Insert a category and return its new id
    async fn insert_category(&self, kind: &str) -> Result<CategoryId, DatabaseError>;
}
