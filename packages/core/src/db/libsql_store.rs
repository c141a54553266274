//! LibsqlStore - TriviaStore Implementation for the libsql Backend
//!
//! Thin wrapper around [`DatabaseService`]: every method delegates to a
//! `db_*` method and converts the returned rows into models. There is no
//! business logic here.
//!
//! # Examples
//!
//! ```rust,no_run
//! use trivia_core::db::{DatabaseService, LibsqlStore, TriviaStore};
//! use std::path::PathBuf;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Arc::new(DatabaseService::new(PathBuf::from("./data/trivia.db")).await?);
//!     let store: Arc<dyn TriviaStore> = Arc::new(LibsqlStore::new(db));
//!
//!     let questions = store.list_all_questions().await?;
//!     println!("{} questions", questions.len());
//!     Ok(())
//! }
//! ```

use crate::db::database::{DbInsertQuestionParams, MAX_BOUND_EXCLUSIONS};
use crate::db::trivia_store::TriviaStore;
use crate::db::{DatabaseError, DatabaseService};
use crate::models::{Category, CategoryId, NewQuestion, Question, QuestionId, QuizCategory};
use async_trait::async_trait;
use libsql::{Row, Rows};
use std::collections::HashSet;
use std::sync::Arc;

/// libsql-backed [`TriviaStore`]
pub struct LibsqlStore {
    db: Arc<DatabaseService>,
}

impl LibsqlStore {
    pub fn new(db: Arc<DatabaseService>) -> Self {
        Self { db }
    }

    /// Underlying database service
    pub fn database(&self) -> &Arc<DatabaseService> {
        &self.db
    }

    /// Convert a row into a Question
    ///
    /// Expected columns (in order): id, question, answer, category, difficulty
    fn row_to_question(row: &Row) -> Result<Question, DatabaseError> {
        Ok(Question {
            id: row
                .get(0)
                .map_err(|e| DatabaseError::row_conversion("id", e))?,
            text: row
                .get(1)
                .map_err(|e| DatabaseError::row_conversion("question", e))?,
            answer: row
                .get(2)
                .map_err(|e| DatabaseError::row_conversion("answer", e))?,
            category: row
                .get(3)
                .map_err(|e| DatabaseError::row_conversion("category", e))?,
            difficulty: row
                .get(4)
                .map_err(|e| DatabaseError::row_conversion("difficulty", e))?,
        })
    }

    /// Convert a row into a Category
    ///
    /// Expected columns (in order): id, type
    fn row_to_category(row: &Row) -> Result<Category, DatabaseError> {
        Ok(Category {
            id: row
                .get(0)
                .map_err(|e| DatabaseError::row_conversion("id", e))?,
            kind: row
                .get(1)
                .map_err(|e| DatabaseError::row_conversion("type", e))?,
        })
    }

    async fn collect_questions(mut rows: Rows) -> Result<Vec<Question>, DatabaseError> {
        let mut questions = Vec::new();
        while let Some(row) = rows.next().await? {
            questions.push(Self::row_to_question(&row)?);
        }
        Ok(questions)
    }
}

#[async_trait]
impl TriviaStore for LibsqlStore {
    async fn list_all_questions(&self) -> Result<Vec<Question>, DatabaseError> {
        let rows = self.db.db_list_questions().await?;
        Self::collect_questions(rows).await
    }

    async fn list_questions_by_category(
        &self,
        category: CategoryId,
    ) -> Result<Vec<Question>, DatabaseError> {
        let rows = self.db.db_list_questions_by_category(category).await?;
        Self::collect_questions(rows).await
    }

    async fn list_quiz_candidates(
        &self,
        category: QuizCategory,
        excluded: &HashSet<QuestionId>,
    ) -> Result<Vec<Question>, DatabaseError> {
        let category = match category {
            QuizCategory::Any => None,
            QuizCategory::Only(id) => Some(id),
        };

        // Long exclusion lists would exceed SQLite's bound-variable limit
        let push_down = excluded.len() <= MAX_BOUND_EXCLUSIONS;

        let bound: Vec<QuestionId> = if push_down {
            // Sorted so identical requests produce identical SQL
            let mut ids: Vec<QuestionId> = excluded.iter().copied().collect();
            ids.sort_unstable();
            ids
        } else {
            tracing::debug!(
                "Filtering {} excluded ids in memory instead of SQL",
                excluded.len()
            );
            Vec::new()
        };

        let rows = self.db.db_list_quiz_candidates(category, &bound).await?;
        let mut questions = Self::collect_questions(rows).await?;

        if !push_down {
            questions.retain(|q| !excluded.contains(&q.id));
        }

        Ok(questions)
    }

    async fn insert_question(&self, question: NewQuestion) -> Result<QuestionId, DatabaseError> {
        let params = DbInsertQuestionParams {
            question: &question.text,
            answer: &question.answer,
            category: question.category,
            difficulty: question.difficulty,
        };

        self.db.db_insert_question(params).await
    }

    async fn delete_question(&self, id: QuestionId) -> Result<bool, DatabaseError> {
        let rows_affected = self.db.db_delete_question(id).await?;
        Ok(rows_affected > 0)
    }

    async fn list_all_categories(&self) -> Result<Vec<Category>, DatabaseError> {
        let mut rows = self.db.db_list_categories().await?;

        let mut categories = Vec::new();
        while let Some(row) = rows.next().await? {
            categories.push(Self::row_to_category(&row)?);
        }
        Ok(categories)
    }

    async fn get_category(&self, id: CategoryId) -> Result<Option<Category>, DatabaseError> {
        match self.db.db_get_category(id).await? {
            Some(row) => Ok(Some(Self::row_to_category(&row)?)),
            None => Ok(None),
        }
    }

    async fn insert_category(&self, kind: &str) -> Result<CategoryId, DatabaseError> {
        self.db.db_insert_category(kind).await
    }
}
