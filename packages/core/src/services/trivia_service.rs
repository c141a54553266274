//! TriviaService - the boundary the HTTP adapter calls into
//!
//! Composes pagination, search and quiz selection over a [`TriviaStore`] and
//! decides which empty outcomes are failures:
//!
//! | Operation | Empty outcome |
//! |---|---|
//! | `list_categories` | `NotFound` |
//! | `list_questions` | `NotFound` (page has no items) |
//! | `search_questions` | empty term → `Ok`, zero matches → `NotFound` |
//! | `questions_by_category` | `NotFound` (unknown category or no questions) |
//! | `next_quiz_question` | `Ok(None)` (quiz complete) |
//!
//! Every call re-reads the store; nothing is cached between calls.

use crate::db::TriviaStore;
use crate::models::{CategoryId, NewQuestion, Question, QuestionId, QuizCategory};
use crate::services::pagination::{paginate, QUESTIONS_PER_PAGE};
use crate::services::quiz_selector::QuizSelector;
use crate::services::search::search_questions;
use crate::services::TriviaError;
use rand::rngs::StdRng;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Category id → display name
pub type CategoryMap = BTreeMap<CategoryId, String>;

/// One page of the question listing
#[derive(Debug, Clone, Serialize)]
pub struct QuestionPage {
    pub questions: Vec<Question>,
    /// Size of the whole bank, not of this page
    pub total_questions: usize,
    pub categories: CategoryMap,
}

/// Result of a text search
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub questions: Vec<Question>,
    pub total_questions: usize,
}

/// Questions of a single category
#[derive(Debug, Clone, Serialize)]
pub struct CategoryQuestions {
    pub questions: Vec<Question>,
    pub total_questions: usize,
    /// Display name of the category
    pub current_category: String,
}

/// Question retrieval and quiz selection over a shared store
pub struct TriviaService {
    store: Arc<dyn TriviaStore>,
    selector: QuizSelector<StdRng>,
    page_size: usize,
}

impl TriviaService {
    /// Service drawing quiz questions from OS entropy
    pub fn new(store: Arc<dyn TriviaStore>) -> Self {
        Self::with_selector(store, QuizSelector::from_entropy())
    }

    /// Service with a reproducible quiz draw sequence
    pub fn with_seed(store: Arc<dyn TriviaStore>, seed: u64) -> Self {
        Self::with_selector(store, QuizSelector::seeded(seed))
    }

    /// Service using the given random generator for quiz draws
    pub fn with_rng(store: Arc<dyn TriviaStore>, rng: StdRng) -> Self {
        Self::with_selector(store, QuizSelector::new(rng))
    }

    fn with_selector(store: Arc<dyn TriviaStore>, selector: QuizSelector<StdRng>) -> Self {
        Self {
            store,
            selector,
            page_size: QUESTIONS_PER_PAGE,
        }
    }

    /// Override the listing page size (default [`QUESTIONS_PER_PAGE`])
    ///
    /// A size of 0 is ignored.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        if page_size > 0 {
            self.page_size = page_size;
        }
        self
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Underlying store
    pub fn store(&self) -> &Arc<dyn TriviaStore> {
        &self.store
    }

    async fn category_map(&self) -> Result<CategoryMap, TriviaError> {
        let categories = self.store.list_all_categories().await?;
        Ok(categories.into_iter().map(|c| (c.id, c.kind)).collect())
    }

    /// All categories as id → display name
    ///
    /// # Errors
    ///
    /// `NotFound` when there are no categories.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<CategoryMap, TriviaError> {
        let categories = self.category_map().await?;

        if categories.is_empty() {
            return Err(TriviaError::not_found("no categories"));
        }

        debug!("Listed {} categories", categories.len());
        Ok(categories)
    }

    /// The `page`-th page of all questions (1-indexed), with the full
    /// category map
    ///
    /// # Errors
    ///
    /// `NotFound` when the page holds no questions.
    #[instrument(skip(self))]
    pub async fn list_questions(&self, page: u32) -> Result<QuestionPage, TriviaError> {
        let all = self.store.list_all_questions().await?;
        let page_slice = paginate(all, page, self.page_size);

        if page_slice.items.is_empty() {
            return Err(TriviaError::not_found(format!(
                "page {} ({} questions total)",
                page, page_slice.total_count
            )));
        }

        let categories = self.category_map().await?;

        debug!(
            "Page {} holds {} of {} questions",
            page,
            page_slice.items.len(),
            page_slice.total_count
        );

        Ok(QuestionPage {
            questions: page_slice.items,
            total_questions: page_slice.total_count,
            categories,
        })
    }

    /// Delete a question, returning the deleted id
    ///
    /// # Errors
    ///
    /// - `NotFound` if no question has this id
    /// - `PersistenceError` if the store fails
    #[instrument(skip(self))]
    pub async fn delete_question(&self, id: QuestionId) -> Result<QuestionId, TriviaError> {
        if !self.store.delete_question(id).await? {
            return Err(TriviaError::not_found(format!("question {}", id)));
        }

        info!("Deleted question {}", id);
        Ok(id)
    }

    /// Validate and insert a question, returning its new id
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` if validation fails
    /// - `PersistenceError` if the store fails
    #[instrument(skip(self, question), fields(category = question.category))]
    pub async fn create_question(&self, question: NewQuestion) -> Result<QuestionId, TriviaError> {
        question.validate()?;

        let id = self.store.insert_question(question).await?;

        info!("Created question {}", id);
        Ok(id)
    }

    /// Case-insensitive text search
    ///
    /// An empty term is answered with zero results rather than an error.
    ///
    /// # Errors
    ///
    /// `NotFound` when a non-empty term matches nothing.
    #[instrument(skip(self))]
    pub async fn search_questions(&self, term: &str) -> Result<SearchResults, TriviaError> {
        if term.is_empty() {
            return Ok(SearchResults {
                questions: Vec::new(),
                total_questions: 0,
            });
        }

        let all = self.store.list_all_questions().await?;
        let questions = search_questions(all, term);

        if questions.is_empty() {
            return Err(TriviaError::not_found(format!(
                "questions matching '{}'",
                term
            )));
        }

        debug!("Search '{}' matched {} questions", term, questions.len());

        Ok(SearchResults {
            total_questions: questions.len(),
            questions,
        })
    }

    /// All questions of one category
    ///
    /// # Errors
    ///
    /// `NotFound` if the category doesn't exist or holds no questions.
    #[instrument(skip(self))]
    pub async fn questions_by_category(
        &self,
        category_id: CategoryId,
    ) -> Result<CategoryQuestions, TriviaError> {
        let category = self
            .store
            .get_category(category_id)
            .await?
            .ok_or_else(|| TriviaError::not_found(format!("category {}", category_id)))?;

        let questions = self.store.list_questions_by_category(category.id).await?;

        if questions.is_empty() {
            return Err(TriviaError::not_found(format!(
                "questions in category '{}'",
                category.kind
            )));
        }

        Ok(CategoryQuestions {
            total_questions: questions.len(),
            questions,
            current_category: category.kind,
        })
    }

    /// Next quiz question not in `excluded`
    ///
    /// `category` must be present; [`QuizCategory::Any`] lifts the category
    /// restriction. `Ok(None)` means the quiz is complete.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` if `category` is `None`.
    #[instrument(skip(self, excluded), fields(excluded = excluded.len()))]
    pub async fn next_quiz_question(
        &self,
        category: Option<QuizCategory>,
        excluded: &HashSet<QuestionId>,
    ) -> Result<Option<Question>, TriviaError> {
        let category =
            category.ok_or_else(|| TriviaError::invalid_request("quiz category is required"))?;

        let candidates = self.store.list_quiz_candidates(category, excluded).await?;
        let next = self.selector.select(candidates, category, excluded);

        match &next {
            Some(question) => debug!("Selected quiz question {}", question.id),
            None => debug!("Quiz exhausted for {:?}", category),
        }

        Ok(next)
    }
}

#[cfg(test)]
#[path = "trivia_service_test.rs"]
mod trivia_service_test;
