//! Business Services
//!
//! - [`paginate`] - fixed-size page windows over a result set
//! - [`search_questions`] - case-insensitive text search
//! - [`QuizSelector`] - random, non-repeating quiz question selection
//! - [`TriviaService`] - the boundary composing the above over a store
//!
//! The first three are pure and store-agnostic; `TriviaService` is the only
//! one that performs I/O.

pub mod error;
pub mod pagination;
pub mod quiz_selector;
pub mod search;
pub mod trivia_service;

pub use error::TriviaError;
pub use pagination::{paginate, Page, QUESTIONS_PER_PAGE};
pub use quiz_selector::{choose_question, QuizSelector};
pub use search::search_questions;
pub use trivia_service::{
    CategoryMap, CategoryQuestions, QuestionPage, SearchResults, TriviaService,
};
