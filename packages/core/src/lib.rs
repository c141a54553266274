//! Trivia Core Business Logic Layer
//!
//! Question retrieval and quiz selection for the trivia service: paginated
//! listings, category filtering, free-text search and a stateless,
//! non-repeating randomized quiz.
//!
//! # Architecture
//!
//! - **Stateless**: no caching and no quiz sessions; callers resend the set of
//!   already-asked questions on every quiz request
//! - **Store abstraction**: services depend on the `TriviaStore` trait only
//! - **libsql**: embedded SQLite-compatible database behind `LibsqlStore`
//! - **Injected randomness**: quiz draws come from a seedable generator
//!
//! # Modules
//!
//! - [`models`] - Question, Category and quiz category constraint
//! - [`services`] - Pagination, search, quiz selection and `TriviaService`
//! - [`db`] - Database layer with libsql integration

pub mod db;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use db::{DatabaseError, DatabaseService, LibsqlStore, TriviaStore};
pub use models::*;
pub use services::*;
