//! Database Layer
//!
//! This module handles all persistence for the trivia bank:
//!
//! - [`DatabaseService`] - libsql connection management, schema and raw SQL
//! - [`TriviaStore`] - the persistence contract used by the service layer
//! - [`LibsqlStore`] - `TriviaStore` backed by `DatabaseService`
//!
//! # Architecture
//!
//! The service layer never sees SQL or rows. It depends on `dyn TriviaStore`,
//! and `LibsqlStore` is the only place where libsql rows become models.

mod database;
mod error;
mod libsql_store;
mod trivia_store;

pub use database::{
    DatabaseService, DbInsertQuestionParams, DEFAULT_CATEGORIES, MAX_BOUND_EXCLUSIONS,
};
pub use error::DatabaseError;
pub use libsql_store::LibsqlStore;
pub use trivia_store::TriviaStore;
