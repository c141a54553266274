//! Data Models
//!
//! This module contains the core data structures of the trivia bank:
//!
//! - `Question` - A stored trivia question with its answer, category and difficulty
//! - `NewQuestion` - Validated input for inserting a question
//! - `Category` - A flat, read-only category with a display name
//! - `QuizCategory` - Category constraint for quiz selection (concrete or wildcard)

mod category;
mod question;

pub use category::{Category, CategoryId, QuizCategory};
pub use question::{NewQuestion, Question, QuestionId, ValidationError};
