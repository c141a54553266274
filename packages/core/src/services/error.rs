//! Service Layer Error Types
//!
//! The three error kinds surfaced across the service boundary. The HTTP
//! adapter maps each kind to a status code; nothing in the core knows about
//! status codes.

use crate::db::DatabaseError;
use crate::models::ValidationError;
use thiserror::Error;

/// Service operation errors
#[derive(Error, Debug)]
pub enum TriviaError {
    /// A referenced entity doesn't exist, or a result set the contract
    /// requires to be non-empty is empty
    #[error("Not found: {0}")]
    NotFound(String),

    /// Required input missing or malformed
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The store failed; never recovered from locally
    #[error("Persistence failure: {0}")]
    PersistenceError(#[from] DatabaseError),
}

impl TriviaError {
    /// Create a not found error
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// Create an invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }
}

impl From<ValidationError> for TriviaError {
    fn from(err: ValidationError) -> Self {
        Self::InvalidRequest(err.to_string())
    }
}
