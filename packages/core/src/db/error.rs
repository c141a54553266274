//! Errors raised while opening the trivia database or reading and writing
//! questions and categories. The service layer wraps every one of them as
//! `TriviaError::PersistenceError`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    /// libsql could not open the database file
    #[error("Failed to connect to database at {path}: {source}")]
    ConnectionFailed {
        path: PathBuf,
        source: libsql::Error,
    },

    /// Creating the `categories`/`questions` tables or their index failed
    #[error("Failed to initialize database schema: {0}")]
    InitializationFailed(String),

    #[error("Permission denied for database path: {path}")]
    PermissionDenied { path: PathBuf },

    /// The directory holding the database file could not be created
    #[error("Failed to create parent directory for database: {0}")]
    DirectoryCreationFailed(#[from] std::io::Error),

    #[error("Database operation failed: {0}")]
    LibsqlError(#[from] libsql::Error),

    /// A question or category statement failed; `context` names the operation
    #[error("SQL execution failed: {context}")]
    SqlExecutionError { context: String },

    /// A stored question or category row holds a value of the wrong type
    #[error("Failed to read column '{column}': {source}")]
    RowConversion {
        column: &'static str,
        source: libsql::Error,
    },
}

impl DatabaseError {
    pub fn connection_failed(path: PathBuf, source: libsql::Error) -> Self {
        Self::ConnectionFailed { path, source }
    }

    pub fn initialization_failed(msg: impl Into<String>) -> Self {
        Self::InitializationFailed(msg.into())
    }

    pub fn permission_denied(path: PathBuf) -> Self {
        Self::PermissionDenied { path }
    }

    /// e.g. `sql_execution(format!("Failed to delete question: {}", e))`
    pub fn sql_execution(context: impl Into<String>) -> Self {
        Self::SqlExecutionError {
            context: context.into(),
        }
    }

    pub fn row_conversion(column: &'static str, source: libsql::Error) -> Self {
        Self::RowConversion { column, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_failed_operation() {
        let err = DatabaseError::sql_execution("Failed to list quiz candidates: busy");
        assert_eq!(
            err.to_string(),
            "SQL execution failed: Failed to list quiz candidates: busy"
        );

        let err = DatabaseError::permission_denied(PathBuf::from("/trivia/trivia.db"));
        assert_eq!(
            err.to_string(),
            "Permission denied for database path: /trivia/trivia.db"
        );
    }
}
