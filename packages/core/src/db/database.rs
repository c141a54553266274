//! Database Connection Management
//!
//! This module provides connection handling, schema initialization and the raw
//! SQL operations for the trivia bank, using libsql as an embedded
//! SQLite-compatible store.
//!
//! # Architecture
//!
//! - **Path-agnostic**: Accepts any valid PathBuf; parent directories are created
//! - **Idempotent schema**: `CREATE TABLE IF NOT EXISTS`, safe on every start
//! - **WAL mode**: Write-Ahead Logging so readers never block the writer
//! - **No foreign keys**: a question's category is not checked against the
//!   categories table
//!
//! # Connection pattern
//!
//! Every operation opens its own connection through `connect_with_timeout()`.
//! The 5-second busy timeout lets concurrent requests wait on a locked
//! database instead of failing with `SQLITE_BUSY`.
//!
//! The `db_*` methods return raw libsql rows; conversion into models lives in
//! [`LibsqlStore`](crate::db::LibsqlStore).

use crate::db::error::DatabaseError;
use crate::models::{CategoryId, QuestionId};
use libsql::params::Params;
use libsql::{Builder, Database, Value};
use std::path::PathBuf;
use std::sync::Arc;

/// Categories of the stock trivia data set, inserted in id order
pub const DEFAULT_CATEGORIES: [&str; 6] = [
    "Science",
    "Art",
    "Geography",
    "History",
    "Entertainment",
    "Sports",
];

const QUESTION_COLUMNS: &str = "id, question, answer, category, difficulty";

/// Largest exclusion list bound into `db_list_quiz_candidates`; SQLite caps
/// the number of variables in one statement
pub const MAX_BOUND_EXCLUSIONS: usize = 999;

/// Database service for managing the libsql connection and schema
///
/// # Examples
///
/// ```no_run
/// use trivia_core::db::DatabaseService;
/// use std::path::PathBuf;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let db_service = DatabaseService::new(PathBuf::from("./data/trivia.db")).await?;
///     db_service.seed_default_categories().await?;
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseService {
    /// libsql database handle (wrapped in Arc for sharing)
    pub db: Arc<Database>,

    /// Path to the database file
    pub db_path: PathBuf,
}

/// Parameters for question insertion
pub struct DbInsertQuestionParams<'a> {
    pub question: &'a str,
    pub answer: &'a str,
    pub category: CategoryId,
    pub difficulty: i64,
}

impl DatabaseService {
    /// Open (or create) the database at `db_path` and initialize the schema
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if:
    /// - Parent directory cannot be created
    /// - Database connection fails
    /// - Schema initialization fails
    pub async fn new(db_path: PathBuf) -> Result<Self, DatabaseError> {
        // Checked before opening; only a new file needs the WAL checkpoint
        let is_new_database = !db_path.exists();

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    if e.kind() == std::io::ErrorKind::PermissionDenied {
                        DatabaseError::permission_denied(db_path.clone())
                    } else {
                        DatabaseError::DirectoryCreationFailed(e)
                    }
                })?;
            }
        }

        let db = Builder::new_local(&db_path)
            .build()
            .await
            .map_err(|e| DatabaseError::connection_failed(db_path.clone(), e))?;

        let service = Self {
            db: Arc::new(db),
            db_path,
        };

        service.initialize_schema(is_new_database).await?;

        tracing::debug!("Database ready at {}", service.db_path.display());

        Ok(service)
    }

    /// Execute a PRAGMA statement
    ///
    /// PRAGMA statements return rows, so they go through query() rather than
    /// execute().
    async fn execute_pragma(
        &self,
        conn: &libsql::Connection,
        pragma: &str,
    ) -> Result<(), DatabaseError> {
        let mut stmt = conn.prepare(pragma).await.map_err(|e| {
            DatabaseError::sql_execution(format!("Failed to execute '{}': {}", pragma, e))
        })?;
        let _ = stmt.query(()).await.map_err(|e| {
            DatabaseError::sql_execution(format!("Failed to execute '{}': {}", pragma, e))
        })?;
        Ok(())
    }

    /// Create tables and indexes
    ///
    /// # Schema
    ///
    /// - `categories`: id + display name (`type`)
    /// - `questions`: text, answer, numeric category, difficulty
    /// - `idx_questions_category`: category filter for listings and quizzes
    async fn initialize_schema(&self, is_new_database: bool) -> Result<(), DatabaseError> {
        let conn = self.connect_with_timeout().await?;

        self.execute_pragma(&conn, "PRAGMA journal_mode = WAL")
            .await?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS categories (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                type TEXT NOT NULL
            )",
            (),
        )
        .await
        .map_err(|e| {
            DatabaseError::initialization_failed(format!(
                "Failed to create categories table: {}",
                e
            ))
        })?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS questions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                question TEXT NOT NULL,
                answer TEXT NOT NULL,
                category INTEGER NOT NULL,
                difficulty INTEGER NOT NULL
            )",
            (),
        )
        .await
        .map_err(|e| {
            DatabaseError::initialization_failed(format!(
                "Failed to create questions table: {}",
                e
            ))
        })?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_questions_category ON questions(category)",
            (),
        )
        .await
        .map_err(|e| {
            DatabaseError::initialization_failed(format!(
                "Failed to create index 'idx_questions_category': {}",
                e
            ))
        })?;

        // Flush the fresh schema so a second handle on the same file sees it
        if is_new_database {
            self.execute_pragma(&conn, "PRAGMA wal_checkpoint(TRUNCATE)")
                .await?;
        }

        Ok(())
    }

    /// Get a synchronous connection handle
    ///
    /// Prefer `connect_with_timeout()` in async code.
    pub fn connect(&self) -> Result<libsql::Connection, DatabaseError> {
        self.db.connect().map_err(DatabaseError::LibsqlError)
    }

    /// Get a connection with a 5-second busy timeout configured
    pub async fn connect_with_timeout(&self) -> Result<libsql::Connection, DatabaseError> {
        let conn = self.connect()?;

        self.execute_pragma(&conn, "PRAGMA busy_timeout = 5000")
            .await?;

        Ok(conn)
    }

    /// Insert [`DEFAULT_CATEGORIES`] when the categories table is empty
    ///
    /// Returns the number of categories inserted (0 when the table already
    /// had rows).
    pub async fn seed_default_categories(&self) -> Result<usize, DatabaseError> {
        let conn = self.connect_with_timeout().await?;

        let mut rows = conn
            .query("SELECT COUNT(*) FROM categories", ())
            .await
            .map_err(|e| {
                DatabaseError::sql_execution(format!("Failed to count categories: {}", e))
            })?;

        let existing: i64 = match rows.next().await? {
            Some(row) => row
                .get(0)
                .map_err(|e| DatabaseError::row_conversion("count", e))?,
            None => 0,
        };

        if existing > 0 {
            return Ok(0);
        }

        for name in DEFAULT_CATEGORIES {
            conn.execute("INSERT INTO categories (type) VALUES (?)", [name])
                .await
                .map_err(|e| {
                    DatabaseError::sql_execution(format!(
                        "Failed to seed category '{}': {}",
                        name, e
                    ))
                })?;
        }

        tracing::info!("Seeded {} default categories", DEFAULT_CATEGORIES.len());

        Ok(DEFAULT_CATEGORIES.len())
    }

    //
    // CATEGORY OPERATIONS
    //

    /// Insert a category and return its id
    pub async fn db_insert_category(&self, kind: &str) -> Result<CategoryId, DatabaseError> {
        let conn = self.connect_with_timeout().await?;

        conn.execute("INSERT INTO categories (type) VALUES (?)", [kind])
            .await
            .map_err(|e| {
                DatabaseError::sql_execution(format!("Failed to insert category: {}", e))
            })?;

        Ok(conn.last_insert_rowid())
    }

    /// All categories ordered by id
    ///
    /// Columns: id, type
    pub async fn db_list_categories(&self) -> Result<libsql::Rows, DatabaseError> {
        let conn = self.connect_with_timeout().await?;

        conn.query("SELECT id, type FROM categories ORDER BY id", ())
            .await
            .map_err(|e| {
                DatabaseError::sql_execution(format!("Failed to list categories: {}", e))
            })
    }

    /// A single category row, or `None` if absent
    pub async fn db_get_category(
        &self,
        id: CategoryId,
    ) -> Result<Option<libsql::Row>, DatabaseError> {
        let conn = self.connect_with_timeout().await?;

        let mut rows = conn
            .query("SELECT id, type FROM categories WHERE id = ?", [id])
            .await
            .map_err(|e| {
                DatabaseError::sql_execution(format!("Failed to execute get_category query: {}", e))
            })?;

        rows.next()
            .await
            .map_err(|e| DatabaseError::sql_execution(e.to_string()))
    }

    //
    // QUESTION OPERATIONS
    //

    /// Full scan of questions ordered by id
    ///
    /// Columns: id, question, answer, category, difficulty
    pub async fn db_list_questions(&self) -> Result<libsql::Rows, DatabaseError> {
        let conn = self.connect_with_timeout().await?;

        conn.query(
            &format!("SELECT {} FROM questions ORDER BY id", QUESTION_COLUMNS),
            (),
        )
        .await
        .map_err(|e| DatabaseError::sql_execution(format!("Failed to list questions: {}", e)))
    }

    /// Questions in `category`, ordered by id
    pub async fn db_list_questions_by_category(
        &self,
        category: CategoryId,
    ) -> Result<libsql::Rows, DatabaseError> {
        let conn = self.connect_with_timeout().await?;

        conn.query(
            &format!(
                "SELECT {} FROM questions WHERE category = ? ORDER BY id",
                QUESTION_COLUMNS
            ),
            [category],
        )
        .await
        .map_err(|e| {
            DatabaseError::sql_execution(format!("Failed to list questions by category: {}", e))
        })
    }

    /// Questions not in `excluded`, optionally restricted to `category`
    ///
    /// The exclusion list is bound as positional parameters
    /// (`id NOT IN (?, ?, ...)`), never interpolated. Callers keep it within
    /// [`MAX_BOUND_EXCLUSIONS`] ids.
    pub async fn db_list_quiz_candidates(
        &self,
        category: Option<CategoryId>,
        excluded: &[QuestionId],
    ) -> Result<libsql::Rows, DatabaseError> {
        let conn = self.connect_with_timeout().await?;

        let mut sql = format!("SELECT {} FROM questions WHERE 1 = 1", QUESTION_COLUMNS);
        let mut values: Vec<Value> = Vec::with_capacity(excluded.len() + 1);

        if let Some(category) = category {
            sql.push_str(" AND category = ?");
            values.push(Value::Integer(category));
        }

        if !excluded.is_empty() {
            let placeholders = vec!["?"; excluded.len()].join(", ");
            sql.push_str(&format!(" AND id NOT IN ({})", placeholders));
            values.extend(excluded.iter().copied().map(Value::Integer));
        }

        sql.push_str(" ORDER BY id");

        conn.query(&sql, Params::Positional(values))
            .await
            .map_err(|e| {
                DatabaseError::sql_execution(format!("Failed to list quiz candidates: {}", e))
            })
    }

    /// Insert a question and return the assigned id
    pub async fn db_insert_question(
        &self,
        params: DbInsertQuestionParams<'_>,
    ) -> Result<QuestionId, DatabaseError> {
        let conn = self.connect_with_timeout().await?;

        conn.execute(
            "INSERT INTO questions (question, answer, category, difficulty) VALUES (?, ?, ?, ?)",
            (
                params.question,
                params.answer,
                params.category,
                params.difficulty,
            ),
        )
        .await
        .map_err(|e| DatabaseError::sql_execution(format!("Failed to insert question: {}", e)))?;

        Ok(conn.last_insert_rowid())
    }

    /// Delete a question by id
    ///
    /// Returns the number of rows affected: 0 when the id does not exist.
    pub async fn db_delete_question(&self, id: QuestionId) -> Result<u64, DatabaseError> {
        let conn = self.connect_with_timeout().await?;

        conn.execute("DELETE FROM questions WHERE id = ?", [id])
            .await
            .map_err(|e| DatabaseError::sql_execution(format!("Failed to delete question: {}", e)))
    }
}
