//! Trivia HTTP Server
//!
//! JSON API over [`trivia_core::TriviaService`]. See [`api`] for the routes
//! and [`config`] for the environment variables the binary reads.

pub mod api;
pub mod config;

use std::sync::Arc;

use trivia_core::{DatabaseService, LibsqlStore, TriviaService, TriviaStore};

pub use api::{create_router, start_server, AppState, HttpError};
pub use config::{ConfigError, ServerConfig};

/// Open the database and assemble the service described by `config`
///
/// Seeds the default categories into an empty database when
/// `config.seed_categories` is set.
pub async fn build_service(config: &ServerConfig) -> anyhow::Result<Arc<TriviaService>> {
    let db = Arc::new(DatabaseService::new(config.database_path.clone()).await?);

    if config.seed_categories {
        db.seed_default_categories().await?;
    }

    let store: Arc<dyn TriviaStore> = Arc::new(LibsqlStore::new(db));
    let service = match config.quiz_seed {
        Some(seed) => {
            tracing::info!("Quiz draws seeded with {}", seed);
            TriviaService::with_seed(store, seed)
        }
        None => TriviaService::new(store),
    };

    Ok(Arc::new(
        service.with_page_size(config.questions_per_page),
    ))
}
