//! Trivia HTTP Server Binary
//!
//! # Usage
//!
//! ```bash
//! # Start with default settings (127.0.0.1:3001, ~/.trivia/database/trivia.db)
//! cargo run --bin trivia-server
//!
//! # Custom port and database
//! TRIVIA_SERVER_PORT=3002 TRIVIA_DB_PATH=/tmp/trivia.db cargo run --bin trivia-server
//! ```
//!
//! # Environment Variables
//!
//! - `TRIVIA_SERVER_PORT`: Server port (default: 3001)
//! - `TRIVIA_BIND_ADDRESS`: Listen address (default: 127.0.0.1)
//! - `TRIVIA_DB_PATH`: Database file
//! - `CORS_ALLOW_ORIGIN`: Single allowed origin (default: any)
//! - `TRIVIA_QUESTIONS_PER_PAGE`: Listing page size (default: 10)
//! - `TRIVIA_QUIZ_SEED`: Fixed seed for reproducible quiz draws
//! - `TRIVIA_SEED_CATEGORIES`: Seed default categories into an empty database (default: true)
//! - `RUST_LOG`: Logging level (e.g., "info", "debug", "trace")

use trivia_server::{build_service, start_server, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("🧠 Trivia API Server");

    let config = ServerConfig::from_env();
    config.validate()?;

    tracing::info!("📦 Database: {}", config.database_path.display());

    let service = build_service(&config).await?;
    tracing::info!("✅ Services initialized");

    start_server(&config, service).await
}
