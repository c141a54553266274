//! HTTP API for the trivia service
//!
//! The router is assembled from one module per resource, merged in
//! [`create_router`]:
//! - `question_endpoints`: health check, listing, create, delete, search
//! - `category_endpoints`: category map and per-category listing
//! - `quiz_endpoints`: next quiz question
//!
//! Handlers only translate between JSON and [`TriviaService`] calls; every
//! policy decision lives in the core.

use axum::{
    http::{header, HeaderValue, Method, Uri},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use trivia_core::TriviaService;

use crate::config::ServerConfig;

mod category_endpoints;
mod http_error;
mod payload;
mod question_endpoints;
mod quiz_endpoints;

pub use http_error::HttpError;

/// Application state shared across all endpoints
#[derive(Clone)]
pub struct AppState {
    pub trivia: Arc<TriviaService>,
}

/// Create the application router
///
/// `cors_allow_origin` restricts CORS to one origin; `None` allows any.
pub fn create_router(state: AppState, cors_allow_origin: Option<&str>) -> Router {
    Router::new()
        .merge(question_endpoints::routes(state.clone()))
        .merge(category_endpoints::routes(state.clone()))
        .merge(quiz_endpoints::routes(state))
        .fallback(route_not_found)
        .layer(cors_layer(cors_allow_origin))
        .layer(TraceLayer::new_for_http())
}

async fn route_not_found(uri: Uri) -> HttpError {
    HttpError::not_found(format!("no route for {}", uri.path()))
}

/// Fallback for a known path requested with a method it doesn't serve
pub(crate) async fn method_not_allowed(method: Method, uri: Uri) -> HttpError {
    HttpError::method_not_allowed(format!("{} {}", method, uri.path()))
}

fn cors_layer(allow_origin: Option<&str>) -> CorsLayer {
    let origin = match allow_origin.map(HeaderValue::from_str) {
        Some(Ok(origin)) => AllowOrigin::exact(origin),
        Some(Err(_)) => {
            tracing::warn!("Invalid CORS origin {:?}, allowing any origin", allow_origin);
            AllowOrigin::any()
        }
        None => AllowOrigin::any(),
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::PUT,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Serve the API until Ctrl-C
///
/// # Errors
///
/// Returns error if the listener fails to bind or the server fails.
pub async fn start_server(config: &ServerConfig, trivia: Arc<TriviaService>) -> anyhow::Result<()> {
    let app = create_router(AppState { trivia }, config.cors_allow_origin.as_deref());

    let addr = config.socket_address();
    tracing::info!("🚀 Trivia API listening on http://{}", addr);
    match &config.cors_allow_origin {
        Some(origin) => tracing::info!("📡 CORS enabled for {}", origin),
        None => tracing::info!("📡 CORS enabled for any origin"),
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
