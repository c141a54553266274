//! Category endpoints
//!
//! - `GET /categories` - All categories as `{"<id>": "<name>"}`
//! - `GET /categories/:id/questions` - Every question of one category

use axum::{
    extract::{rejection::PathRejection, Path, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Serialize;

use crate::api::{method_not_allowed, AppState, HttpError};
use trivia_core::{CategoryId, CategoryMap, Question};

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: CategoryMap,
}

#[derive(Debug, Serialize)]
pub struct CategoryQuestionsResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    /// Display name of the requested category
    pub current_category: String,
}

async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<CategoriesResponse>, HttpError> {
    let categories = state.trivia.list_categories().await?;

    Ok(Json(CategoriesResponse {
        success: true,
        categories,
    }))
}

async fn questions_by_category(
    State(state): State<AppState>,
    id: Result<Path<CategoryId>, PathRejection>,
) -> Result<Json<CategoryQuestionsResponse>, HttpError> {
    let Path(id) = id?;
    let listing = state.trivia.questions_by_category(id).await?;

    Ok(Json(CategoryQuestionsResponse {
        success: true,
        questions: listing.questions,
        total_questions: listing.total_questions,
        current_category: listing.current_category,
    }))
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(list_categories).fallback(method_not_allowed))
        .route(
            "/categories/:id/questions",
            get(questions_by_category).fallback(method_not_allowed),
        )
        .with_state(state)
}
