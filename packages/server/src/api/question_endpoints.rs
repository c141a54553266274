//! Question endpoints
//!
//! - `GET /health` - Health check
//! - `GET /questions?page=N` - Paginated question listing with all categories
//! - `POST /questions` - Create a question
//! - `DELETE /questions/:id` - Delete a question
//! - `POST /questions/search` - Case-insensitive text search

use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, Query, State},
    response::Json,
    routing::{delete, get, post},
    Router,
};
use serde::{Deserialize, Serialize};

use crate::api::payload::{page_number, LenientInt};
use crate::api::{method_not_allowed, AppState, HttpError};
use trivia_core::{CategoryMap, NewQuestion, Question, QuestionId};

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Deserialize)]
pub struct ListQuestionsQuery {
    /// Kept as text so a malformed value can fall back to page 1
    page: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QuestionListResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub categories: CategoryMap,
    pub current_category: Option<String>,
}

/// Body of `POST /questions`; presence is checked in the handler so a
/// missing field is a 400 rather than a deserialization failure
#[derive(Debug, Deserialize)]
pub struct CreateQuestionRequest {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<LenientInt>,
    pub difficulty: Option<LenientInt>,
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub created: QuestionId,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub success: bool,
    pub deleted: QuestionId,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(rename = "searchTerm", default)]
    pub search_term: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: Option<String>,
}

async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn list_questions(
    State(state): State<AppState>,
    Query(query): Query<ListQuestionsQuery>,
) -> Result<Json<QuestionListResponse>, HttpError> {
    let page = page_number(query.page.as_deref());
    let listing = state.trivia.list_questions(page).await?;

    Ok(Json(QuestionListResponse {
        success: true,
        questions: listing.questions,
        total_questions: listing.total_questions,
        categories: listing.categories,
        current_category: None,
    }))
}

/// Create a question
///
/// `category` and `difficulty` may be JSON numbers or numeric strings.
///
/// ```bash
/// curl -X POST http://localhost:3001/questions \
///   -H "Content-Type: application/json" \
///   -d '{"question":"What is 2+2?","answer":"4","category":1,"difficulty":1}'
/// ```
async fn create_question(
    State(state): State<AppState>,
    body: Result<Json<CreateQuestionRequest>, JsonRejection>,
) -> Result<Json<CreatedResponse>, HttpError> {
    let Json(body) = body?;

    let question = body
        .question
        .ok_or_else(|| HttpError::bad_request("missing field: question"))?;
    let answer = body
        .answer
        .ok_or_else(|| HttpError::bad_request("missing field: answer"))?;
    let category = required_int(body.category.as_ref(), "category")?;
    let difficulty = required_int(body.difficulty.as_ref(), "difficulty")?;

    let id = state
        .trivia
        .create_question(NewQuestion::new(question, answer, category, difficulty))
        .await?;

    Ok(Json(CreatedResponse {
        success: true,
        created: id,
    }))
}

fn required_int(value: Option<&LenientInt>, field: &str) -> Result<i64, HttpError> {
    let value = value.ok_or_else(|| HttpError::bad_request(format!("missing field: {field}")))?;
    value
        .as_i64()
        .ok_or_else(|| HttpError::bad_request(format!("{field} is not an integer: {value:?}")))
}

async fn delete_question(
    State(state): State<AppState>,
    id: Result<Path<QuestionId>, PathRejection>,
) -> Result<Json<DeletedResponse>, HttpError> {
    let Path(id) = id?;
    let deleted = state.trivia.delete_question(id).await?;

    Ok(Json(DeletedResponse {
        success: true,
        deleted,
    }))
}

async fn search_questions(
    State(state): State<AppState>,
    body: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, HttpError> {
    let Json(body) = body?;
    let term = body.search_term.unwrap_or_default();

    let results = state.trivia.search_questions(&term).await?;

    Ok(Json(SearchResponse {
        success: true,
        questions: results.questions,
        total_questions: results.total_questions,
        current_category: None,
    }))
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check).fallback(method_not_allowed))
        .route(
            "/questions",
            get(list_questions)
                .post(create_question)
                .fallback(method_not_allowed),
        )
        .route(
            "/questions/search",
            post(search_questions).fallback(method_not_allowed),
        )
        .route(
            "/questions/:id",
            delete(delete_question).fallback(method_not_allowed),
        )
        .with_state(state)
}
