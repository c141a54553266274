//! Quiz endpoint
//!
//! `POST /quizzes` returns one random question the client hasn't seen yet.
//! The server keeps no quiz state: the client resends every id it has already
//! been shown in `previous_questions`, and `"question": null` means the quiz
//! is over.
//!
//! ```bash
//! curl -X POST http://localhost:3001/quizzes \
//!   -H "Content-Type: application/json" \
//!   -d '{"previous_questions":[3,7],"quiz_category":{"id":0,"type":"click"}}'
//! ```

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::api::payload::LenientInt;
use crate::api::{method_not_allowed, AppState, HttpError};
use trivia_core::{Question, QuestionId, QuizCategory};

#[derive(Debug, Deserialize)]
pub struct QuizRequest {
    #[serde(default)]
    pub previous_questions: Option<Vec<QuestionId>>,
    #[serde(default)]
    pub quiz_category: Option<QuizCategoryPayload>,
}

/// `{"id": 0 | n, "type": "..."}`; id 0 selects every category and `type`
/// is informational only
#[derive(Debug, Deserialize)]
pub struct QuizCategoryPayload {
    pub id: Option<LenientInt>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub success: bool,
    pub question: Option<Question>,
}

async fn next_question(
    State(state): State<AppState>,
    body: Result<Json<QuizRequest>, JsonRejection>,
) -> Result<Json<QuizResponse>, HttpError> {
    let Json(body) = body?;

    let category = match body.quiz_category {
        Some(payload) => {
            let id = payload
                .id
                .as_ref()
                .and_then(LenientInt::as_i64)
                .ok_or_else(|| HttpError::bad_request("quiz_category.id is not an integer"))?;
            tracing::debug!("Quiz category {} ({:?})", id, payload.kind);
            Some(QuizCategory::from_id(id))
        }
        None => None,
    };

    let excluded: HashSet<QuestionId> = body
        .previous_questions
        .unwrap_or_default()
        .into_iter()
        .collect();

    let question = state
        .trivia
        .next_quiz_question(category, &excluded)
        .await?;

    Ok(Json(QuizResponse {
        success: true,
        question,
    }))
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(next_question).fallback(method_not_allowed))
        .with_state(state)
}
