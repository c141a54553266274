//! HTTP error handling
//!
//! Every failure leaves the server as `{"success": false, "error": <status>,
//! "message": <reason phrase>}` so clients can branch on `success` alone.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use trivia_core::TriviaError;

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    error: u16,
    message: &'static str,
}

/// An error status plus internal detail for the logs
#[derive(Debug)]
pub struct HttpError {
    pub status: StatusCode,
    /// Never sent to clients
    pub details: String,
}

impl HttpError {
    pub fn new(status: StatusCode, details: impl Into<String>) -> Self {
        Self {
            status,
            details: details.into(),
        }
    }

    pub fn bad_request(details: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, details)
    }

    pub fn not_found(details: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, details)
    }

    pub fn unprocessable(details: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, details)
    }

    pub fn method_not_allowed(details: impl Into<String>) -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED, details)
    }

    /// Client-facing message for the status
    pub fn message(&self) -> &'static str {
        match self.status {
            StatusCode::BAD_REQUEST => "Bad request",
            StatusCode::NOT_FOUND => "Resource not found",
            StatusCode::UNPROCESSABLE_ENTITY => "Unprocessable entity",
            StatusCode::METHOD_NOT_ALLOWED => "Method not allowed",
            _ => "Internal server error",
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!("{}: {}", self.status, self.details);
        } else {
            tracing::debug!("{}: {}", self.status, self.details);
        }

        let body = ErrorBody {
            success: false,
            error: self.status.as_u16(),
            message: self.message(),
        };

        (self.status, Json(body)).into_response()
    }
}

impl From<TriviaError> for HttpError {
    fn from(err: TriviaError) -> Self {
        match err {
            TriviaError::NotFound(what) => HttpError::not_found(what),
            TriviaError::InvalidRequest(reason) => HttpError::bad_request(reason),
            TriviaError::PersistenceError(source) => {
                tracing::warn!("Store failure: {}", source);
                HttpError::unprocessable(source.to_string())
            }
        }
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        HttpError::bad_request(rejection.body_text())
    }
}

// A path segment that doesn't parse as an id names no resource
impl From<PathRejection> for HttpError {
    fn from(rejection: PathRejection) -> Self {
        HttpError::not_found(rejection.body_text())
    }
}
