//! Error responses for the HTTP surface.
//!
//! This is the only place where [`AppError`] becomes a status code. Bodies are
//! `{ "error": "..." }`, with a `details` list of field errors for validation
//! failures.

use crate::libs::error::{AppError, FieldError};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

pub const VALIDATION_FAILED: &str = "Validation failed";
const INTERNAL_ERROR: &str = "An internal error occurred";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

#[derive(Debug, Clone)]
pub struct ApiErrorResponse {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiErrorResponse {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                error: message.into(),
                details: None,
            },
        }
    }

    pub fn validation(details: Vec<FieldError>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorBody {
                error: VALIDATION_FAILED.to_string(),
                details: Some(details),
            },
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Internal failures never expose their cause to the client.
    pub fn internal_error() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<AppError> for ApiErrorResponse {
    fn from(error: AppError) -> Self {
        match error {
            AppError::Validation(details) => Self::validation(details),
            AppError::NotFound { entity, .. } => Self::not_found(format!("{} not found", entity)),
            AppError::Storage(error) => {
                tracing::error!(%error, "storage error");
                Self::internal_error()
            }
        }
    }
}

impl From<Vec<FieldError>> for ApiErrorResponse {
    fn from(details: Vec<FieldError>) -> Self {
        Self::validation(details)
    }
}

impl From<JsonRejection> for ApiErrorResponse {
    fn from(rejection: JsonRejection) -> Self {
        Self::validation(vec![FieldError::new("body", rejection.body_text())])
    }
}

impl From<PathRejection> for ApiErrorResponse {
    fn from(rejection: PathRejection) -> Self {
        Self::validation(vec![FieldError::new("id", rejection.body_text())])
    }
}

impl From<QueryRejection> for ApiErrorResponse {
    fn from(rejection: QueryRejection) -> Self {
        Self::validation(vec![FieldError::new("query", rejection.body_text())])
    }
}
