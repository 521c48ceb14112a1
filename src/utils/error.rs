use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::utils::response::{message, validation_failure};

/// A single field constraint violation, reported by name so the caller can
/// identify every offending field in one response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub reason: String,
}

impl FieldError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }

    pub fn required(field: &'static str) -> Self {
        Self::new(field, "is required")
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    #[error("{0}")]
    NotFound(String),
}

impl AppError {
    pub fn event_not_found() -> Self {
        AppError::NotFound("Event not found".to_string())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Validation(fields) => {
                warn!(?fields, "Request failed validation");
                validation_failure(fields)
            }
            // Not-found bodies are a plain JSON string, e.g. "Event not found".
            AppError::NotFound(msg) => {
                warn!(message = %msg, "Resource not found");
                message(StatusCode::NOT_FOUND, msg)
            }
        }
    }
}
