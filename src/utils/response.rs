use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::utils::error::FieldError;

#[derive(Serialize)]
struct ValidationErrorBody<'a> {
    error: &'static str,
    fields: &'a [FieldError],
}

/// Plain JSON string body with the given status, e.g. `200 "Event removed"`.
pub fn message(status: StatusCode, text: &str) -> Response {
    (status, Json(text)).into_response()
}

pub fn validation_failure(fields: &[FieldError]) -> Response {
    let body = ValidationErrorBody {
        error: "Validation failed",
        fields,
    };

    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}
