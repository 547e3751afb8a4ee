use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::TurnError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: &'static str,
}

pub fn error_response(status: StatusCode, kind: &'static str, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            kind,
        }),
    )
        .into_response()
}

pub fn turn_error_response(error: TurnError) -> Response {
    match error {
        TurnError::InvalidRequest(message) => {
            tracing::warn!(error = %message, "Rejected invalid request");
            error_response(StatusCode::BAD_REQUEST, "invalid_request", message)
        }
        TurnError::StorageFailure(e) => {
            tracing::error!(error = %e, "Turn failed to store its artifact");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "storage_failure",
                format!("Failed to store audio: {}", e),
            )
        }
    }
}
