use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;

use crate::domain::SessionId;
use crate::presentation::state::AppState;

use super::error_response::error_response;

#[tracing::instrument(skip(state))]
pub async fn audio_handler(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let Some(session_id) = SessionId::parse(&session_id) else {
        return error_response(StatusCode::NOT_FOUND, "not_found", "Audio not found");
    };

    let artifact = match state.artifact_store.get(&session_id).await {
        Ok(Some(artifact)) => artifact,
        Ok(None) => {
            tracing::debug!(session_id = %session_id, "Audio requested for unknown session");
            return error_response(StatusCode::NOT_FOUND, "not_found", "Audio not found");
        }
        Err(e) => {
            tracing::error!(error = %e, session_id = %session_id, "Failed to load audio");
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "storage_failure",
                format!("Failed to load audio: {}", e),
            );
        }
    };

    if state.settings.artifacts.reclaim_on_read {
        if let Err(e) = state.artifact_store.delete(&session_id).await {
            tracing::warn!(error = %e, session_id = %session_id, "Failed to reclaim audio after read");
        }
    }

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, artifact.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{}\"", artifact.file_name()),
            ),
            (header::CACHE_CONTROL, "no-store".to_string()),
        ],
        artifact.bytes,
    )
        .into_response()
}
