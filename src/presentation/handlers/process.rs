use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use bytes::Bytes;
use serde::Serialize;

use crate::application::services::{TurnError, TurnRequest};
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

use super::error_response::{error_response, turn_error_response};

#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub session_id: String,
    pub transcription: String,
    pub text: String,
    pub audio_url: String,
    pub engine: String,
    pub degraded: Vec<String>,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn process_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut audio: Option<Bytes> = None;
    let mut engine: Option<String> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read multipart");
                return error_response(
                    e.status(),
                    "invalid_request",
                    format!("Failed to read multipart: {}", e),
                );
            }
        };

        match field.name() {
            Some("file") => match field.bytes().await {
                Ok(data) => audio = Some(data),
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to read uploaded audio");
                    return error_response(
                        e.status(),
                        "invalid_request",
                        format!("Failed to read file: {}", e),
                    );
                }
            },
            Some("engine") => match field.text().await {
                Ok(value) => engine = Some(value).filter(|v| !v.trim().is_empty()),
                Err(e) => {
                    return error_response(
                        e.status(),
                        "invalid_request",
                        format!("Failed to read engine: {}", e),
                    );
                }
            },
            _ => {}
        }
    }

    let Some(audio) = audio else {
        return turn_error_response(TurnError::InvalidRequest(
            "multipart field 'file' is required".to_string(),
        ));
    };

    tracing::debug!(bytes = audio.len(), engine = ?engine, "Audio upload received");

    match state.orchestrator.run_turn(TurnRequest { audio, engine }).await {
        Ok(result) => {
            tracing::info!(
                session_id = %result.session_id,
                engine = %result.engine,
                transcription = %sanitize_prompt(&result.transcription),
                reply = %sanitize_prompt(&result.text),
                degraded = ?result.degraded,
                "Turn processed"
            );
            (
                StatusCode::OK,
                Json(ProcessResponse {
                    session_id: result.session_id.to_string(),
                    transcription: result.transcription,
                    text: result.text,
                    audio_url: result.audio_url,
                    engine: result.engine,
                    degraded: result.degraded,
                }),
            )
                .into_response()
        }
        Err(e) => turn_error_response(e),
    }
}
