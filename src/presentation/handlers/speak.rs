use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::application::services::SpeakRequest;
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

use super::error_response::turn_error_response;

#[derive(Debug, Deserialize)]
pub struct SpeakBody {
    #[serde(default)]
    pub text: String,
    pub engine: Option<String>,
    pub voice: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SpeakResponse {
    pub session_id: String,
    pub audio_url: String,
    pub engine: String,
    pub characters: usize,
    pub status: String,
}

#[tracing::instrument(skip(state, body))]
pub async fn speak_handler(
    State(state): State<AppState>,
    Json(body): Json<SpeakBody>,
) -> impl IntoResponse {
    tracing::debug!(text = %sanitize_prompt(&body.text), engine = ?body.engine, "Processing speak request");

    let request = SpeakRequest {
        text: body.text,
        engine: body.engine,
        voice: body.voice,
    };

    match state.orchestrator.speak(request).await {
        Ok(result) => (
            StatusCode::OK,
            Json(SpeakResponse {
                session_id: result.session_id.to_string(),
                audio_url: result.audio_url,
                engine: result.engine,
                characters: result.characters,
                status: result.status,
            }),
        )
            .into_response(),
        Err(e) => turn_error_response(e),
    }
}
