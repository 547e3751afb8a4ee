use std::collections::BTreeMap;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::presentation::state::AppState;

#[derive(Debug, Serialize)]
pub struct EngineInfo {
    pub id: String,
    pub local: bool,
    pub output_format: &'static str,
    pub default_voice: String,
    pub voices: Vec<String>,
    pub default: bool,
}

#[derive(Debug, Serialize)]
pub struct EnginesResponse {
    pub default_engine: String,
    pub aliases: BTreeMap<String, String>,
    pub engines: Vec<EngineInfo>,
}

pub async fn engines_handler(State(state): State<AppState>) -> impl IntoResponse {
    let router = state.orchestrator.router();
    let default_engine = router.resolve_id(None);

    let engines = router
        .engines()
        .into_iter()
        .map(|descriptor| EngineInfo {
            default: descriptor.id == default_engine,
            output_format: descriptor.output_format.as_mime(),
            id: descriptor.id,
            local: descriptor.local,
            default_voice: descriptor.default_voice,
            voices: descriptor.voices,
        })
        .collect();

    (
        StatusCode::OK,
        Json(EnginesResponse {
            default_engine,
            aliases: router.aliases().into_iter().collect(),
            engines,
        }),
    )
}
