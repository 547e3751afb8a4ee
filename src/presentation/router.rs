use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    audio_handler, engines_handler, health_handler, process_handler, speak_handler,
};
use crate::presentation::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let audio_route = format!(
        "{}/{{session_id}}",
        state.settings.pipeline.audio_route.trim_end_matches('/')
    );
    let body_limit = state.settings.server.max_upload_bytes();

    Router::new()
        .route("/health", get(health_handler))
        .route("/process", post(process_handler))
        .route("/api/v1/turns", post(process_handler))
        .route("/api/v1/speak", post(speak_handler))
        .route("/api/v1/engines", get(engines_handler))
        .route(&audio_route, get(audio_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
