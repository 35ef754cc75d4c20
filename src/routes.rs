// src/routes.rs

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    handlers::{health, history, ocr, quiz},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Mounts quiz generation, history and OCR routes at the root.
/// * Applies global middleware (Trace, CORS, upload size limit).
/// * Injects global state (Database Pool, Config, OCR engine).
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(health::home))
        .route("/generate-quiz", post(quiz::generate_quiz))
        .route("/extract-text", post(ocr::extract_text))
        .route("/history", get(history::list_history))
        .route("/history/{id}", delete(history::delete_history))
        // Global Middleware (applied from outside in)
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
