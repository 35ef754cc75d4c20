// src/handlers/health.rs

use axum::{Json, response::IntoResponse};

pub async fn home() -> impl IntoResponse {
    Json(serde_json::json!({ "message": "Quiz API running!" }))
}
