// src/handlers/history.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use sqlx::SqlitePool;

use crate::{
    config::Config,
    error::AppError,
    models::quiz_history::{HistoryEntry, HistoryParams, QuizHistory},
};

/// Lists saved quizzes, newest first, optionally filtered by exact topic.
/// An empty `topic` parameter means no filter.
pub async fn list_history(
    State(pool): State<SqlitePool>,
    State(config): State<Config>,
    Query(params): Query<HistoryParams>,
) -> Result<impl IntoResponse, AppError> {
    let topic = params.topic.as_deref().filter(|t| !t.is_empty());

    let history = QuizHistory::list(&pool, topic, config.history_limit)
        .await?
        .into_iter()
        .map(QuizHistory::into_entry)
        .collect::<Result<Vec<HistoryEntry>, AppError>>()?;

    Ok(Json(serde_json::json!({ "history": history })))
}

/// Deletes a saved quiz by ID.
/// A missing ID is reported in the message, not as an error status.
pub async fn delete_history(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let message = if QuizHistory::delete(&pool, id).await? {
        tracing::info!("Deleted quiz {}", id);
        "Deleted successfully"
    } else {
        "Not found"
    };

    Ok(Json(serde_json::json!({ "message": message })))
}
