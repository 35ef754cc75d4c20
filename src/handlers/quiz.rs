// src/handlers/quiz.rs

use axum::{Json, extract::State, response::IntoResponse};
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::AppError,
    generator::QuizAssembler,
    models::{
        quiz::{GenerateQuizRequest, GenerateQuizResponse},
        quiz_history::QuizHistory,
    },
};

/// Generates a quiz from notes text and saves it to history.
///
/// * Text shorter than 5 characters yields `{"quiz": []}` and nothing is saved.
/// * Otherwise the quiz always has the configured number of questions.
pub async fn generate_quiz(
    State(pool): State<SqlitePool>,
    State(assembler): State<QuizAssembler>,
    Json(payload): Json<GenerateQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let text = payload.text.unwrap_or_default();
    let topic = payload.topic.unwrap_or_default();

    let result = assembler.assemble(&text, &topic);

    if result.is_empty() {
        tracing::info!("Input too short, returning empty quiz");
        return Ok(Json(GenerateQuizResponse {
            quiz: Vec::new(),
            saved_id: None,
        }));
    }

    let saved_id = QuizHistory::create(&pool, &result.topic, &result.questions).await?;

    tracing::info!(
        "Generated quiz {} on '{}' with {} questions",
        saved_id,
        result.topic,
        result.questions.len()
    );

    Ok(Json(GenerateQuizResponse {
        quiz: result.questions,
        saved_id: Some(saved_id),
    }))
}
