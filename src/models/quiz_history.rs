// src/models/quiz_history.rs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};

use crate::{error::AppError, models::question::Question};

/// Represents the 'quiz_history' table in the database.
#[derive(Debug, Clone, FromRow)]
pub struct QuizHistory {
    pub id: i64,

    pub topic: String,

    /// The generated questions, stored as a JSON array.
    pub quiz_json: String,

    /// Set by the database on insert (UTC).
    pub created_at: NaiveDateTime,
}

/// A saved quiz as returned by the history listing.
#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub topic: String,
    pub created_at: NaiveDateTime,
    pub quiz: Vec<Question>,
}

/// Query parameters for listing history.
#[derive(Debug, Default, Deserialize)]
pub struct HistoryParams {
    pub topic: Option<String>,
}

impl QuizHistory {
    /// Stores a quiz and returns its new ID.
    pub async fn create(
        pool: &SqlitePool,
        topic: &str,
        quiz: &[Question],
    ) -> Result<i64, AppError> {
        let quiz_json = serde_json::to_string(quiz)
            .map_err(|e| AppError::InternalServerError(e.to_string()))?;

        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO quiz_history (topic, quiz_json)
            VALUES (?, ?)
            RETURNING id
            "#,
        )
        .bind(topic)
        .bind(quiz_json)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to save quiz: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

        Ok(id)
    }

    /// Lists saved quizzes, newest first, optionally for one topic only.
    pub async fn list(
        pool: &SqlitePool,
        topic: Option<&str>,
        limit: i64,
    ) -> Result<Vec<QuizHistory>, AppError> {
        let mut query_builder = QueryBuilder::<Sqlite>::new(
            "SELECT id, topic, quiz_json, created_at FROM quiz_history",
        );

        if let Some(topic) = topic {
            query_builder.push(" WHERE topic = ").push_bind(topic);
        }
        query_builder
            .push(" ORDER BY created_at DESC, id DESC LIMIT ")
            .push_bind(limit);

        let rows = query_builder
            .build_query_as::<QuizHistory>()
            .fetch_all(pool)
            .await?;

        Ok(rows)
    }

    /// Deletes a saved quiz. Returns `false` if no row had that ID.
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM quiz_history WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Decodes the stored questions.
    pub fn into_entry(self) -> Result<HistoryEntry, AppError> {
        let quiz = serde_json::from_str(&self.quiz_json).map_err(|e| {
            tracing::error!("Corrupt quiz_json in history row {}: {:?}", self.id, e);
            AppError::InternalServerError(e.to_string())
        })?;

        Ok(HistoryEntry {
            id: self.id,
            topic: self.topic,
            created_at: self.created_at,
            quiz,
        })
    }
}
