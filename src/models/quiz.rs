// src/models/quiz.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::question::Question;

/// DTO for generating a quiz from notes text.
/// Both fields may be omitted; a missing topic becomes "General".
#[derive(Debug, Default, Deserialize, Validate)]
pub struct GenerateQuizRequest {
    #[serde(default)]
    pub text: Option<String>,

    #[serde(default)]
    #[validate(length(max = 100, message = "Topic must be at most 100 characters."))]
    pub topic: Option<String>,
}

/// DTO returned by quiz generation.
/// `saved_id` is absent when the quiz came out empty and was not stored.
#[derive(Debug, Serialize)]
pub struct GenerateQuizResponse {
    pub quiz: Vec<Question>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_id: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractTextResponse {
    pub text: String,
}
