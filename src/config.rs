// src/config.rs

use std::{env, str::FromStr};
use dotenvy::dotenv;

use crate::generator::QuizConfig;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub rust_log: String,
    pub bind_addr: String,
    /// Executable used for text recognition, invoked as `<cmd> stdin stdout -l <lang>`.
    pub ocr_command: String,
    pub ocr_lang: String,
    /// Request body limit for image uploads.
    pub max_upload_bytes: usize,
    /// Maximum number of rows returned by the history listing.
    pub history_limit: i64,
    pub quiz: QuizConfig,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://quiz.db?mode=rwc".to_string());

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8000".to_string());

        let ocr_command = env::var("OCR_COMMAND")
            .unwrap_or_else(|_| "tesseract".to_string());

        let ocr_lang = env::var("OCR_LANG")
            .unwrap_or_else(|_| "eng".to_string());

        let defaults = QuizConfig::default();
        let quiz = QuizConfig {
            total_cap: env_or("QUIZ_TOTAL_CAP", defaults.total_cap),
            mcq_cap: env_or("QUIZ_MCQ_CAP", defaults.mcq_cap),
            blank_cap: env_or("QUIZ_BLANK_CAP", defaults.blank_cap),
            short_cap: env_or("QUIZ_SHORT_CAP", defaults.short_cap),
            max_input_chars: env_or("QUIZ_MAX_INPUT_CHARS", defaults.max_input_chars),
            max_candidate_sentences: env_or("QUIZ_MAX_SENTENCES", defaults.max_candidate_sentences),
        };

        Self {
            database_url,
            rust_log,
            bind_addr,
            ocr_command,
            ocr_lang,
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", 20 * 1024 * 1024),
            history_limit: env_or("HISTORY_LIMIT", 50),
            quiz,
        }
    }
}

/// Reads and parses an environment variable, falling back on absence or parse failure.
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}
