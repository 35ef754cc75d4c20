use std::sync::Arc;

use crate::{config::Config, generator::QuizAssembler, utils::ocr::OcrEngine};
use axum::extract::FromRef;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Config,
    pub ocr: Arc<dyn OcrEngine>,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: Config, ocr: Arc<dyn OcrEngine>) -> Self {
        Self { pool, config, ocr }
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for Arc<dyn OcrEngine> {
    fn from_ref(state: &AppState) -> Self {
        state.ocr.clone()
    }
}

impl FromRef<AppState> for QuizAssembler {
    fn from_ref(state: &AppState) -> Self {
        QuizAssembler::new(state.config.quiz.clone())
    }
}
