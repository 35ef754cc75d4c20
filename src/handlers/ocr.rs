// src/handlers/ocr.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Multipart, State},
    response::IntoResponse,
};

use crate::{
    error::AppError,
    models::quiz::ExtractTextResponse,
    utils::ocr::{self, OcrEngine},
};

/// Multipart field carrying one uploaded image; may repeat.
const FILES_FIELD: &str = "files";

/// Extracts text from uploaded note images.
/// Returns `{"text": ""}` when no images were sent.
pub async fn extract_text(
    State(engine): State<Arc<dyn OcrEngine>>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut images = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILES_FIELD) {
            continue;
        }
        images.push(field.bytes().await?.to_vec());
    }

    let text = ocr::extract_text(engine.as_ref(), &images).await?;
    tracing::info!("Extracted {} characters from {} images", text.len(), images.len());

    Ok(Json(ExtractTextResponse { text }))
}
