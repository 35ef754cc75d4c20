// src/utils/ocr.rs

use std::{process::Stdio, string::FromUtf8Error};

use async_trait::async_trait;
use thiserror::Error;
use tokio::{io::AsyncWriteExt, process::Command};

use crate::config::Config;

/// Errors raised while recognizing text in an image.
#[derive(Debug, Error)]
pub enum OcrError {
    /// The engine could not be started at all.
    #[error("failed to start OCR command `{command}`: {source}")]
    Unavailable {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// I/O with a running engine failed.
    #[error("OCR process I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The engine rejected the image (unreadable or unsupported format).
    #[error("OCR command exited with {status}: {stderr}")]
    Rejected { status: String, stderr: String },

    #[error("OCR output was not valid UTF-8: {0}")]
    InvalidUtf8(#[from] FromUtf8Error),
}

impl OcrError {
    /// Whether the failure concerns the engine itself rather than one image.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, OcrError::Unavailable { .. })
    }
}

/// Recognizes text in a single encoded image (PNG, JPEG, ...).
#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn recognize(&self, image: &[u8]) -> Result<String, OcrError>;
}

/// Runs the Tesseract command line tool, piping the image through stdin/stdout.
#[derive(Debug, Clone)]
pub struct TesseractOcr {
    command: String,
    language: String,
}

impl TesseractOcr {
    pub fn new(command: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            language: language.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.ocr_command, &config.ocr_lang)
    }
}

#[async_trait]
impl OcrEngine for TesseractOcr {
    async fn recognize(&self, image: &[u8]) -> Result<String, OcrError> {
        let mut child = Command::new(&self.command)
            .args(["stdin", "stdout", "-l", self.language.as_str()])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| OcrError::Unavailable {
                command: self.command.clone(),
                source,
            })?;

        // Dropping stdin closes the pipe so the engine sees end of input.
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(image).await?;
        }

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            return Err(OcrError::Rejected {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8(output.stdout)?)
    }
}

/// Recognizes every image and joins the results, one line per image.
///
/// * Empty buffers are skipped.
/// * Images the engine rejects are logged and skipped.
/// * An engine that cannot start fails the whole request.
pub async fn extract_text(engine: &dyn OcrEngine, images: &[Vec<u8>]) -> Result<String, OcrError> {
    let mut pages = Vec::with_capacity(images.len());

    for (index, image) in images.iter().enumerate() {
        if image.is_empty() {
            continue;
        }

        match engine.recognize(image).await {
            Ok(text) => pages.push(text.split_whitespace().collect::<Vec<_>>().join(" ")),
            Err(e) if e.is_unavailable() => return Err(e),
            Err(e) => tracing::warn!("Skipping image {} during OCR: {}", index, e),
        }
    }

    Ok(pages.join("\n").trim().to_string())
}
