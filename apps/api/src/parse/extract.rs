//! Document text extraction: pluggable, trait-based.
//!
//! Default: `PdfTextExtractor` (pure-Rust `pdf-extract`, run on the blocking pool).
//! `AppState` holds an `Arc<dyn TextExtractor>` so tests can swap in fixed text.

use anyhow::anyhow;
use async_trait::async_trait;
use bytes::Bytes;

use crate::errors::AppError;

#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Plain text of an uploaded document.
    async fn extract_text(&self, document: Bytes) -> Result<String, AppError>;
}

pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract_text(&self, document: Bytes) -> Result<String, AppError> {
        // PDF decoding is CPU-bound; keep it off the async executor.
        tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&document))
            .await
            .map_err(|e| AppError::Internal(anyhow!("spawn_blocking failed in PDF extraction: {e}")))?
            .map_err(|e| AppError::PdfExtraction(e.to_string()))
    }
}
