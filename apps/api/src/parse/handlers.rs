use anyhow::anyhow;
use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::parse::resume::{has_meaningful_text, parse_resume, ParsedResume};
use crate::segmentation::{Chunk, ChunkStrategy};
use crate::state::AppState;

/// Shortest trimmed text the chunking endpoint accepts.
const MIN_CHUNK_INPUT_CHARS: usize = 10;
const UPLOAD_FIELD: &str = "file";

#[derive(Deserialize)]
pub struct TextRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ChunksResponse {
    pub strategy: ChunkStrategy,
    pub chunks: Vec<Chunk>,
}

#[derive(Debug, Serialize)]
pub struct PdfParseResponse {
    #[serde(flatten)]
    pub resume: ParsedResume,
    pub strategy: ChunkStrategy,
    pub chunks: Vec<Chunk>,
}

/// POST /api/v1/parse/chunks
pub async fn handle_chunks(
    State(state): State<AppState>,
    Json(req): Json<TextRequest>,
) -> Result<Json<ChunksResponse>, AppError> {
    if req.text.trim().chars().count() < MIN_CHUNK_INPUT_CHARS {
        return Err(AppError::Validation("Text required".to_string()));
    }

    let segmenter = state.segmenter.clone();
    let outcome = tokio::task::spawn_blocking(move || segmenter.chunk(&req.text))
        .await
        .map_err(|e| AppError::Internal(anyhow!("spawn_blocking failed in chunking: {e}")))?;

    info!(
        "Chunked text into {} chunks ({:?})",
        outcome.chunks().len(),
        outcome.strategy()
    );
    Ok(Json(ChunksResponse {
        strategy: outcome.strategy(),
        chunks: outcome.into_chunks(),
    }))
}

/// POST /api/v1/parse/resume
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    Json(req): Json<TextRequest>,
) -> Result<Json<ParsedResume>, AppError> {
    if !has_meaningful_text(&req.text) {
        return Err(AppError::UnprocessableEntity(
            "Text too short to parse as a resume".to_string(),
        ));
    }

    let segmenter = state.segmenter.clone();
    let resume = tokio::task::spawn_blocking(move || parse_resume(&req.text, &segmenter))
        .await
        .map_err(|e| AppError::Internal(anyhow!("spawn_blocking failed in resume parsing: {e}")))?;

    info!(
        "Parsed resume: {} experience, {} projects, {} education entries",
        resume.experience.len(),
        resume.projects.len(),
        resume.education.len()
    );
    Ok(Json(resume))
}

/// POST /api/v1/parse/pdf
/// Multipart upload with the document in the `file` field.
pub async fn handle_parse_pdf(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<PdfParseResponse>, AppError> {
    let mut document = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(UPLOAD_FIELD) {
            document = Some(field.bytes().await?);
            break;
        }
    }
    let document = document
        .filter(|bytes| !bytes.is_empty())
        .ok_or_else(|| AppError::Validation("PDF file required in field 'file'".to_string()))?;

    info!("Extracting text from uploaded document ({} bytes)", document.len());
    let text = state.extractor.extract_text(document).await?;
    if !has_meaningful_text(&text) {
        return Err(AppError::UnprocessableEntity(
            "Failed to extract meaningful text from PDF".to_string(),
        ));
    }

    let segmenter = state.segmenter.clone();
    let (resume, outcome) = tokio::task::spawn_blocking(move || {
        let outcome = segmenter.chunk(&text);
        (parse_resume(&text, &segmenter), outcome)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow!("spawn_blocking failed in PDF parsing: {e}")))?;

    Ok(Json(PdfParseResponse {
        resume,
        strategy: outcome.strategy(),
        chunks: outcome.into_chunks(),
    }))
}
