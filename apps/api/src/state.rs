use std::sync::Arc;

use crate::config::Config;
use crate::parse::extract::TextExtractor;
use crate::segmentation::Segmenter;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Validated segmentation engine, built once at startup.
    pub segmenter: Arc<Segmenter>,
    /// Pluggable document text extractor. Default: PdfTextExtractor.
    pub extractor: Arc<dyn TextExtractor>,
}
