mod config;
mod errors;
mod fields;
mod parse;
mod routes;
mod segmentation;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::parse::extract::PdfTextExtractor;
use crate::routes::build_router;
use crate::segmentation::Segmenter;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on unparsable values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Parser API v{}", env!("CARGO_PKG_VERSION"));

    // Validate segmentation tuning once; parsing itself cannot fail
    let segmenter = Segmenter::new(config.segmenter.clone())
        .context("Invalid segmentation configuration")?;
    let tuning = segmenter.config();
    info!(
        "Segmenter ready: chunks {}..={} chars, window overlap {}",
        tuning.min_chunk_chars, tuning.max_chunk_chars, tuning.window_overlap_chars
    );

    // Build app state
    let state = AppState {
        config: config.clone(),
        segmenter: Arc::new(segmenter),
        extractor: Arc::new(PdfTextExtractor),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
