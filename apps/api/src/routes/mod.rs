pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::parse::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Parse API
        .route("/api/v1/parse/chunks", post(handlers::handle_chunks))
        .route("/api/v1/parse/resume", post(handlers::handle_parse_resume))
        .route("/api/v1/parse/pdf", post(handlers::handle_parse_pdf))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
