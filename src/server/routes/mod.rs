//! API routes for the Q&A server

pub mod query;
pub mod transcribe;
pub mod upload;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        // Ingestion - with larger body limit for file uploads
        .route(
            "/upload",
            post(upload::upload_document).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        // Query with ranking evaluation
        .route("/query", post(query::query_document))
        // Audio transcription
        .route(
            "/transcribe",
            post(transcribe::transcribe_audio).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        // Info
        .route("/info", get(info))
}

/// API info endpoint
async fn info() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "name": "docqa-rag",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Document Q&A backend with vector retrieval and ranking evaluation",
        "endpoints": {
            "POST /api/upload": "Upload and index a document (text or PDF)",
            "POST /api/query": "Ask a question about an uploaded document",
            "POST /api/transcribe": "Transcribe an audio recording",
        },
        "metrics": ["Recall@K", "Precision@K", "MAP", "MRR", "nDCG@K"],
    }))
}
