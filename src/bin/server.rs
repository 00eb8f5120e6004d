//! Document Q&A server binary
//!
//! Run with: cargo run --bin docqa-server

use docqa_rag::{server::ApiServer, RagConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docqa_rag=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Config file is optional; env vars always win for secrets
    let config = match std::env::args().nth(1) {
        Some(path) => RagConfig::from_file(path)?,
        None => RagConfig::from_env(),
    };

    tracing::info!("Configuration loaded");
    tracing::info!("  - Embedding model: {}", config.openai.embed_model);
    tracing::info!("  - Chat model: {}", config.openai.chat_model);
    tracing::info!("  - Retrieval top_k: {}", config.retrieval.top_k);
    tracing::info!("  - Evaluation cutoff: {}", config.retrieval.evaluation_cutoff);

    let server = ApiServer::new(config)?;

    println!("Server starting on http://{}", server.address());
    println!("Endpoints:");
    println!("  POST /api/upload     - Upload documents");
    println!("  POST /api/query      - Ask questions (with ranking metrics)");
    println!("  POST /api/transcribe - Transcribe audio");
    println!("  GET  /health         - Health check");

    server.start().await?;

    Ok(())
}
