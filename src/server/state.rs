//! Application state for the Q&A server

use std::sync::Arc;

use crate::config::RagConfig;
use crate::error::Result;
use crate::providers::{
    azure_speech::AzureTranscriber, openai::OpenAiClient, pinecone::PineconeIndex,
    CompletionProvider, Embedder, Transcriber, VectorIndex,
};
use crate::storage::DocumentDb;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: RagConfig,
    /// Embedding provider
    embedder: Arc<dyn Embedder>,
    /// Vector index
    vector_index: Arc<dyn VectorIndex>,
    /// LLM completion provider
    llm: Arc<dyn CompletionProvider>,
    /// Speech transcription provider
    transcriber: Arc<dyn Transcriber>,
    /// Document text store
    documents: DocumentDb,
}

impl AppState {
    /// Create application state wired to the live providers named in config
    pub fn new(config: RagConfig) -> Result<Self> {
        tracing::info!("Initializing application state...");

        std::fs::create_dir_all(&config.storage.upload_dir)?;

        let openai = Arc::new(OpenAiClient::new(&config.openai)?);
        tracing::info!(
            "OpenAI client initialized (embed: {}, chat: {})",
            config.openai.embed_model,
            config.openai.chat_model
        );

        let vector_index = Arc::new(PineconeIndex::new(&config.pinecone)?);
        tracing::info!("Pinecone index client initialized");

        let transcriber = Arc::new(AzureTranscriber::new(&config.azure_speech)?);
        tracing::info!("Azure speech client initialized");

        let documents = DocumentDb::open(&config.storage.database_path)?;
        tracing::info!(
            "Document database opened at {}",
            config.storage.database_path.display()
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                embedder: openai.clone(),
                llm: openai,
                vector_index,
                transcriber,
                documents,
            }),
        })
    }

    /// Create application state with injected providers (for tests and
    /// alternative backends)
    pub fn with_providers(
        config: RagConfig,
        embedder: Arc<dyn Embedder>,
        vector_index: Arc<dyn VectorIndex>,
        llm: Arc<dyn CompletionProvider>,
        transcriber: Arc<dyn Transcriber>,
        documents: DocumentDb,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                embedder,
                vector_index,
                llm,
                transcriber,
                documents,
            }),
        }
    }

    /// Get configuration
    pub fn config(&self) -> &RagConfig {
        &self.inner.config
    }

    /// Get embedding provider
    pub fn embedder(&self) -> &Arc<dyn Embedder> {
        &self.inner.embedder
    }

    /// Get vector index
    pub fn vector_index(&self) -> &Arc<dyn VectorIndex> {
        &self.inner.vector_index
    }

    /// Get LLM completion provider
    pub fn llm(&self) -> &Arc<dyn CompletionProvider> {
        &self.inner.llm
    }

    /// Get transcription provider
    pub fn transcriber(&self) -> &Arc<dyn Transcriber> {
        &self.inner.transcriber
    }

    /// Get document store
    pub fn documents(&self) -> &DocumentDb {
        &self.inner.documents
    }
}
