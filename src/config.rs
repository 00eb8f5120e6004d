//! Configuration for the document Q&A system

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Main system configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RagConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// OpenAI configuration (embeddings + completions)
    #[serde(default)]
    pub openai: OpenAiConfig,
    /// Pinecone vector index configuration
    #[serde(default)]
    pub pinecone: PineconeConfig,
    /// Azure speech-to-text configuration
    #[serde(default)]
    pub azure_speech: AzureSpeechConfig,
    /// Local storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Retrieval and evaluation configuration
    #[serde(default)]
    pub retrieval: RetrievalConfig,
}

impl RagConfig {
    /// Load configuration from a TOML file, then apply environment overrides.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::Config(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        let mut config: Self = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Invalid config file: {}", e)))?;
        config.apply_env();
        Ok(config)
    }

    /// Default configuration with environment overrides applied.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Pull secrets and endpoints from the environment.
    ///
    /// Recognized variables: `OPENAI_API_KEY`, `PINECONE_API_KEY`,
    /// `PINECONE_INDEX_HOST`, `AZURE_COGNITIVE_KEY`, `AZURE_COGNITIVE_ENDPOINT`.
    pub fn apply_env(&mut self) {
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            self.openai.api_key = key;
        }
        if let Ok(key) = std::env::var("PINECONE_API_KEY") {
            self.pinecone.api_key = key;
        }
        if let Ok(host) = std::env::var("PINECONE_INDEX_HOST") {
            self.pinecone.index_host = host;
        }
        if let Ok(key) = std::env::var("AZURE_COGNITIVE_KEY") {
            self.azure_speech.api_key = key;
        }
        if let Ok(endpoint) = std::env::var("AZURE_COGNITIVE_ENDPOINT") {
            self.azure_speech.endpoint = endpoint;
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
    /// Maximum upload size in bytes (default: 50MB)
    pub max_upload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            enable_cors: true,
            max_upload_size: 50 * 1024 * 1024,
        }
    }
}

/// OpenAI configuration for embeddings and chat completions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// API base URL
    pub base_url: String,
    /// API key (usually supplied via OPENAI_API_KEY)
    #[serde(default)]
    pub api_key: String,
    /// Embedding model name
    pub embed_model: String,
    /// Embedding dimensions (1536 for text-embedding-ada-002)
    pub dimensions: usize,
    /// Chat completion model name
    pub chat_model: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Number of retries for failed requests
    pub max_retries: u32,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            api_key: String::new(),
            embed_model: "text-embedding-ada-002".to_string(),
            dimensions: 1536,
            chat_model: "gpt-3.5-turbo".to_string(),
            timeout_secs: 60,
            max_retries: 2,
        }
    }
}

/// Pinecone vector index configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PineconeConfig {
    /// API key (usually supplied via PINECONE_API_KEY)
    #[serde(default)]
    pub api_key: String,
    /// Index data-plane host, e.g. "https://my-index-abc123.svc.us-east-1.pinecone.io"
    #[serde(default)]
    pub index_host: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Number of retries for failed requests
    pub max_retries: u32,
}

impl Default for PineconeConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            index_host: String::new(),
            timeout_secs: 30,
            max_retries: 2,
        }
    }
}

/// Azure Cognitive Services speech-to-text configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AzureSpeechConfig {
    /// Subscription key (usually supplied via AZURE_COGNITIVE_KEY)
    #[serde(default)]
    pub api_key: String,
    /// Recognition endpoint, e.g.
    /// "https://eastus.stt.speech.microsoft.com/speech/recognition/conversation/cognitiveservices/v1"
    #[serde(default)]
    pub endpoint: String,
    /// Recognition language
    pub language: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for AzureSpeechConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: String::new(),
            language: "en-US".to_string(),
            timeout_secs: 60,
        }
    }
}

/// Local storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for uploaded files
    pub upload_dir: PathBuf,
    /// Path to the SQLite document database
    pub database_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("uploads"),
            database_path: PathBuf::from("documents.db"),
        }
    }
}

/// Retrieval and ranking-evaluation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Number of matches to retrieve from the vector index
    pub top_k: usize,
    /// Cutoff K for ranking-quality metrics (Recall@K, Precision@K, nDCG@K)
    pub evaluation_cutoff: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: 3,
            evaluation_cutoff: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RagConfig::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.openai.embed_model, "text-embedding-ada-002");
        assert_eq!(config.openai.dimensions, 1536);
        assert_eq!(config.retrieval.top_k, 3);
        assert_eq!(config.retrieval.evaluation_cutoff, 3);
    }

    #[test]
    fn test_partial_toml() {
        let config: RagConfig = toml::from_str(
            r#"
            [server]
            host = "127.0.0.1"
            port = 8080
            enable_cors = false
            max_upload_size = 1048576

            [retrieval]
            top_k = 5
            evaluation_cutoff = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.retrieval.top_k, 5);
        // Untouched sections fall back to defaults
        assert_eq!(config.openai.chat_model, "gpt-3.5-turbo");
    }
}
