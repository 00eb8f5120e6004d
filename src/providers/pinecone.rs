//! Pinecone vector index client (data-plane REST API)

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::sleep;

use crate::config::PineconeConfig;
use crate::error::{Error, Result};

use super::vector_index::{IndexMatch, VectorIndex};

/// Pinecone index client with automatic retry
pub struct PineconeIndex {
    /// HTTP client
    client: Client,
    /// Configuration
    config: PineconeConfig,
}

#[derive(Serialize)]
struct UpsertRequest {
    vectors: Vec<UpsertVector>,
}

#[derive(Serialize)]
struct UpsertVector {
    id: String,
    values: Vec<f32>,
    metadata: HashMap<String, serde_json::Value>,
}

#[derive(Serialize)]
struct QueryRequest {
    vector: Vec<f32>,
    #[serde(rename = "topK")]
    top_k: usize,
    #[serde(rename = "includeMetadata")]
    include_metadata: bool,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<QueryMatch>,
}

#[derive(Deserialize)]
struct QueryMatch {
    id: String,
    score: f32,
    #[serde(default)]
    metadata: Option<HashMap<String, serde_json::Value>>,
}

#[derive(Serialize)]
struct DeleteRequest {
    ids: Vec<String>,
}

impl PineconeIndex {
    /// Create a new Pinecone index client
    pub fn new(config: &PineconeConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(Error::Config(
                "Pinecone API key is not set (PINECONE_API_KEY)".to_string(),
            ));
        }
        if config.index_host.is_empty() {
            return Err(Error::Config(
                "Pinecone index host is not set (PINECONE_INDEX_HOST)".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(5)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Retry a request with exponential backoff
    async fn retry_request<F, Fut, T>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    last_error = Some(e);
                    if attempt < self.config.max_retries {
                        let delay = Duration::from_secs(2u64.pow(attempt));
                        tracing::warn!(
                            "Pinecone request failed (attempt {}/{}), retrying in {:?}",
                            attempt + 1,
                            self.config.max_retries + 1,
                            delay
                        );
                        sleep(delay).await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| Error::VectorIndex("Unknown error".to_string())))
    }

    async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.config.index_host, path);
        let response = self
            .client
            .post(&url)
            .header("Api-Key", &self.config.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::VectorIndex(format!("Request to {} failed: {}", path, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::VectorIndex(format!(
                "Pinecone {} failed: HTTP {} - {}",
                path, status, body
            )));
        }

        Ok(response)
    }
}

#[async_trait]
impl VectorIndex for PineconeIndex {
    async fn upsert(
        &self,
        id: &str,
        vector: &[f32],
        metadata: HashMap<String, serde_json::Value>,
    ) -> Result<()> {
        let id = id.to_string();
        let vector = vector.to_vec();

        self.retry_request(|| {
            let id = id.clone();
            let vector = vector.clone();
            let metadata = metadata.clone();

            async move {
                let request = UpsertRequest {
                    vectors: vec![UpsertVector {
                        id,
                        values: vector,
                        metadata,
                    }],
                };
                self.post_json("/vectors/upsert", &request).await?;
                Ok(())
            }
        })
        .await
    }

    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<IndexMatch>> {
        let vector = vector.to_vec();

        self.retry_request(|| {
            let vector = vector.clone();

            async move {
                let request = QueryRequest {
                    vector,
                    top_k,
                    include_metadata: true,
                };

                let response = self.post_json("/query", &request).await?;
                let query_response: QueryResponse = response.json().await.map_err(|e| {
                    Error::VectorIndex(format!("Failed to parse query response: {}", e))
                })?;

                Ok(query_response
                    .matches
                    .into_iter()
                    .map(|m| IndexMatch {
                        id: m.id,
                        score: m.score,
                        metadata: m.metadata.unwrap_or_default(),
                    })
                    .collect())
            }
        })
        .await
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let request = DeleteRequest {
            ids: vec![id.to_string()],
        };
        self.post_json("/vectors/delete", &request).await?;
        // Pinecone deletes are idempotent and do not report existence
        Ok(true)
    }

    fn name(&self) -> &str {
        "pinecone"
    }
}
