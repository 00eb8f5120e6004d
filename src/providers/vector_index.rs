//! Vector index provider trait for storing and searching embeddings

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::Result;

/// One match returned by a similarity query, ordered by descending score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexMatch {
    /// Document ID the vector was stored under
    pub id: String,
    /// Similarity score (higher is more similar)
    pub score: f32,
    /// Metadata attached at upsert time (filename, text, ...)
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl IndexMatch {
    /// Metadata field as a string, if present
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(|v| v.as_str())
    }
}

/// Trait for vector storage and similarity search
///
/// Implementations:
/// - `PineconeIndex`: Pinecone data-plane API
/// - `InMemoryVectorIndex`: brute-force cosine index for local runs and tests
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Insert or replace a vector under the given document ID
    async fn upsert(
        &self,
        id: &str,
        vector: &[f32],
        metadata: HashMap<String, serde_json::Value>,
    ) -> Result<()>;

    /// Query the index for the `top_k` most similar vectors
    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<IndexMatch>>;

    /// Delete a vector by document ID; returns true if it existed
    async fn delete(&self, id: &str) -> Result<bool>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}
