//! In-process vector index for local runs and deterministic tests

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

use crate::error::{Error, Result};

use super::vector_index::{IndexMatch, VectorIndex};

/// Brute-force cosine-similarity index held in memory
///
/// Suitable for small corpora and for exercising the query pipeline without a
/// Pinecone index. Upserting an existing ID replaces its vector and metadata.
pub struct InMemoryVectorIndex {
    entries: RwLock<HashMap<String, StoredVector>>,
}

struct StoredVector {
    vector: Vec<f32>,
    metadata: HashMap<String, serde_json::Value>,
}

impl InMemoryVectorIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored vectors
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
        let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
        let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }
        dot / (norm_a * norm_b)
    }
}

impl Default for InMemoryVectorIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VectorIndex for InMemoryVectorIndex {
    async fn upsert(
        &self,
        id: &str,
        vector: &[f32],
        metadata: HashMap<String, serde_json::Value>,
    ) -> Result<()> {
        if vector.is_empty() {
            return Err(Error::VectorIndex("Cannot upsert an empty vector".to_string()));
        }

        self.entries.write().insert(
            id.to_string(),
            StoredVector {
                vector: vector.to_vec(),
                metadata,
            },
        );
        Ok(())
    }

    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<IndexMatch>> {
        let entries = self.entries.read();

        let mut matches: Vec<IndexMatch> = entries
            .iter()
            .map(|(id, stored)| IndexMatch {
                id: id.clone(),
                score: Self::cosine_similarity(vector, &stored.vector),
                metadata: stored.metadata.clone(),
            })
            .collect();

        matches.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        matches.truncate(top_k);

        Ok(matches)
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        Ok(self.entries.write().remove(id).is_some())
    }

    fn name(&self) -> &str {
        "in-memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(filename: &str) -> HashMap<String, serde_json::Value> {
        HashMap::from([(
            "filename".to_string(),
            serde_json::Value::String(filename.to_string()),
        )])
    }

    #[tokio::test]
    async fn test_query_orders_by_similarity() {
        let index = InMemoryVectorIndex::new();
        index.upsert("a", &[1.0, 0.0], meta("a.txt")).await.unwrap();
        index.upsert("b", &[0.0, 1.0], meta("b.txt")).await.unwrap();
        index.upsert("c", &[0.7, 0.7], meta("c.txt")).await.unwrap();

        let matches = index.query(&[1.0, 0.0], 2).await.unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].id, "a");
        assert_eq!(matches[1].id, "c");
        assert!(matches[0].score > matches[1].score);
    }

    #[tokio::test]
    async fn test_upsert_replaces_existing() {
        let index = InMemoryVectorIndex::new();
        index.upsert("a", &[1.0, 0.0], meta("old.txt")).await.unwrap();
        index.upsert("a", &[0.0, 1.0], meta("new.txt")).await.unwrap();
        assert_eq!(index.len(), 1);

        let matches = index.query(&[0.0, 1.0], 1).await.unwrap();
        assert_eq!(matches[0].metadata_str("filename"), Some("new.txt"));
    }

    #[tokio::test]
    async fn test_delete() {
        let index = InMemoryVectorIndex::new();
        index.upsert("a", &[1.0], HashMap::new()).await.unwrap();
        assert!(index.delete("a").await.unwrap());
        assert!(!index.delete("a").await.unwrap());
        assert!(index.is_empty());
    }

    #[tokio::test]
    async fn test_empty_vector_rejected() {
        let index = InMemoryVectorIndex::new();
        assert!(index.upsert("a", &[], HashMap::new()).await.is_err());
    }
}
