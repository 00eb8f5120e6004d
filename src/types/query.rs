//! Query request types

use serde::{Deserialize, Serialize};

/// Query request against an uploaded document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    /// The question to answer
    pub query: String,

    /// ID of the document the question is about (ground truth for evaluation)
    pub file_id: String,

    /// Number of matches to retrieve (default: config value)
    #[serde(default)]
    pub top_k: Option<usize>,
}

impl QueryRequest {
    /// Create a new query against a document
    pub fn new(query: impl Into<String>, file_id: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            file_id: file_id.into(),
            top_k: None,
        }
    }

    /// Set the number of matches to retrieve
    pub fn with_top_k(mut self, k: usize) -> Self {
        self.top_k = Some(k);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_request() {
        let request: QueryRequest =
            serde_json::from_str(r#"{"query": "what is the balance?", "file_id": "abc"}"#).unwrap();
        assert_eq!(request.query, "what is the balance?");
        assert_eq!(request.file_id, "abc");
        assert!(request.top_k.is_none());
    }
}
