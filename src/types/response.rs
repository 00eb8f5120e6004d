//! API response types

use serde::{Deserialize, Serialize};

use crate::evaluation::RankingMetrics;
use crate::providers::vector_index::IndexMatch;

/// Response for a successful upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    /// "success"
    pub status: String,
    /// Assigned document ID
    pub id: String,
}

impl UploadResponse {
    /// Successful upload of the given document
    pub fn success(id: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            id: id.into(),
        }
    }
}

/// Summary of one retrieved match, for observability
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSummary {
    /// Document ID
    pub id: String,
    /// Similarity score
    pub score: f32,
    /// Filename from the match metadata, if present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl MatchSummary {
    /// Build a summary from an index match
    pub fn from_match(m: &IndexMatch) -> Self {
        Self {
            id: m.id.clone(),
            score: m.score,
            filename: m.metadata_str("filename").map(|s| s.to_string()),
        }
    }
}

/// Response for a query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Generated answer
    pub answer: String,
    /// Ranking-quality metrics for this retrieval
    pub metrics: RankingMetrics,
    /// Retrieved matches, ordered by descending score
    pub matches: Vec<MatchSummary>,
}

impl QueryResponse {
    /// Build a response from an answer and its retrieval context
    pub fn new(answer: impl Into<String>, metrics: RankingMetrics, matches: Vec<MatchSummary>) -> Self {
        Self {
            answer: answer.into(),
            metrics,
            matches,
        }
    }

    /// Response when the requested document cannot be found anywhere
    pub fn not_found(metrics: RankingMetrics) -> Self {
        Self {
            answer: "Sorry, the document could not be found in the system.".to_string(),
            metrics,
            matches: Vec::new(),
        }
    }
}

/// Response for a transcription request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscribeResponse {
    /// Recognized text (may be empty)
    pub transcription: String,
    /// Set when transcription produced no text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TranscribeResponse {
    /// Successful transcription
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            transcription: text.into(),
            error: None,
        }
    }

    /// Transcription produced no recognizable speech
    pub fn empty() -> Self {
        Self {
            transcription: String::new(),
            error: Some("Could not transcribe audio".to_string()),
        }
    }
}
