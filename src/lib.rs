//! docqa-rag: Retrieval-augmented document Q&A backend
//!
//! Accepts document uploads (text, PDF, audio), extracts and embeds their content,
//! stores vectors in a similarity index, and answers questions by retrieving
//! relevant context and forwarding it to an LLM completion endpoint. Every query
//! is scored with standard ranking-quality metrics (Recall@K, Precision@K, MAP,
//! MRR, nDCG@K) against the document the caller names as ground truth.

pub mod config;
pub mod error;
pub mod evaluation;
pub mod extraction;
pub mod generation;
pub mod providers;
pub mod server;
pub mod storage;
pub mod types;

pub use config::RagConfig;
pub use error::{Error, Result};
pub use evaluation::{evaluate_ranking, RankingMetrics};
pub use types::{
    query::QueryRequest,
    response::{QueryResponse, TranscribeResponse, UploadResponse},
};
