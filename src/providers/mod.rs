//! Provider abstractions for embeddings, vector search, completions, and transcription
//!
//! Trait-based seams so the query pipeline can run against live services
//! (OpenAI, Pinecone, Azure Speech) or deterministic in-process implementations.

pub mod azure_speech;
pub mod embedding;
pub mod llm;
pub mod memory;
pub mod openai;
pub mod pinecone;
pub mod transcriber;
pub mod vector_index;

pub use embedding::Embedder;
pub use llm::CompletionProvider;
pub use transcriber::Transcriber;
pub use vector_index::{IndexMatch, VectorIndex};
