//! Core types for the document Q&A system

pub mod document;
pub mod query;
pub mod response;

pub use document::DocumentRecord;
pub use query::QueryRequest;
pub use response::{MatchSummary, QueryResponse, TranscribeResponse, UploadResponse};
