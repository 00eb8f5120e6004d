//! Stored document types

use serde::{Deserialize, Serialize};

/// A document row as persisted in the SQLite store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Document ID (UUID, assigned at upload)
    pub id: String,
    /// Original filename
    pub filename: String,
    /// Extracted plain text
    pub content: String,
    /// Ingestion timestamp (RFC 3339)
    pub ingested_at: String,
}
