//! Document upload and ingestion endpoint

use axum::{extract::Multipart, extract::State, Json};
use serde_json::json;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::extraction;
use crate::server::state::AppState;
use crate::types::response::UploadResponse;

/// POST /api/upload - Upload a document and index its content
///
/// Stores the original file, extracts its text, persists the text to the
/// document database, embeds it, and upserts the vector with filename and text
/// metadata.
pub async fn upload_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let (filename, data) = read_file_field(&mut multipart).await?;

    let doc_id = Uuid::new_v4().to_string();
    tracing::info!("Upload: {} ({} bytes) -> {}", filename, data.len(), doc_id);

    // Keep the original file alongside the indexed text
    let stored_path = state
        .config()
        .storage
        .upload_dir
        .join(format!("{}_{}", doc_id, filename));
    tokio::fs::write(&stored_path, &data).await?;

    let text = extraction::extract_text(&filename, &data)?;

    state.documents().save(&doc_id, &filename, &text)?;

    let embedding = state.embedder().embed(&text).await?;

    let metadata = std::collections::HashMap::from([
        ("filename".to_string(), json!(filename)),
        ("text".to_string(), json!(text)),
    ]);
    state
        .vector_index()
        .upsert(&doc_id, &embedding, metadata)
        .await?;

    tracing::info!("Upload complete: {} indexed as {}", filename, doc_id);

    Ok(Json(UploadResponse::success(doc_id)))
}

/// Pull the "file" field out of a multipart request
pub(crate) async fn read_file_field(multipart: &mut Multipart) -> Result<(String, Vec<u8>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::Upload(format!("Invalid multipart request: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .map(|s| s.to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::Upload("Uploaded file has no filename".to_string()))?;

        let data = field
            .bytes()
            .await
            .map_err(|e| Error::Upload(format!("Failed to read upload: {}", e)))?;

        return Ok((filename, data.to_vec()));
    }

    Err(Error::Upload("No file provided".to_string()))
}
