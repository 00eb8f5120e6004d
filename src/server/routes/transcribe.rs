//! Audio transcription endpoint

use axum::{extract::Multipart, extract::State, Json};

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::response::TranscribeResponse;

use super::upload::read_file_field;

/// POST /api/transcribe - Transcribe an uploaded audio recording
///
/// An upload that the speech service cannot recognize is not an error: the
/// response carries an empty transcription with an explanatory note.
pub async fn transcribe_audio(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<TranscribeResponse>> {
    let (filename, data) = read_file_field(&mut multipart)
        .await
        .map_err(|_| Error::Upload("No audio file provided".to_string()))?;

    if data.is_empty() {
        return Err(Error::Upload("Empty audio file".to_string()));
    }

    tracing::info!("Transcribe: {} ({} bytes)", filename, data.len());

    let text = state.transcriber().transcribe(&data, &filename).await?;

    if text.is_empty() {
        tracing::warn!("Transcription returned empty text for {}", filename);
        return Ok(Json(TranscribeResponse::empty()));
    }

    Ok(Json(TranscribeResponse::ok(text)))
}
