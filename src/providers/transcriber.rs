//! Speech transcription provider trait

use async_trait::async_trait;

use crate::error::Result;

/// Trait for speech-to-text transcription
///
/// Implementations:
/// - `AzureTranscriber`: Azure Cognitive Services speech-to-text REST API
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe audio data to text
    ///
    /// Returns an empty string when the service recognized no speech; that is
    /// not an error.
    async fn transcribe(&self, audio: &[u8], filename: &str) -> Result<String>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}
