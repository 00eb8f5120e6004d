//! Azure Cognitive Services speech-to-text client

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::config::AzureSpeechConfig;
use crate::error::{Error, Result};

use super::transcriber::Transcriber;

/// Azure speech-to-text REST client
///
/// Uses the short-audio recognition endpoint, which accepts a single utterance
/// per request (the same recognize-once behavior as the Speech SDK).
pub struct AzureTranscriber {
    /// HTTP client
    client: Client,
    /// Configuration
    config: AzureSpeechConfig,
}

#[derive(Deserialize)]
struct RecognitionResponse {
    #[serde(rename = "RecognitionStatus")]
    status: String,
    #[serde(rename = "DisplayText", default)]
    display_text: Option<String>,
}

impl AzureTranscriber {
    /// Create a new Azure transcriber
    pub fn new(config: &AzureSpeechConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(Error::Config(
                "Azure speech key is not set (AZURE_COGNITIVE_KEY)".to_string(),
            ));
        }
        if config.endpoint.is_empty() {
            return Err(Error::Config(
                "Azure speech endpoint is not set (AZURE_COGNITIVE_ENDPOINT)".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Content type for the audio payload, based on the uploaded filename
    fn content_type(filename: &str) -> String {
        mime_guess::from_path(filename)
            .first_raw()
            .unwrap_or("audio/wav")
            .to_string()
    }
}

#[async_trait]
impl Transcriber for AzureTranscriber {
    async fn transcribe(&self, audio: &[u8], filename: &str) -> Result<String> {
        let url = format!("{}?language={}", self.config.endpoint, self.config.language);

        tracing::info!("Transcribing {} ({} bytes)", filename, audio.len());

        let response = self
            .client
            .post(&url)
            .header("Ocp-Apim-Subscription-Key", &self.config.api_key)
            .header("Content-Type", Self::content_type(filename))
            .header("Accept", "application/json")
            .body(audio.to_vec())
            .send()
            .await
            .map_err(|e| Error::Transcription(format!("Recognition request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Transcription(format!(
                "Recognition failed: HTTP {} - {}",
                status, body
            )));
        }

        let recognition: RecognitionResponse = response.json().await.map_err(|e| {
            Error::Transcription(format!("Failed to parse recognition response: {}", e))
        })?;

        // Anything other than a successful recognition yields empty text
        if recognition.status == "Success" {
            Ok(recognition.display_text.unwrap_or_default())
        } else {
            tracing::warn!("Recognition returned status {}", recognition.status);
            Ok(String::new())
        }
    }

    fn name(&self) -> &str {
        "azure-speech"
    }
}
