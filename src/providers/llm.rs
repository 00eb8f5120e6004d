//! LLM provider trait for generating answers

use async_trait::async_trait;

use crate::error::Result;

/// Trait for LLM-based answer generation
///
/// Implementations:
/// - `OpenAiClient`: OpenAI chat completions (gpt-3.5-turbo)
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Generate a completion for the given prompt
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Get the model being used
    fn model(&self) -> &str;

    /// Get provider name for logging
    fn name(&self) -> &str;
}
