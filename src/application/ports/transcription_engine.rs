use async_trait::async_trait;

use crate::domain::Language;

#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    /// Transcribe raw audio. `filename` carries the extension used to infer
    /// the encoding for providers that need it.
    async fn transcribe(
        &self,
        audio_data: &[u8],
        filename: &str,
        language: &Language,
    ) -> Result<String, TranscriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("not configured: {0}")]
    NotConfigured(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
