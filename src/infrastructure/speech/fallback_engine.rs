use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::domain::Language;

/// Primary/fallback transcription chain: one provider switch, no retries.
/// With no primary configured every call goes straight to the fallback.
pub struct FallbackTranscriptionEngine {
    primary: Option<Arc<dyn TranscriptionEngine>>,
    fallback: Arc<dyn TranscriptionEngine>,
}

impl FallbackTranscriptionEngine {
    pub fn new(
        primary: Option<Arc<dyn TranscriptionEngine>>,
        fallback: Arc<dyn TranscriptionEngine>,
    ) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl TranscriptionEngine for FallbackTranscriptionEngine {
    async fn transcribe(
        &self,
        audio_data: &[u8],
        filename: &str,
        language: &Language,
    ) -> Result<String, TranscriptionError> {
        if let Some(primary) = &self.primary {
            match primary.transcribe(audio_data, filename, language).await {
                Ok(transcript) => return Ok(transcript),
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        "Primary transcription failed, falling back"
                    );
                }
            }
        }

        self.fallback.transcribe(audio_data, filename, language).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedEngine(&'static str);

    #[async_trait]
    impl TranscriptionEngine for FixedEngine {
        async fn transcribe(
            &self,
            _audio: &[u8],
            _filename: &str,
            _language: &Language,
        ) -> Result<String, TranscriptionError> {
            Ok(self.0.to_string())
        }
    }

    struct FailingEngine;

    #[async_trait]
    impl TranscriptionEngine for FailingEngine {
        async fn transcribe(
            &self,
            _audio: &[u8],
            _filename: &str,
            _language: &Language,
        ) -> Result<String, TranscriptionError> {
            Err(TranscriptionError::ApiRequestFailed("down".to_string()))
        }
    }

    #[tokio::test]
    async fn primary_result_wins_when_it_succeeds() {
        let chain = FallbackTranscriptionEngine::new(
            Some(Arc::new(FixedEngine("primary"))),
            Arc::new(FixedEngine("fallback")),
        );
        let out = chain
            .transcribe(b"audio", "a.mp3", &Language::English)
            .await
            .unwrap();
        assert_eq!(out, "primary");
    }

    #[tokio::test]
    async fn primary_failure_switches_to_fallback() {
        let chain = FallbackTranscriptionEngine::new(
            Some(Arc::new(FailingEngine)),
            Arc::new(FixedEngine("fallback")),
        );
        let out = chain
            .transcribe(b"audio", "a.mp3", &Language::English)
            .await
            .unwrap();
        assert_eq!(out, "fallback");
    }

    #[tokio::test]
    async fn missing_primary_goes_straight_to_fallback() {
        let chain = FallbackTranscriptionEngine::new(None, Arc::new(FixedEngine("fallback")));
        let out = chain
            .transcribe(b"audio", "a.mp3", &Language::English)
            .await
            .unwrap();
        assert_eq!(out, "fallback");
    }
}
