use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;
use serde_json::json;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::domain::Language;

/// Google Cloud Speech-to-Text over the synchronous `speech:recognize` REST
/// endpoint. Audio is sent inline as base64; the encoding is inferred from
/// the file extension (the API rejects formats it cannot detect, which
/// triggers the caller's fallback chain).
pub struct GoogleSpeechEngine {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl GoogleSpeechEngine {
    pub fn new(api_key: String, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: "https://speech.googleapis.com".to_string(),
            timeout,
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

fn encoding_for(filename: &str) -> &'static str {
    match filename.rsplit_once('.').map(|(_, ext)| ext) {
        Some("mp3") => "MP3",
        Some("wav") => "LINEAR16",
        Some("flac") => "FLAC",
        Some("ogg") | Some("opus") => "OGG_OPUS",
        _ => "ENCODING_UNSPECIFIED",
    }
}

#[derive(Deserialize)]
struct RecognizeResponse {
    results: Option<Vec<RecognizeResult>>,
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct RecognizeResult {
    alternatives: Vec<RecognizeAlternative>,
}

#[derive(Deserialize)]
struct RecognizeAlternative {
    transcript: String,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

#[async_trait]
impl TranscriptionEngine for GoogleSpeechEngine {
    async fn transcribe(
        &self,
        audio_data: &[u8],
        filename: &str,
        language: &Language,
    ) -> Result<String, TranscriptionError> {
        let url = format!("{}/v1/speech:recognize?key={}", self.base_url, self.api_key);
        let encoding = encoding_for(filename);

        tracing::debug!(
            encoding,
            language = language.speech_code(),
            bytes = audio_data.len(),
            "Sending audio to Google Speech-to-Text"
        );

        let body = json!({
            "config": {
                "encoding": encoding,
                "languageCode": language.speech_code(),
                "enableAutomaticPunctuation": true,
                "model": "default",
            },
            "audio": {
                "content": BASE64.encode(audio_data),
            },
        });

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TranscriptionError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let result: RecognizeResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::InvalidResponse(format!("parse response: {}", e)))?;

        if let Some(error) = result.error {
            return Err(TranscriptionError::ApiRequestFailed(error.message));
        }

        let transcript = result
            .results
            .unwrap_or_default()
            .iter()
            .filter_map(|r| r.alternatives.first())
            .map(|a| a.transcript.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        if transcript.is_empty() {
            return Err(TranscriptionError::InvalidResponse(
                "no transcription results returned".to_string(),
            ));
        }

        tracing::info!(chars = transcript.len(), "Google STT transcription completed");
        Ok(transcript)
    }
}
