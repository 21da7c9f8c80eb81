use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::application::ports::{Translator, TranslatorError};
use crate::domain::Language;

/// Google Cloud Translation v2 REST client (API-key auth).
pub struct GoogleTranslateClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl GoogleTranslateClient {
    pub fn new(api_key: String, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: "https://translation.googleapis.com".to_string(),
            timeout,
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

#[derive(Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Deserialize)]
struct TranslateData {
    translations: Vec<Translation>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Translation {
    translated_text: String,
}

#[async_trait]
impl Translator for GoogleTranslateClient {
    async fn translate(&self, text: &str, target: &Language) -> Result<String, TranslatorError> {
        let url = format!(
            "{}/language/translate/v2?key={}",
            self.base_url, self.api_key
        );
        let target_code = target.translate_code().ok_or_else(|| {
            TranslatorError::NotConfigured(format!("no ISO 639 code for {}", target.name()))
        })?;

        tracing::debug!(target = %target_code, chars = text.len(), "Calling Google Translate");

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&json!({
                "q": text,
                "target": target_code,
                "format": "text",
            }))
            .send()
            .await
            .map_err(|e| TranslatorError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TranslatorError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let result: TranslateResponse = response
            .json()
            .await
            .map_err(|e| TranslatorError::InvalidResponse(format!("parse response: {}", e)))?;

        let translation = result
            .data
            .translations
            .into_iter()
            .next()
            .ok_or_else(|| TranslatorError::InvalidResponse("no translations returned".to_string()))?;

        tracing::info!(target = %target_code, "Google translation completed");
        Ok(translation.translated_text)
    }
}
