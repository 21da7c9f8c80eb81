use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ports::{LlmClient, LlmClientError};

/// Non-streaming client for an Ollama-compatible `/api/generate` endpoint.
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl OllamaClient {
    pub fn new(base_url: String, model: String, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            timeout,
        }
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

#[async_trait]
impl LlmClient for OllamaClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmClientError> {
        let url = format!("{}/api/generate", self.base_url);

        tracing::debug!(model = %self.model, prompt_chars = prompt.len(), "Sending prompt to LLM");

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&GenerateRequest {
                model: &self.model,
                prompt,
                stream: false,
            })
            .send()
            .await
            .map_err(|e| LlmClientError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(LlmClientError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let result: GenerateResponse = response
            .json()
            .await
            .map_err(|e| LlmClientError::InvalidResponse(format!("parse response: {}", e)))?;

        tracing::debug!(chars = result.response.len(), "LLM generation completed");
        Ok(result.response)
    }
}
