use async_trait::async_trait;

use crate::domain::Language;

#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, target: &Language) -> Result<String, TranslatorError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranslatorError {
    #[error("not configured: {0}")]
    NotConfigured(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
