use async_trait::async_trait;

use crate::application::ports::{LlmClient, LlmClientError};

/// Canned-reply client for tests.
pub struct MockLlmClient {
    reply: String,
}

impl MockLlmClient {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn generate(&self, _prompt: &str) -> Result<String, LlmClientError> {
        Ok(self.reply.clone())
    }
}
