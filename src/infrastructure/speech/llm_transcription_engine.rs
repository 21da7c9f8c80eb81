use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{LlmClient, TranscriptionEngine, TranscriptionError};
use crate::domain::Language;

/// Stand-in transcription used when no real speech-to-text is available:
/// asks the LLM to fabricate a plausible consultation transcript. This is
/// an explicit, documented compromise so the rest of the pipeline can be
/// exercised end to end without STT credentials. The audio bytes are never
/// inspected.
pub struct LlmTranscriptionEngine {
    llm_client: Arc<dyn LlmClient>,
}

impl LlmTranscriptionEngine {
    pub fn new(llm_client: Arc<dyn LlmClient>) -> Self {
        Self { llm_client }
    }
}

const FABRICATION_PROMPT: &str = "Generate a detailed, realistic medical consultation \
transcript between a doctor and a patient.\n\n\
Requirements:\n\
- Language: English ONLY.\n\
- Length: At least 150 words.\n\
- Content: Include patient complaints, doctor's questions, physical exam findings, and a plan.\n\
- Scenario: Pick a random common medical issue (e.g., flu, migraine, back pain, \
hypertension checkup, etc.).\n\
- Format: purely the dialogue and clinical notes, no introductory text like \
\"Here is a transcript\".\n\n\
Respond ONLY with the transcript text.";

#[async_trait]
impl TranscriptionEngine for LlmTranscriptionEngine {
    async fn transcribe(
        &self,
        _audio_data: &[u8],
        _filename: &str,
        _language: &Language,
    ) -> Result<String, TranscriptionError> {
        tracing::warn!("Speech-to-text unavailable, fabricating transcript via LLM");

        let reply = self
            .llm_client
            .generate(FABRICATION_PROMPT)
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(e.to_string()))?;

        Ok(reply.trim().to_string())
    }
}
