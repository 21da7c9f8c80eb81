use std::sync::Arc;

use tracing::Instrument;

use crate::application::ports::{
    AudioStore, LlmClient, RecordingRepository, TranscriptionEngine,
};
use crate::domain::{ConsultationSummary, Language, Recording};

/// Background processor for uploaded recordings.
///
/// State machine: PENDING -> transcribe -> summarize -> COMPLETED; any error
/// at either step marks the row FAILED. Each upload spawns its own unawaited
/// task: no queue, no retry, no backpressure, no cancellation once started.
pub struct RecordingPipeline {
    recordings: Arc<dyn RecordingRepository>,
    audio_store: Arc<dyn AudioStore>,
    transcription_engine: Arc<dyn TranscriptionEngine>,
    llm_client: Arc<dyn LlmClient>,
}

impl RecordingPipeline {
    pub fn new(
        recordings: Arc<dyn RecordingRepository>,
        audio_store: Arc<dyn AudioStore>,
        transcription_engine: Arc<dyn TranscriptionEngine>,
        llm_client: Arc<dyn LlmClient>,
    ) -> Self {
        Self {
            recordings,
            audio_store,
            transcription_engine,
            llm_client,
        }
    }

    /// Fire-and-forget processing of a freshly uploaded recording.
    pub fn spawn(self: &Arc<Self>, recording: Recording) {
        let pipeline = Arc::clone(self);
        let span = tracing::info_span!(
            "recording_job",
            recording_id = %recording.id.as_uuid(),
            patient_id = %recording.patient_id.as_uuid(),
        );
        tokio::spawn(
            async move {
                if let Err(e) = pipeline.process(&recording).await {
                    tracing::error!(error = %e, "Recording processing failed");
                    if let Err(repo_err) = pipeline.recordings.mark_failed(recording.id).await {
                        tracing::error!(
                            error = %repo_err,
                            "Failed to mark recording as FAILED"
                        );
                    }
                }
            }
            .instrument(span),
        );
    }

    pub async fn process(&self, recording: &Recording) -> Result<(), PipelineError> {
        tracing::info!("Starting recording processing");

        let audio = self
            .audio_store
            .fetch(&recording.audio_url)
            .await
            .map_err(PipelineError::Audio)?;

        let language = Language::parse(&recording.language);
        let transcript = self
            .transcription_engine
            .transcribe(&audio, &recording.audio_url, &language)
            .await
            .map_err(PipelineError::Transcription)?;

        // Persisted before summarization so a later summary failure still
        // leaves the transcript behind.
        self.recordings
            .set_transcript(recording.id, &transcript)
            .await
            .map_err(PipelineError::Repository)?;

        let summary = self.summarize(&transcript).await?;

        self.recordings
            .complete_with_summary(recording.id, &summary)
            .await
            .map_err(PipelineError::Repository)?;

        tracing::info!("Recording processing completed");
        Ok(())
    }

    /// One LLM call expecting structured JSON. A malformed reply never fails
    /// the job: it degrades into a fallback summary carrying the raw text.
    pub async fn summarize(&self, transcript: &str) -> Result<ConsultationSummary, PipelineError> {
        let prompt = summary_prompt(transcript);
        let reply = self
            .llm_client
            .generate(&prompt)
            .await
            .map_err(PipelineError::Llm)?;
        Ok(ConsultationSummary::from_model_reply(&reply))
    }
}

fn summary_prompt(transcript: &str) -> String {
    format!(
        "You are a medical AI assistant. Analyze the following medical consultation \
transcript and provide a structured summary in JSON format.\n\n\
The JSON should have these exact fields:\n\
- chiefComplaint: Main reason for visit (string)\n\
- history: Relevant medical history (string)\n\
- diagnosis: Clinical assessment (string)\n\
- medication: Prescribed medications with dosage (string)\n\
- followUp: Follow-up instructions (string)\n\n\
Consultation Transcript:\n{}\n\n\
Respond ONLY with valid JSON, no additional text.",
        transcript
    )
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("audio store: {0}")]
    Audio(crate::application::ports::AudioStoreError),
    #[error("transcription: {0}")]
    Transcription(crate::application::ports::TranscriptionError),
    #[error("llm: {0}")]
    Llm(crate::application::ports::LlmClientError),
    #[error("repository: {0}")]
    Repository(crate::application::ports::RepositoryError),
}
