use std::sync::Arc;

use crate::application::ports::{
    AudioStore, LlmClient, RecordingRepository, TranscriptionEngine,
};
use crate::domain::{Language, PatientId, PatientHistorySummary, Recording};

/// Aggregate summary over a patient's consultation timeline. Recordings
/// still missing a transcript are transcribed best-effort first; failures
/// are logged and skipped so one broken recording never blocks the summary.
pub struct PatientHistoryService {
    recordings: Arc<dyn RecordingRepository>,
    audio_store: Arc<dyn AudioStore>,
    transcription_engine: Arc<dyn TranscriptionEngine>,
    llm_client: Arc<dyn LlmClient>,
}

impl PatientHistoryService {
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

    #[tracing::instrument(skip(self), fields(patient_id = %patient_id.as_uuid()))]
    pub async fn summarize_history(
        &self,
        patient_id: PatientId,
    ) -> Result<PatientHistorySummary, PatientHistoryError> {
        let mut recordings = self
            .recordings
            .list_by_patient(patient_id)
            .await
            .map_err(PatientHistoryError::Repository)?;

        if recordings.is_empty() {
            return Err(PatientHistoryError::NoRecordings);
        }

        // Timeline order for the prompt.
        recordings.sort_by_key(|r| r.created_at);

        tracing::debug!(count = recordings.len(), "Building patient history");

        for recording in &mut recordings {
            if recording.transcript.is_none() {
                self.backfill_transcript(recording).await;
            }
        }

        let prompt = history_prompt(&recordings);
        let reply = self
            .llm_client
            .generate(&prompt)
            .await
            .map_err(PatientHistoryError::Llm)?;

        Ok(PatientHistorySummary::from_model_reply(&reply))
    }

    async fn backfill_transcript(&self, recording: &mut Recording) {
        tracing::debug!(
            recording_id = %recording.id.as_uuid(),
            "Transcribing recording without transcript"
        );

        let audio = match self.audio_store.fetch(&recording.audio_url).await {
            Ok(audio) => audio,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    recording_id = %recording.id.as_uuid(),
                    "Could not fetch audio for backfill"
                );
                return;
            }
        };

        let language = Language::parse(&recording.language);
        match self
            .transcription_engine
            .transcribe(&audio, &recording.audio_url, &language)
            .await
        {
            Ok(transcript) => {
                if let Err(e) = self
                    .recordings
                    .set_transcript(recording.id, &transcript)
                    .await
                {
                    tracing::warn!(
                        error = %e,
                        recording_id = %recording.id.as_uuid(),
                        "Could not persist backfilled transcript"
                    );
                }
                recording.transcript = Some(transcript);
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    recording_id = %recording.id.as_uuid(),
                    "Backfill transcription failed"
                );
            }
        }
    }
}

fn history_prompt(recordings: &[Recording]) -> String {
    let consultations: Vec<String> = recordings
        .iter()
        .enumerate()
        .map(|(index, recording)| {
            let date = recording.created_at.format("%Y-%m-%d");
            let content = match (&recording.summary, &recording.transcript) {
                (Some(summary), _) => {
                    serde_json::to_string(summary).unwrap_or_else(|_| "{}".to_string())
                }
                (None, Some(transcript)) => transcript.clone(),
                (None, None) => "No transcript available".to_string(),
            };
            format!("Consultation {} ({}):\n{}\n", index + 1, date, content)
        })
        .collect();

    format!(
        "You are a medical AI assistant. Analyze the following history of patient \
consultations and provide a comprehensive summary.\n\n\
Your response MUST be in valid JSON format with exactly these two fields:\n\
1. \"concise\": A short paragraph (max 50 words) summarizing the patient's overall \
trajectory, key recurring issues, and current status.\n\
2. \"detailed\": A structured markdown string that details the timeline of symptoms, \
treatments tried, and their outcomes.\n\n\
Patient History:\n{}\n\n\
Respond ONLY with valid JSON.",
        consultations.join("\n---\n\n")
    )
}

#[derive(Debug, thiserror::Error)]
pub enum PatientHistoryError {
    #[error("no recordings found for this patient")]
    NoRecordings,
    #[error("llm: {0}")]
    Llm(crate::application::ports::LlmClientError),
    #[error("repository: {0}")]
    Repository(crate::application::ports::RepositoryError),
}
