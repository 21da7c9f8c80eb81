use async_trait::async_trait;

use crate::domain::{ConsultationSummary, PatientId, Recording, RecordingId};

use super::RepositoryError;

/// Persistence for recordings. Status transitions are encoded as dedicated
/// operations so a row can only reach COMPLETED together with its summary.
#[async_trait]
pub trait RecordingRepository: Send + Sync {
    async fn create(&self, recording: &Recording) -> Result<(), RepositoryError>;

    async fn get_by_id(&self, id: RecordingId) -> Result<Option<Recording>, RepositoryError>;

    /// Recordings for a patient, newest first.
    async fn list_by_patient(
        &self,
        patient_id: PatientId,
    ) -> Result<Vec<Recording>, RepositoryError>;

    async fn set_transcript(
        &self,
        id: RecordingId,
        transcript: &str,
    ) -> Result<(), RepositoryError>;

    /// Store the summary and move the row to COMPLETED in one step.
    async fn complete_with_summary(
        &self,
        id: RecordingId,
        summary: &ConsultationSummary,
    ) -> Result<(), RepositoryError>;

    async fn mark_failed(&self, id: RecordingId) -> Result<(), RepositoryError>;

    async fn delete(&self, id: RecordingId) -> Result<(), RepositoryError>;

    async fn delete_by_patient(&self, patient_id: PatientId) -> Result<(), RepositoryError>;
}
