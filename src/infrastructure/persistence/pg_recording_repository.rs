use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use crate::application::ports::{RecordingRepository, RepositoryError};
use crate::domain::{
    ConsultationSummary, DoctorId, PatientId, Recording, RecordingId, RecordingStatus,
};

pub struct PgRecordingRepository {
    pool: PgPool,
}

impl PgRecordingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_recording(row: &PgRow) -> Result<Recording, RepositoryError> {
    let read = |e: sqlx::Error| RepositoryError::QueryFailed(e.to_string());

    let status: String = row.try_get("status").map_err(read)?;
    let status = status
        .parse::<RecordingStatus>()
        .map_err(RepositoryError::QueryFailed)?;

    let summary: Option<serde_json::Value> = row.try_get("summary").map_err(read)?;
    let summary = summary
        .map(serde_json::from_value::<ConsultationSummary>)
        .transpose()
        .map_err(|e| RepositoryError::QueryFailed(format!("summary column: {}", e)))?;

    Ok(Recording {
        id: RecordingId::from_uuid(row.try_get::<Uuid, _>("id").map_err(read)?),
        patient_id: PatientId::from_uuid(row.try_get::<Uuid, _>("patient_id").map_err(read)?),
        doctor_id: DoctorId::from_uuid(row.try_get::<Uuid, _>("doctor_id").map_err(read)?),
        audio_url: row.try_get("audio_url").map_err(read)?,
        language: row.try_get("language").map_err(read)?,
        transcript: row.try_get("transcript").map_err(read)?,
        summary,
        status,
        created_at: row.try_get("created_at").map_err(read)?,
        updated_at: row.try_get("updated_at").map_err(read)?,
    })
}

const RECORDING_COLUMNS: &str = "id, patient_id, doctor_id, audio_url, language, transcript, \
                                 summary, status, created_at, updated_at";

#[async_trait]
impl RecordingRepository for PgRecordingRepository {
    #[instrument(skip(self, recording), fields(recording_id = %recording.id.as_uuid()))]
    async fn create(&self, recording: &Recording) -> Result<(), RepositoryError> {
        let summary = recording
            .summary
            .as_ref()
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO recordings
                (id, patient_id, doctor_id, audio_url, language, transcript,
                 summary, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(recording.id.as_uuid())
        .bind(recording.patient_id.as_uuid())
        .bind(recording.doctor_id.as_uuid())
        .bind(&recording.audio_url)
        .bind(&recording.language)
        .bind(&recording.transcript)
        .bind(summary)
        .bind(recording.status.as_str())
        .bind(recording.created_at)
        .bind(recording.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    #[instrument(skip(self), fields(recording_id = %id.as_uuid()))]
    async fn get_by_id(&self, id: RecordingId) -> Result<Option<Recording>, RepositoryError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM recordings WHERE id = $1",
            RECORDING_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        row.as_ref().map(map_recording).transpose()
    }

    #[instrument(skip(self), fields(patient_id = %patient_id.as_uuid()))]
    async fn list_by_patient(
        &self,
        patient_id: PatientId,
    ) -> Result<Vec<Recording>, RepositoryError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM recordings WHERE patient_id = $1 ORDER BY created_at DESC",
            RECORDING_COLUMNS
        ))
        .bind(patient_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        rows.iter().map(map_recording).collect()
    }

    #[instrument(skip(self, transcript), fields(recording_id = %id.as_uuid()))]
    async fn set_transcript(
        &self,
        id: RecordingId,
        transcript: &str,
    ) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE recordings SET transcript = $1, updated_at = $2 WHERE id = $3")
            .bind(transcript)
            .bind(Utc::now())
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    #[instrument(skip(self, summary), fields(recording_id = %id.as_uuid()))]
    async fn complete_with_summary(
        &self,
        id: RecordingId,
        summary: &ConsultationSummary,
    ) -> Result<(), RepositoryError> {
        let summary =
            serde_json::to_value(summary).map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        sqlx::query(
            "UPDATE recordings SET summary = $1, status = $2, updated_at = $3 WHERE id = $4",
        )
        .bind(summary)
        .bind(RecordingStatus::Completed.as_str())
        .bind(Utc::now())
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    #[instrument(skip(self), fields(recording_id = %id.as_uuid()))]
    async fn mark_failed(&self, id: RecordingId) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE recordings SET status = $1, updated_at = $2 WHERE id = $3")
            .bind(RecordingStatus::Failed.as_str())
            .bind(Utc::now())
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    #[instrument(skip(self), fields(recording_id = %id.as_uuid()))]
    async fn delete(&self, id: RecordingId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM recordings WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    #[instrument(skip(self), fields(patient_id = %patient_id.as_uuid()))]
    async fn delete_by_patient(&self, patient_id: PatientId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM recordings WHERE patient_id = $1")
            .bind(patient_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(())
    }
}
