use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::application::ports::{
    DoctorRepository, PatientRepository, RecordingRepository, RepositoryError,
};
use crate::domain::{
    ConsultationSummary, Doctor, DoctorId, Patient, PatientId, Recording, RecordingId,
    RecordingStatus,
};

/// In-memory repositories backing the test suites. Semantics match the
/// Postgres implementations (newest-first listings, conflict on duplicate
/// email, not-found on missing updates).
#[derive(Default)]
pub struct MockDoctorRepository {
    doctors: Mutex<HashMap<Uuid, Doctor>>,
}

#[async_trait]
impl DoctorRepository for MockDoctorRepository {
    async fn create(&self, doctor: &Doctor) -> Result<(), RepositoryError> {
        let mut doctors = self.doctors.lock().await;
        if doctors.values().any(|d| d.email == doctor.email) {
            return Err(RepositoryError::Conflict(format!(
                "email already registered: {}",
                doctor.email
            )));
        }
        doctors.insert(doctor.id.as_uuid(), doctor.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: DoctorId) -> Result<Option<Doctor>, RepositoryError> {
        Ok(self.doctors.lock().await.get(&id.as_uuid()).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Doctor>, RepositoryError> {
        Ok(self
            .doctors
            .lock()
            .await
            .values()
            .find(|d| d.email == email)
            .cloned())
    }
}

#[derive(Default)]
pub struct MockPatientRepository {
    patients: Mutex<HashMap<Uuid, Patient>>,
}

#[async_trait]
impl PatientRepository for MockPatientRepository {
    async fn create(&self, patient: &Patient) -> Result<(), RepositoryError> {
        self.patients
            .lock()
            .await
            .insert(patient.id.as_uuid(), patient.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: PatientId) -> Result<Option<Patient>, RepositoryError> {
        Ok(self.patients.lock().await.get(&id.as_uuid()).cloned())
    }

    async fn list_by_doctor(&self, doctor_id: DoctorId) -> Result<Vec<Patient>, RepositoryError> {
        let mut patients: Vec<Patient> = self
            .patients
            .lock()
            .await
            .values()
            .filter(|p| p.doctor_id == doctor_id)
            .cloned()
            .collect();
        patients.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(patients)
    }

    async fn update(&self, patient: &Patient) -> Result<(), RepositoryError> {
        let mut patients = self.patients.lock().await;
        if !patients.contains_key(&patient.id.as_uuid()) {
            return Err(RepositoryError::NotFound(format!(
                "patient {}",
                patient.id.as_uuid()
            )));
        }
        patients.insert(patient.id.as_uuid(), patient.clone());
        Ok(())
    }

    async fn delete(&self, id: PatientId) -> Result<(), RepositoryError> {
        self.patients.lock().await.remove(&id.as_uuid());
        Ok(())
    }
}

#[derive(Default)]
pub struct MockRecordingRepository {
    recordings: Mutex<HashMap<Uuid, Recording>>,
}

#[async_trait]
impl RecordingRepository for MockRecordingRepository {
    async fn create(&self, recording: &Recording) -> Result<(), RepositoryError> {
        self.recordings
            .lock()
            .await
            .insert(recording.id.as_uuid(), recording.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: RecordingId) -> Result<Option<Recording>, RepositoryError> {
        Ok(self.recordings.lock().await.get(&id.as_uuid()).cloned())
    }

    async fn list_by_patient(
        &self,
        patient_id: PatientId,
    ) -> Result<Vec<Recording>, RepositoryError> {
        let mut recordings: Vec<Recording> = self
            .recordings
            .lock()
            .await
            .values()
            .filter(|r| r.patient_id == patient_id)
            .cloned()
            .collect();
        recordings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(recordings)
    }

    async fn set_transcript(
        &self,
        id: RecordingId,
        transcript: &str,
    ) -> Result<(), RepositoryError> {
        let mut recordings = self.recordings.lock().await;
        let recording = recordings
            .get_mut(&id.as_uuid())
            .ok_or_else(|| RepositoryError::NotFound(format!("recording {}", id.as_uuid())))?;
        recording.transcript = Some(transcript.to_string());
        recording.updated_at = chrono::Utc::now();
        Ok(())
    }

    async fn complete_with_summary(
        &self,
        id: RecordingId,
        summary: &ConsultationSummary,
    ) -> Result<(), RepositoryError> {
        let mut recordings = self.recordings.lock().await;
        let recording = recordings
            .get_mut(&id.as_uuid())
            .ok_or_else(|| RepositoryError::NotFound(format!("recording {}", id.as_uuid())))?;
        recording.summary = Some(summary.clone());
        recording.status = RecordingStatus::Completed;
        recording.updated_at = chrono::Utc::now();
        Ok(())
    }

    async fn mark_failed(&self, id: RecordingId) -> Result<(), RepositoryError> {
        let mut recordings = self.recordings.lock().await;
        let recording = recordings
            .get_mut(&id.as_uuid())
            .ok_or_else(|| RepositoryError::NotFound(format!("recording {}", id.as_uuid())))?;
        recording.status = RecordingStatus::Failed;
        recording.updated_at = chrono::Utc::now();
        Ok(())
    }

    async fn delete(&self, id: RecordingId) -> Result<(), RepositoryError> {
        self.recordings.lock().await.remove(&id.as_uuid());
        Ok(())
    }

    async fn delete_by_patient(&self, patient_id: PatientId) -> Result<(), RepositoryError> {
        self.recordings
            .lock()
            .await
            .retain(|_, r| r.patient_id != patient_id);
        Ok(())
    }
}
