use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{ConsultationSummary, Doctor, Patient, Recording};

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Doctor without the password hash.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub specialization: Option<String>,
    pub qualification: Option<String>,
    pub college: Option<String>,
    pub experience_years: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<&Doctor> for DoctorProfile {
    fn from(doctor: &Doctor) -> Self {
        Self {
            id: doctor.id.as_uuid(),
            name: doctor.name.clone(),
            email: doctor.email.clone(),
            specialization: doctor.specialization.clone(),
            qualification: doctor.qualification.clone(),
            college: doctor.college.clone(),
            experience_years: doctor.experience_years,
            created_at: doctor.created_at,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientResponse {
    pub id: Uuid,
    pub name: String,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub notes: Option<String>,
    pub doctor_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<&Patient> for PatientResponse {
    fn from(patient: &Patient) -> Self {
        Self {
            id: patient.id.as_uuid(),
            name: patient.name.clone(),
            age: patient.age,
            gender: patient.gender.clone(),
            notes: patient.notes.clone(),
            doctor_id: patient.doctor_id.as_uuid(),
            created_at: patient.created_at,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordingResponse {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub audio_url: String,
    pub language: String,
    pub transcript: Option<String>,
    pub summary: Option<ConsultationSummary>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Recording> for RecordingResponse {
    fn from(recording: &Recording) -> Self {
        Self {
            id: recording.id.as_uuid(),
            patient_id: recording.patient_id.as_uuid(),
            doctor_id: recording.doctor_id.as_uuid(),
            audio_url: recording.audio_url.clone(),
            language: recording.language.clone(),
            transcript: recording.transcript.clone(),
            summary: recording.summary.clone(),
            status: recording.status.as_str().to_string(),
            created_at: recording.created_at,
            updated_at: recording.updated_at,
        }
    }
}
