use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{ConsultationSummary, DoctorId, PatientId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordingId(Uuid);

impl RecordingId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for RecordingId {
    fn default() -> Self {
        Self::new()
    }
}

/// Lifecycle of a consultation recording. `Completed` requires both a
/// transcript and a summary; `Failed` is terminal and only superseded by a
/// fresh upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordingStatus {
    Pending,
    Completed,
    Failed,
}

impl RecordingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordingStatus::Pending => "PENDING",
            RecordingStatus::Completed => "COMPLETED",
            RecordingStatus::Failed => "FAILED",
        }
    }
}

impl FromStr for RecordingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(RecordingStatus::Pending),
            "COMPLETED" => Ok(RecordingStatus::Completed),
            "FAILED" => Ok(RecordingStatus::Failed),
            _ => Err(format!("Invalid recording status: {}", s)),
        }
    }
}

impl fmt::Display for RecordingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recording {
    pub id: RecordingId,
    pub patient_id: PatientId,
    pub doctor_id: DoctorId,
    pub audio_url: String,
    pub language: String,
    pub transcript: Option<String>,
    pub summary: Option<ConsultationSummary>,
    pub status: RecordingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Recording {
    pub fn new(
        patient_id: PatientId,
        doctor_id: DoctorId,
        audio_url: String,
        language: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: RecordingId::new(),
            patient_id,
            doctor_id,
            audio_url,
            language,
            transcript: None,
            summary: None,
            status: RecordingStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_str() {
        for status in [
            RecordingStatus::Pending,
            RecordingStatus::Completed,
            RecordingStatus::Failed,
        ] {
            assert_eq!(status.as_str().parse::<RecordingStatus>(), Ok(status));
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!("RUNNING".parse::<RecordingStatus>().is_err());
    }

    #[test]
    fn new_recording_starts_pending_without_transcript() {
        let recording = Recording::new(
            PatientId::new(),
            DoctorId::new(),
            "/uploads/abc.m4a".to_string(),
            "English".to_string(),
        );
        assert_eq!(recording.status, RecordingStatus::Pending);
        assert!(recording.transcript.is_none());
        assert!(recording.summary.is_none());
    }
}
