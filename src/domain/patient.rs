use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::DoctorId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PatientId(Uuid);

impl PatientId {
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

impl Default for PatientId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Patient {
    pub id: PatientId,
    pub name: String,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub notes: Option<String>,
    pub doctor_id: DoctorId,
    pub created_at: DateTime<Utc>,
}

impl Patient {
    pub fn new(name: String, doctor_id: DoctorId) -> Self {
        Self {
            id: PatientId::new(),
            name,
            age: None,
            gender: None,
            notes: None,
            doctor_id,
            created_at: Utc::now(),
        }
    }
}
