use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DoctorId(Uuid);

impl DoctorId {
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

impl Default for DoctorId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Doctor {
    pub id: DoctorId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub specialization: Option<String>,
    pub qualification: Option<String>,
    pub college: Option<String>,
    pub experience_years: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl Doctor {
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        Self {
            id: DoctorId::new(),
            name,
            email,
            password_hash,
            specialization: None,
            qualification: None,
            college: None,
            experience_years: None,
            created_at: Utc::now(),
        }
    }
}
