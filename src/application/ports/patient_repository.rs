use async_trait::async_trait;

use crate::domain::{DoctorId, Patient, PatientId};

use super::RepositoryError;

#[async_trait]
pub trait PatientRepository: Send + Sync {
    async fn create(&self, patient: &Patient) -> Result<(), RepositoryError>;

    async fn get_by_id(&self, id: PatientId) -> Result<Option<Patient>, RepositoryError>;

    /// Patients owned by a doctor, newest first.
    async fn list_by_doctor(&self, doctor_id: DoctorId) -> Result<Vec<Patient>, RepositoryError>;

    async fn update(&self, patient: &Patient) -> Result<(), RepositoryError>;

    async fn delete(&self, id: PatientId) -> Result<(), RepositoryError>;
}
