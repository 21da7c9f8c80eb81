use async_trait::async_trait;

use crate::domain::{Doctor, DoctorId};

use super::RepositoryError;

#[async_trait]
pub trait DoctorRepository: Send + Sync {
    async fn create(&self, doctor: &Doctor) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: DoctorId) -> Result<Option<Doctor>, RepositoryError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Doctor>, RepositoryError>;
}
