mod mock_repositories;
mod pg_doctor_repository;
mod pg_patient_repository;
mod pg_pool;
mod pg_recording_repository;

pub use mock_repositories::{
    MockDoctorRepository, MockPatientRepository, MockRecordingRepository,
};
pub use pg_doctor_repository::PgDoctorRepository;
pub use pg_patient_repository::PgPatientRepository;
pub use pg_pool::create_pool;
pub use pg_recording_repository::PgRecordingRepository;
