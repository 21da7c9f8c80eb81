mod audio_store;
mod doctor_repository;
mod llm_client;
mod patient_repository;
mod recording_repository;
mod repository_error;
mod transcription_engine;
mod translator;

pub use audio_store::{AudioStore, AudioStoreError};
pub use doctor_repository::DoctorRepository;
pub use llm_client::{LlmClient, LlmClientError};
pub use patient_repository::PatientRepository;
pub use recording_repository::RecordingRepository;
pub use repository_error::RepositoryError;
pub use transcription_engine::{TranscriptionEngine, TranscriptionError};
pub use translator::{Translator, TranslatorError};
