mod patient_history;
mod recording_pipeline;
mod translation_service;

pub use patient_history::{PatientHistoryError, PatientHistoryService};
pub use recording_pipeline::{PipelineError, RecordingPipeline};
pub use translation_service::TranslationService;
