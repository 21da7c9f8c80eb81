use std::sync::Arc;

use crate::application::ports::{
    AudioStore, DoctorRepository, PatientRepository, RecordingRepository,
};
use crate::application::services::{
    PatientHistoryService, RecordingPipeline, TranslationService,
};
use crate::presentation::config::Settings;

#[derive(Clone)]
pub struct AppState {
    pub doctors: Arc<dyn DoctorRepository>,
    pub patients: Arc<dyn PatientRepository>,
    pub recordings: Arc<dyn RecordingRepository>,
    pub audio_store: Arc<dyn AudioStore>,
    pub pipeline: Arc<RecordingPipeline>,
    pub translation: Arc<TranslationService>,
    pub history: Arc<PatientHistoryService>,
    pub settings: Settings,
}
