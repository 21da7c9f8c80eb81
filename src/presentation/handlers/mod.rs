mod auth;
mod health;
mod models;
mod patients;
mod recordings;
mod summary;
mod translate;

pub use auth::{login_doctor_handler, signup_doctor_handler};
pub use health::health_handler;
pub use patients::{
    create_patient_handler, delete_patient_handler, get_patient_handler, list_patients_handler,
    update_patient_handler,
};
pub use recordings::{
    delete_recording_handler, list_patient_recordings_handler, upload_recording_handler,
};
pub use summary::{patient_summary_handler, translate_patient_summary_handler};
pub use translate::translate_recording_handler;
