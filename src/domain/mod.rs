mod doctor;
mod language;
mod patient;
mod recording;
mod storage_path;
mod summary;

pub use doctor::{Doctor, DoctorId};
pub use language::Language;
pub use patient::{Patient, PatientId};
pub use recording::{Recording, RecordingId, RecordingStatus};
pub use storage_path::StoragePath;
pub use summary::{strip_code_fences, ConsultationSummary, PatientHistorySummary};
