use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use bytes::Bytes;
use uuid::Uuid;

use crate::domain::{PatientId, Recording, RecordingId, StoragePath};
use crate::presentation::handlers::models::{ErrorResponse, MessageResponse, RecordingResponse};
use crate::presentation::middleware::AuthDoctor;
use crate::presentation::state::AppState;

/// Accepts the multipart upload, stores the audio, creates a PENDING row and
/// responds immediately. Transcription and summarization run in a detached
/// background task.
#[tracing::instrument(skip(state, multipart), fields(doctor_id = %doctor.id.as_uuid()))]
pub async fn upload_recording_handler(
    State(state): State<AppState>,
    Extension(doctor): Extension<AuthDoctor>,
    mut multipart: Multipart,
) -> Response {
    let mut audio: Option<(String, Bytes)> = None;
    let mut patient_id: Option<String> = None;
    let mut language: Option<String> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read multipart field");
                return bad_request(&format!("Failed to read multipart: {}", e));
            }
        };

        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("audio") => {
                let filename = field.file_name().unwrap_or("recording").to_string();
                match field.bytes().await {
                    Ok(data) => audio = Some((filename, data)),
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to read audio bytes");
                        return bad_request("Failed to read audio file");
                    }
                }
            }
            Some("patientId") => match field.text().await {
                Ok(text) => patient_id = Some(text),
                Err(_) => return bad_request("Invalid patientId field"),
            },
            Some("language") => match field.text().await {
                Ok(text) => language = Some(text),
                Err(_) => return bad_request("Invalid language field"),
            },
            _ => {}
        }
    }

    let (filename, data) = match audio {
        Some(audio) => audio,
        None => return bad_request("No audio file uploaded"),
    };

    let patient_id = match patient_id.as_deref().map(str::parse::<Uuid>) {
        Some(Ok(uuid)) => PatientId::from_uuid(uuid),
        Some(Err(_)) => return bad_request("Invalid patient id"),
        None => return bad_request("Patient ID is required"),
    };

    match state.patients.get_by_id(patient_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new("Patient not found")),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch patient");
            return internal_error("Error uploading recording");
        }
    }

    let language = language.unwrap_or_else(|| "en-US".to_string());

    tracing::debug!(
        filename = %filename,
        bytes = data.len(),
        language = %language,
        "Audio upload received"
    );

    let path = StoragePath::for_upload(&filename);
    let audio_url = match state.audio_store.store(&path, data).await {
        Ok(url) => url,
        Err(e) => {
            tracing::error!(error = %e, "Failed to store audio");
            return internal_error("Error uploading recording");
        }
    };

    let recording = Recording::new(patient_id, doctor.id, audio_url, language);

    if let Err(e) = state.recordings.create(&recording).await {
        tracing::error!(error = %e, "Failed to create recording row");
        return internal_error("Error uploading recording");
    }

    state.pipeline.spawn(recording.clone());

    (StatusCode::CREATED, Json(RecordingResponse::from(&recording))).into_response()
}

#[tracing::instrument(skip(state), fields(doctor_id = %doctor.id.as_uuid()))]
pub async fn list_patient_recordings_handler(
    State(state): State<AppState>,
    Extension(doctor): Extension<AuthDoctor>,
    Path(patient_id): Path<String>,
) -> Response {
    let patient_id = match patient_id.parse::<Uuid>() {
        Ok(uuid) => PatientId::from_uuid(uuid),
        Err(_) => return bad_request("Invalid patient id"),
    };

    match state.recordings.list_by_patient(patient_id).await {
        Ok(recordings) => {
            let response: Vec<RecordingResponse> =
                recordings.iter().map(RecordingResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to list recordings");
            internal_error("Error fetching recordings")
        }
    }
}

#[tracing::instrument(skip(state), fields(doctor_id = %doctor.id.as_uuid()))]
pub async fn delete_recording_handler(
    State(state): State<AppState>,
    Extension(doctor): Extension<AuthDoctor>,
    Path(id): Path<String>,
) -> Response {
    let recording_id = match id.parse::<Uuid>() {
        Ok(uuid) => RecordingId::from_uuid(uuid),
        Err(_) => return bad_request("Invalid recording id"),
    };

    let recording = match state.recordings.get_by_id(recording_id).await {
        Ok(Some(recording)) => recording,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new("Recording not found")),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch recording");
            return internal_error("Error deleting recording");
        }
    };

    if recording.doctor_id != doctor.id {
        return (
            StatusCode::FORBIDDEN,
            Json(ErrorResponse::new("Unauthorized")),
        )
            .into_response();
    }

    // Best effort: the row goes away even if the object does not.
    if let Err(e) = state.audio_store.delete(&recording.audio_url).await {
        tracing::warn!(error = %e, audio_url = %recording.audio_url, "Failed to delete audio object");
    }

    match state.recordings.delete(recording_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Recording deleted successfully".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to delete recording");
            internal_error("Error deleting recording")
        }
    }
}

fn bad_request(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::new(message)),
    )
        .into_response()
}

fn internal_error(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(message)),
    )
        .into_response()
}
