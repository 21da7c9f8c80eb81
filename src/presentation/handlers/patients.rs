use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Patient, PatientId};
use crate::presentation::handlers::models::{
    ErrorResponse, MessageResponse, PatientResponse, RecordingResponse,
};
use crate::presentation::middleware::AuthDoctor;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct CreatePatientRequest {
    pub name: String,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdatePatientRequest {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub notes: Option<String>,
}

#[derive(Serialize)]
pub struct PatientWithRecordings {
    #[serde(flatten)]
    pub patient: PatientResponse,
    pub recordings: Vec<RecordingResponse>,
}

#[tracing::instrument(skip(state, request), fields(doctor_id = %doctor.id.as_uuid()))]
pub async fn create_patient_handler(
    State(state): State<AppState>,
    Extension(doctor): Extension<AuthDoctor>,
    Json(request): Json<CreatePatientRequest>,
) -> Response {
    if request.name.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Patient name is required")),
        )
            .into_response();
    }

    let mut patient = Patient::new(request.name.trim().to_string(), doctor.id);
    patient.age = request.age;
    patient.gender = request.gender;
    patient.notes = request.notes;

    match state.patients.create(&patient).await {
        Ok(()) => (StatusCode::CREATED, Json(PatientResponse::from(&patient))).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to create patient");
            internal_error("Error creating patient")
        }
    }
}

#[tracing::instrument(skip(state), fields(doctor_id = %doctor.id.as_uuid()))]
pub async fn list_patients_handler(
    State(state): State<AppState>,
    Extension(doctor): Extension<AuthDoctor>,
) -> Response {
    match state.patients.list_by_doctor(doctor.id).await {
        Ok(patients) => {
            let response: Vec<PatientResponse> =
                patients.iter().map(PatientResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to list patients");
            internal_error("Error fetching patients")
        }
    }
}

#[tracing::instrument(skip(state), fields(doctor_id = %doctor.id.as_uuid()))]
pub async fn get_patient_handler(
    State(state): State<AppState>,
    Extension(doctor): Extension<AuthDoctor>,
    Path(id): Path<String>,
) -> Response {
    let patient_id = match parse_patient_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let patient = match state.patients.get_by_id(patient_id).await {
        Ok(Some(patient)) if patient.doctor_id == doctor.id => patient,
        Ok(_) => return patient_not_found(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch patient");
            return internal_error("Error fetching patient");
        }
    };

    let recordings = match state.recordings.list_by_patient(patient_id).await {
        Ok(recordings) => recordings,
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch patient recordings");
            return internal_error("Error fetching patient");
        }
    };

    (
        StatusCode::OK,
        Json(PatientWithRecordings {
            patient: PatientResponse::from(&patient),
            recordings: recordings.iter().map(RecordingResponse::from).collect(),
        }),
    )
        .into_response()
}

#[tracing::instrument(skip(state, request), fields(doctor_id = %doctor.id.as_uuid()))]
pub async fn update_patient_handler(
    State(state): State<AppState>,
    Extension(doctor): Extension<AuthDoctor>,
    Path(id): Path<String>,
    Json(request): Json<UpdatePatientRequest>,
) -> Response {
    let patient_id = match parse_patient_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let mut patient = match state.patients.get_by_id(patient_id).await {
        Ok(Some(patient)) => patient,
        Ok(None) => return patient_not_found(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch patient");
            return internal_error("Error updating patient");
        }
    };

    if patient.doctor_id != doctor.id {
        return unauthorized();
    }

    if let Some(name) = request.name {
        if name.trim().is_empty() {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("Patient name is required")),
            )
                .into_response();
        }
        patient.name = name.trim().to_string();
    }
    if let Some(age) = request.age {
        patient.age = Some(age);
    }
    if let Some(gender) = request.gender {
        patient.gender = Some(gender);
    }
    if let Some(notes) = request.notes {
        patient.notes = Some(notes);
    }

    match state.patients.update(&patient).await {
        Ok(()) => (StatusCode::OK, Json(PatientResponse::from(&patient))).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to update patient");
            internal_error("Error updating patient")
        }
    }
}

#[tracing::instrument(skip(state), fields(doctor_id = %doctor.id.as_uuid()))]
pub async fn delete_patient_handler(
    State(state): State<AppState>,
    Extension(doctor): Extension<AuthDoctor>,
    Path(id): Path<String>,
) -> Response {
    let patient_id = match parse_patient_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let patient = match state.patients.get_by_id(patient_id).await {
        Ok(Some(patient)) => patient,
        Ok(None) => return patient_not_found(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch patient");
            return internal_error("Error deleting patient");
        }
    };

    if patient.doctor_id != doctor.id {
        return unauthorized();
    }

    // Recordings first so no orphan rows survive a partial failure.
    if let Err(e) = state.recordings.delete_by_patient(patient_id).await {
        tracing::error!(error = %e, "Failed to delete patient recordings");
        return internal_error("Error deleting patient");
    }

    match state.patients.delete(patient_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Patient deleted successfully".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to delete patient");
            internal_error("Error deleting patient")
        }
    }
}

fn parse_patient_id(raw: &str) -> Result<PatientId, Response> {
    raw.parse::<Uuid>().map(PatientId::from_uuid).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Invalid patient id")),
        )
            .into_response()
    })
}

fn patient_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("Patient not found")),
    )
        .into_response()
}

fn unauthorized() -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(ErrorResponse::new("Unauthorized")),
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
