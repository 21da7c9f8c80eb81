use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::services::PatientHistoryError;
use crate::domain::{Language, PatientId};
use crate::presentation::handlers::models::ErrorResponse;
use crate::presentation::middleware::AuthDoctor;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct TranslateSummaryRequest {
    pub language: String,
    #[serde(default)]
    pub force: bool,
}

#[derive(Serialize)]
pub struct TranslatedSummaryResponse {
    pub concise: String,
    pub detailed: String,
}

/// Aggregate AI summary over all of a patient's consultations.
#[tracing::instrument(skip(state), fields(doctor_id = %doctor.id.as_uuid()))]
pub async fn patient_summary_handler(
    State(state): State<AppState>,
    Extension(doctor): Extension<AuthDoctor>,
    Path(patient_id): Path<String>,
) -> Response {
    let patient_id = match parse_patient_id(&patient_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.history.summarize_history(patient_id).await {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(PatientHistoryError::NoRecordings) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("No recordings found for this patient")),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to generate patient summary");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Error generating patient summary")),
            )
                .into_response()
        }
    }
}

/// Same aggregate summary, then both fields run through the translation chain.
#[tracing::instrument(skip(state, request), fields(doctor_id = %doctor.id.as_uuid()))]
pub async fn translate_patient_summary_handler(
    State(state): State<AppState>,
    Extension(doctor): Extension<AuthDoctor>,
    Path(patient_id): Path<String>,
    Json(request): Json<TranslateSummaryRequest>,
) -> Response {
    let patient_id = match parse_patient_id(&patient_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let summary = match state.history.summarize_history(patient_id).await {
        Ok(summary) => summary,
        Err(PatientHistoryError::NoRecordings) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("No recordings found for this patient")),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to generate patient summary");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Error generating patient summary")),
            )
                .into_response();
        }
    };

    let target = Language::parse(&request.language);

    let concise = state
        .translation
        .translate(&summary.concise, &target, request.force)
        .await;
    let detailed = state
        .translation
        .translate(&summary.detailed, &target, request.force)
        .await;

    match (concise, detailed) {
        (Ok(concise), Ok(detailed)) => (
            StatusCode::OK,
            Json(TranslatedSummaryResponse { concise, detailed }),
        )
            .into_response(),
        (Err(e), _) | (_, Err(e)) => {
            tracing::error!(error = %e, "Failed to translate patient summary");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Error translating summary")),
            )
                .into_response()
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
