use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Language, RecordingId};
use crate::presentation::handlers::models::ErrorResponse;
use crate::presentation::middleware::AuthDoctor;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct TranslateRequest {
    pub language: String,
    #[serde(default)]
    pub force: bool,
}

#[derive(Serialize)]
pub struct TranslateResponse {
    pub translation: String,
}

#[tracing::instrument(skip(state, request), fields(doctor_id = %doctor.id.as_uuid()))]
pub async fn translate_recording_handler(
    State(state): State<AppState>,
    Extension(doctor): Extension<AuthDoctor>,
    Path(id): Path<String>,
    Json(request): Json<TranslateRequest>,
) -> Response {
    let recording_id = match id.parse::<Uuid>() {
        Ok(uuid) => RecordingId::from_uuid(uuid),
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("Invalid recording id")),
            )
                .into_response();
        }
    };

    let transcript = match state.recordings.get_by_id(recording_id).await {
        Ok(Some(recording)) => recording.transcript,
        Ok(None) => None,
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch recording");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Error translating recording")),
            )
                .into_response();
        }
    };

    let transcript = match transcript {
        Some(transcript) => transcript,
        None => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new("Recording or transcript not found")),
            )
                .into_response();
        }
    };

    let target = Language::parse(&request.language);

    match state
        .translation
        .translate(&transcript, &target, request.force)
        .await
    {
        Ok(translation) => (StatusCode::OK, Json(TranslateResponse { translation })).into_response(),
        Err(e) => {
            tracing::error!(error = %e, target = target.name(), "Translation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Error translating recording")),
            )
                .into_response()
        }
    }
}
