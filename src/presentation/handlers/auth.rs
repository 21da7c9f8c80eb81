use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::application::ports::RepositoryError;
use crate::domain::Doctor;
use crate::infrastructure::auth::{hash_password, issue_token, verify_password};
use crate::presentation::handlers::models::{DoctorProfile, ErrorResponse};
use crate::presentation::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub specialization: Option<String>,
    pub qualification: Option<String>,
    pub college: Option<String>,
    pub experience_years: Option<i32>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub doctor: DoctorProfile,
}

#[tracing::instrument(skip(state, request), fields(email = %request.email))]
pub async fn signup_doctor_handler(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> impl IntoResponse {
    if request.name.trim().is_empty()
        || request.email.trim().is_empty()
        || request.password.is_empty()
    {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Name, email and password are required")),
        )
            .into_response();
    }

    let email = request.email.trim().to_lowercase();

    match state.doctors.find_by_email(&email).await {
        Ok(Some(_)) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("Email already in use")),
            )
                .into_response();
        }
        Ok(None) => {}
        Err(e) => {
            tracing::error!(error = %e, "Failed to check for existing doctor");
            return internal_error();
        }
    }

    let password_hash = match hash_password(&request.password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!(error = %e, "Password hashing failed");
            return internal_error();
        }
    };

    let mut doctor = Doctor::new(request.name.trim().to_string(), email, password_hash);
    doctor.specialization = request.specialization;
    doctor.qualification = request.qualification;
    doctor.college = request.college;
    doctor.experience_years = request.experience_years;

    match state.doctors.create(&doctor).await {
        Ok(()) => {}
        Err(RepositoryError::Conflict(_)) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("Email already in use")),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to create doctor");
            return internal_error();
        }
    }

    let token = match issue_token(
        doctor.id,
        &doctor.email,
        &state.settings.auth.jwt_secret,
        state.settings.auth.token_ttl_days,
    ) {
        Ok(token) => token,
        Err(e) => {
            tracing::error!(error = %e, "Failed to issue token");
            return internal_error();
        }
    };

    tracing::info!(doctor_id = %doctor.id.as_uuid(), "Doctor registered");

    (
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            doctor: DoctorProfile::from(&doctor),
        }),
    )
        .into_response()
}

#[tracing::instrument(skip(state, request), fields(email = %request.email))]
pub async fn login_doctor_handler(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> impl IntoResponse {
    let email = request.email.trim().to_lowercase();

    let doctor = match state.doctors.find_by_email(&email).await {
        Ok(Some(doctor)) => doctor,
        Ok(None) => return invalid_credentials(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to look up doctor");
            return internal_error();
        }
    };

    if !verify_password(&request.password, &doctor.password_hash) {
        return invalid_credentials();
    }

    let token = match issue_token(
        doctor.id,
        &doctor.email,
        &state.settings.auth.jwt_secret,
        state.settings.auth.token_ttl_days,
    ) {
        Ok(token) => token,
        Err(e) => {
            tracing::error!(error = %e, "Failed to issue token");
            return internal_error();
        }
    };

    (
        StatusCode::OK,
        Json(AuthResponse {
            token,
            doctor: DoctorProfile::from(&doctor),
        }),
    )
        .into_response()
}

fn invalid_credentials() -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::new("Invalid credentials")),
    )
        .into_response()
}

fn internal_error() -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new("Internal server error")),
    )
        .into_response()
}
