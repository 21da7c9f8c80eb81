use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use uuid::Uuid;

use crate::domain::DoctorId;
use crate::infrastructure::auth::decode_token;
use crate::presentation::state::AppState;

/// Authenticated doctor extracted from the bearer token, inserted into
/// request extensions for handlers to pick up.
#[derive(Debug, Clone)]
pub struct AuthDoctor {
    pub id: DoctorId,
    pub email: String,
}

pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    let token = match token {
        Some(t) => t,
        None => return unauthorized("No token provided"),
    };

    let claims = match decode_token(token, &state.settings.auth.jwt_secret) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!(error = %e, "Token rejected");
            return unauthorized("Invalid or expired token");
        }
    };

    let doctor_id = match claims.sub.parse::<Uuid>() {
        Ok(uuid) => DoctorId::from_uuid(uuid),
        Err(_) => return unauthorized("Invalid or expired token"),
    };

    request.extensions_mut().insert(AuthDoctor {
        id: doctor_id,
        email: claims.email,
    });

    next.run(request).await
}

fn unauthorized(message: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "error": message }))).into_response()
}
