use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    create_patient_handler, delete_patient_handler, delete_recording_handler, get_patient_handler,
    health_handler, list_patient_recordings_handler, list_patients_handler, login_doctor_handler,
    patient_summary_handler, signup_doctor_handler, translate_patient_summary_handler,
    translate_recording_handler, update_patient_handler, upload_recording_handler,
};
use crate::presentation::middleware::auth_middleware;
use crate::presentation::state::AppState;

const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let public = Router::new()
        .route("/health", get(health_handler))
        .route("/api/auth/signup-doctor", post(signup_doctor_handler))
        .route("/api/auth/login-doctor", post(login_doctor_handler));

    let protected = Router::new()
        .route("/api/patients/create", post(create_patient_handler))
        .route("/api/patients", get(list_patients_handler))
        .route("/api/patients/{id}", get(get_patient_handler))
        .route("/api/patients/{id}", put(update_patient_handler))
        .route("/api/patients/{id}", delete(delete_patient_handler))
        .route(
            "/api/patients/{id}/summary/translate",
            post(translate_patient_summary_handler),
        )
        .route("/api/recordings/upload", post(upload_recording_handler))
        .route(
            "/api/recordings/patient/{patient_id}",
            get(list_patient_recordings_handler),
        )
        .route(
            "/api/recordings/patient/{patient_id}/summary",
            post(patient_summary_handler),
        )
        .route("/api/recordings/{id}", delete(delete_recording_handler))
        .route(
            "/api/recordings/{id}/translate",
            post(translate_recording_handler),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    public
        .merge(protected)
        .nest_service(
            "/uploads",
            ServeDir::new(&state.settings.storage.local_path),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
