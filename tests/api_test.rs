use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use bytes::Bytes;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tower::ServiceExt;

use mediassist::application::ports::{
    AudioStore, AudioStoreError, RecordingRepository, TranscriptionEngine, TranscriptionError,
    Translator, TranslatorError,
};
use mediassist::application::services::{
    PatientHistoryService, RecordingPipeline, TranslationService,
};
use mediassist::domain::{Language, Recording, StoragePath};
use mediassist::infrastructure::llm::MockLlmClient;
use mediassist::infrastructure::persistence::{
    MockDoctorRepository, MockPatientRepository, MockRecordingRepository,
};
use mediassist::presentation::config::{
    AuthSettings, DatabaseSettings, GoogleSettings, LlmSettings, ServerSettings, Settings,
    StorageSettings,
};
use mediassist::presentation::{create_router, AppState};

const TRANSCRIPT: &str = "Patient reports a persistent dry cough for two weeks.";

const SUMMARY_REPLY: &str = r#"{
    "chiefComplaint": "Persistent dry cough",
    "history": "Two weeks of symptoms, no fever",
    "diagnosis": "Suspected post-viral cough",
    "medication": "Dextromethorphan 20mg as needed",
    "followUp": "Return if symptoms persist beyond one month"
}"#;

#[derive(Default)]
struct MemoryAudioStore {
    objects: Mutex<HashMap<String, Bytes>>,
}

#[async_trait]
impl AudioStore for MemoryAudioStore {
    async fn store(&self, path: &StoragePath, data: Bytes) -> Result<String, AudioStoreError> {
        let url = format!("/uploads/{}", path.as_str());
        self.objects.lock().await.insert(url.clone(), data);
        Ok(url)
    }

    async fn fetch(&self, audio_url: &str) -> Result<Vec<u8>, AudioStoreError> {
        self.objects
            .lock()
            .await
            .get(audio_url)
            .map(|data| data.to_vec())
            .ok_or_else(|| AudioStoreError::NotFound(audio_url.to_string()))
    }

    async fn delete(&self, audio_url: &str) -> Result<(), AudioStoreError> {
        self.objects.lock().await.remove(audio_url);
        Ok(())
    }
}

struct StubTranscriptionEngine;

#[async_trait]
impl TranscriptionEngine for StubTranscriptionEngine {
    async fn transcribe(
        &self,
        _audio_data: &[u8],
        _filename: &str,
        _language: &Language,
    ) -> Result<String, TranscriptionError> {
        Ok(TRANSCRIPT.to_string())
    }
}

struct EchoTranslator;

#[async_trait]
impl Translator for EchoTranslator {
    async fn translate(&self, text: &str, target: &Language) -> Result<String, TranslatorError> {
        Ok(format!("[{}] {}", target.name(), text))
    }
}

fn test_settings() -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseSettings {
            url: "postgres://unused".to_string(),
            max_connections: 1,
        },
        storage: StorageSettings {
            local_path: "uploads".to_string(),
            s3: None,
        },
        google: GoogleSettings { api_key: None },
        llm: LlmSettings {
            base_url: "http://localhost:11434".to_string(),
            model: "llama3:latest".to_string(),
            timeout: Duration::from_secs(5),
        },
        auth: AuthSettings {
            jwt_secret: "test-secret".to_string(),
            token_ttl_days: 7,
        },
    }
}

fn test_state() -> AppState {
    let doctors = Arc::new(MockDoctorRepository::default());
    let patients = Arc::new(MockPatientRepository::default());
    let recordings = Arc::new(MockRecordingRepository::default());
    let audio_store = Arc::new(MemoryAudioStore::default());
    let llm_client = Arc::new(MockLlmClient::new(SUMMARY_REPLY));
    let transcription_engine = Arc::new(StubTranscriptionEngine);

    let pipeline = Arc::new(RecordingPipeline::new(
        recordings.clone(),
        audio_store.clone(),
        transcription_engine.clone(),
        llm_client.clone(),
    ));
    let history = Arc::new(PatientHistoryService::new(
        recordings.clone(),
        audio_store.clone(),
        transcription_engine,
        llm_client,
    ));
    let translation = Arc::new(TranslationService::new(None, Arc::new(EchoTranslator)));

    AppState {
        doctors,
        patients,
        recordings,
        audio_store,
        pipeline,
        translation,
        history,
        settings: test_settings(),
    }
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn signup(router: &Router, email: &str) -> String {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/signup-doctor")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({
                        "name": "Dr. Asha Rao",
                        "email": email,
                        "password": "hunter2!",
                        "specialization": "General Medicine"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    body["token"].as_str().unwrap().to_string()
}

async fn create_patient(router: &Router, token: &str, name: &str) -> String {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/patients/create")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::from(json!({ "name": name, "age": 42 }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    body["id"].as_str().unwrap().to_string()
}

fn multipart_upload(boundary: &str, patient_id: &str, language: &str) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"audio\"; filename=\"consult.mp3\"\r\n\
             Content-Type: audio/mpeg\r\n\r\n",
            b = boundary
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"fake mp3 bytes");
    body.extend_from_slice(
        format!(
            "\r\n--{b}\r\nContent-Disposition: form-data; name=\"patientId\"\r\n\r\n{pid}\r\n\
             --{b}\r\nContent-Disposition: form-data; name=\"language\"\r\n\r\n{lang}\r\n--{b}--\r\n",
            b = boundary,
            pid = patient_id,
            lang = language
        )
        .as_bytes(),
    );
    body
}

async fn upload_recording(router: &Router, token: &str, patient_id: &str) -> Value {
    let boundary = "----mediassist-test-boundary";
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/recordings/upload")
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={}", boundary),
                )
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::from(multipart_upload(boundary, patient_id, "en-US")))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

async fn list_recordings(router: &Router, token: &str, patient_id: &str) -> Value {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/recordings/patient/{}", patient_id))
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

#[tokio::test]
async fn given_running_server_when_health_checked_then_healthy() {
    let router = create_router(test_state());

    let response = router
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn given_new_doctor_when_signing_up_and_logging_in_then_tokens_issued() {
    let router = create_router(test_state());

    let token = signup(&router, "asha@clinic.test").await;
    assert!(!token.is_empty());

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login-doctor")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "email": "asha@clinic.test", "password": "hunter2!" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["token"].as_str().is_some());
    assert_eq!(body["doctor"]["email"], "asha@clinic.test");
}

#[tokio::test]
async fn given_registered_email_when_signing_up_again_then_rejected() {
    let router = create_router(test_state());

    signup(&router, "asha@clinic.test").await;

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/signup-doctor")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({
                        "name": "Another Doctor",
                        "email": "asha@clinic.test",
                        "password": "different"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Email already in use");
}

#[tokio::test]
async fn given_wrong_password_when_logging_in_then_invalid_credentials() {
    let router = create_router(test_state());

    signup(&router, "asha@clinic.test").await;

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login-doctor")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "email": "asha@clinic.test", "password": "wrong" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid credentials");
}

#[tokio::test]
async fn given_no_token_when_listing_patients_then_unauthorized() {
    let router = create_router(test_state());

    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/patients")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn given_created_patients_when_listing_then_all_returned() {
    let router = create_router(test_state());
    let token = signup(&router, "asha@clinic.test").await;

    create_patient(&router, &token, "Ravi Kumar").await;
    create_patient(&router, &token, "Meera Shah").await;

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/patients")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn given_another_doctors_patient_when_fetching_then_not_found() {
    let router = create_router(test_state());
    let owner_token = signup(&router, "owner@clinic.test").await;
    let other_token = signup(&router, "other@clinic.test").await;

    let patient_id = create_patient(&router, &owner_token, "Ravi Kumar").await;

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/patients/{}", patient_id))
                .header(header::AUTHORIZATION, format!("Bearer {}", other_token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn given_uploaded_audio_when_polling_then_pending_becomes_completed() {
    let router = create_router(test_state());
    let token = signup(&router, "asha@clinic.test").await;
    let patient_id = create_patient(&router, &token, "Ravi Kumar").await;

    let uploaded = upload_recording(&router, &token, &patient_id).await;
    assert_eq!(uploaded["status"], "PENDING");
    assert!(uploaded["audioUrl"].as_str().unwrap().starts_with("/uploads/"));

    let mut status = "PENDING".to_string();
    for _ in 0..100 {
        tokio::time::sleep(Duration::from_millis(10)).await;
        let recordings = list_recordings(&router, &token, &patient_id).await;
        status = recordings[0]["status"].as_str().unwrap().to_string();
        if status != "PENDING" {
            break;
        }
    }

    assert_eq!(status, "COMPLETED");

    let recordings = list_recordings(&router, &token, &patient_id).await;
    assert_eq!(recordings[0]["transcript"], TRANSCRIPT);
    assert_eq!(
        recordings[0]["summary"]["chiefComplaint"],
        "Persistent dry cough"
    );
}

#[tokio::test]
async fn given_patient_with_recordings_when_deleted_then_recordings_removed() {
    let router = create_router(test_state());
    let token = signup(&router, "asha@clinic.test").await;
    let patient_id = create_patient(&router, &token, "Ravi Kumar").await;

    upload_recording(&router, &token, &patient_id).await;

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/patients/{}", patient_id))
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Patient deleted successfully");

    let recordings = list_recordings(&router, &token, &patient_id).await;
    assert_eq!(recordings.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn given_english_target_when_translating_then_transcript_unchanged() {
    let router = create_router(test_state());
    let token = signup(&router, "asha@clinic.test").await;
    let patient_id = create_patient(&router, &token, "Ravi Kumar").await;

    let uploaded = upload_recording(&router, &token, &patient_id).await;
    let recording_id = uploaded["id"].as_str().unwrap().to_string();

    // Let the background job finish so the transcript is stored.
    let mut recordings = list_recordings(&router, &token, &patient_id).await;
    for _ in 0..100 {
        if recordings[0]["status"] != "PENDING" {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
        recordings = list_recordings(&router, &token, &patient_id).await;
    }

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/recordings/{}/translate", recording_id))
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::from(json!({ "language": "English" }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["translation"], TRANSCRIPT);
}

#[tokio::test]
async fn given_missing_transcript_when_translating_then_not_found() {
    let state = test_state();
    let router = create_router(state.clone());
    let token = signup(&router, "asha@clinic.test").await;
    let patient_id = create_patient(&router, &token, "Ravi Kumar").await;

    // Row exists but the transcript is still null.
    let recording = Recording::new(
        mediassist::domain::PatientId::from_uuid(patient_id.parse().unwrap()),
        mediassist::domain::DoctorId::new(),
        "/uploads/missing.mp3".to_string(),
        "en-US".to_string(),
    );
    state.recordings.create(&recording).await.unwrap();

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!(
                    "/api/recordings/{}/translate",
                    recording.id.as_uuid()
                ))
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::from(json!({ "language": "Hindi" }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Recording or transcript not found");
}

#[tokio::test]
async fn given_no_recordings_when_requesting_summary_then_bad_request() {
    let router = create_router(test_state());
    let token = signup(&router, "asha@clinic.test").await;
    let patient_id = create_patient(&router, &token, "Ravi Kumar").await;

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/recordings/patient/{}/summary", patient_id))
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "No recordings found for this patient");
}

#[tokio::test]
async fn given_own_recording_when_deleted_then_row_removed() {
    let router = create_router(test_state());
    let token = signup(&router, "asha@clinic.test").await;
    let patient_id = create_patient(&router, &token, "Ravi Kumar").await;

    let uploaded = upload_recording(&router, &token, &patient_id).await;
    let recording_id = uploaded["id"].as_str().unwrap();

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/recordings/{}", recording_id))
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Recording deleted successfully");

    let recordings = list_recordings(&router, &token, &patient_id).await;
    assert_eq!(recordings.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn given_unknown_recording_when_deleted_then_not_found() {
    let router = create_router(test_state());
    let token = signup(&router, "asha@clinic.test").await;

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/recordings/{}", uuid::Uuid::new_v4()))
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Recording not found");
}

#[tokio::test]
async fn given_another_doctors_recording_when_deleted_then_forbidden() {
    let router = create_router(test_state());
    let owner_token = signup(&router, "owner@clinic.test").await;
    let other_token = signup(&router, "other@clinic.test").await;
    let patient_id = create_patient(&router, &owner_token, "Ravi Kumar").await;

    let uploaded = upload_recording(&router, &owner_token, &patient_id).await;
    let recording_id = uploaded["id"].as_str().unwrap();

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/recordings/{}", recording_id))
                .header(header::AUTHORIZATION, format!("Bearer {}", other_token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Unauthorized");

    // Still there for the owner.
    let recordings = list_recordings(&router, &owner_token, &patient_id).await;
    assert_eq!(recordings.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn given_partial_update_when_putting_patient_then_other_fields_survive() {
    let router = create_router(test_state());
    let token = signup(&router, "asha@clinic.test").await;
    let patient_id = create_patient(&router, &token, "Ravi Kumar").await;

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/api/patients/{}", patient_id))
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::from(
                    json!({ "age": 55, "notes": "Hypertensive, on amlodipine" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["name"], "Ravi Kumar");
    assert_eq!(body["age"], 55);
    assert_eq!(body["notes"], "Hypertensive, on amlodipine");
}

#[tokio::test]
async fn given_another_doctors_patient_when_updating_then_forbidden() {
    let router = create_router(test_state());
    let owner_token = signup(&router, "owner@clinic.test").await;
    let other_token = signup(&router, "other@clinic.test").await;
    let patient_id = create_patient(&router, &owner_token, "Ravi Kumar").await;

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/api/patients/{}", patient_id))
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, format!("Bearer {}", other_token))
                .body(Body::from(json!({ "notes": "hijacked" }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Unauthorized");
}

#[tokio::test]
async fn given_upload_without_audio_when_posting_then_bad_request() {
    let router = create_router(test_state());
    let token = signup(&router, "asha@clinic.test").await;
    let patient_id = create_patient(&router, &token, "Ravi Kumar").await;

    let boundary = "----mediassist-test-boundary";
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"patientId\"\r\n\r\n{pid}\r\n--{b}--\r\n",
        b = boundary,
        pid = patient_id
    );

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/recordings/upload")
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={}", boundary),
                )
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "No audio file uploaded");
}
