use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use mediassist::application::ports::{TranscriptionEngine, Translator};
use mediassist::application::services::{
    PatientHistoryService, RecordingPipeline, TranslationService,
};
use mediassist::infrastructure::llm::OllamaClient;
use mediassist::infrastructure::observability::{init_tracing, TracingConfig};
use mediassist::infrastructure::persistence::{
    create_pool, PgDoctorRepository, PgPatientRepository, PgRecordingRepository,
};
use mediassist::infrastructure::speech::{
    FallbackTranscriptionEngine, GoogleSpeechEngine, LlmTranscriptionEngine,
};
use mediassist::infrastructure::storage::AudioStoreFactory;
use mediassist::infrastructure::translate::{GoogleTranslateClient, LlmTranslator};
use mediassist::presentation::{create_router, AppState, Settings};

const GOOGLE_API_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::from_env()?;

    init_tracing(TracingConfig::default(), settings.server.port);

    let pool = create_pool(
        &settings.database.url,
        settings.database.max_connections,
    )
    .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let doctors = Arc::new(PgDoctorRepository::new(pool.clone()));
    let patients = Arc::new(PgPatientRepository::new(pool.clone()));
    let recordings = Arc::new(PgRecordingRepository::new(pool.clone()));

    let audio_store = AudioStoreFactory::create(&settings.storage)?;

    let llm_client = Arc::new(OllamaClient::new(
        settings.llm.base_url.clone(),
        settings.llm.model.clone(),
        settings.llm.timeout,
    ));

    let google_speech = settings.google.api_key.as_ref().map(|key| {
        Arc::new(GoogleSpeechEngine::new(key.clone(), GOOGLE_API_TIMEOUT))
            as Arc<dyn TranscriptionEngine>
    });
    if google_speech.is_none() {
        tracing::warn!("GOOGLE_CLOUD_API_KEY not set, transcripts will be LLM-fabricated");
    }
    let transcription_engine = Arc::new(FallbackTranscriptionEngine::new(
        google_speech,
        Arc::new(LlmTranscriptionEngine::new(llm_client.clone())),
    ));

    let google_translate = settings.google.api_key.as_ref().map(|key| {
        Arc::new(GoogleTranslateClient::new(key.clone(), GOOGLE_API_TIMEOUT))
            as Arc<dyn Translator>
    });
    let translation = Arc::new(TranslationService::new(
        google_translate,
        Arc::new(LlmTranslator::new(llm_client.clone())),
    ));

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

    let state = AppState {
        doctors,
        patients,
        recordings,
        audio_store,
        pipeline,
        translation,
        history,
        settings: settings.clone(),
    };

    let router = create_router(state);

    let addr = SocketAddr::new(settings.server.host.parse()?, settings.server.port);
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
