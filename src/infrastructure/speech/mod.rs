mod fallback_engine;
mod google_speech_engine;
mod llm_transcription_engine;

pub use fallback_engine::FallbackTranscriptionEngine;
pub use google_speech_engine::GoogleSpeechEngine;
pub use llm_transcription_engine::LlmTranscriptionEngine;
