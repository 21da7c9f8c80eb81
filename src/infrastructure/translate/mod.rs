mod google_translate_client;
mod llm_translator;

pub use google_translate_client::GoogleTranslateClient;
pub use llm_translator::LlmTranslator;
