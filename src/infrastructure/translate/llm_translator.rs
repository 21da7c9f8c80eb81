use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{LlmClient, Translator, TranslatorError};
use crate::domain::Language;

/// LLM-prompted translation fallback. Hindi and Kannada get dedicated
/// prompts tuned for simple spoken language; everything else gets a
/// generic one.
pub struct LlmTranslator {
    llm_client: Arc<dyn LlmClient>,
}

impl LlmTranslator {
    pub fn new(llm_client: Arc<dyn LlmClient>) -> Self {
        Self { llm_client }
    }
}

fn translation_prompt(text: &str, target: &Language) -> String {
    match target {
        Language::Kannada => format!(
            "You are a professional Kannada language translator specializing in medical \
terminology.\n\n\
Translate the following medical text into natural, everyday Kannada that common people \
can understand.\n\n\
CRITICAL RULES:\n\
1. Use proper Kannada script (ಕನ್ನಡ) - not transliterated English\n\
2. Use simple, spoken Kannada words from daily life\n\
3. Avoid Sanskrit-heavy or literary Kannada\n\
4. Break long sentences into short, clear statements\n\
5. Use common medical terms that people know, e.g. \"headache\" is \"ತಲೆನೋವು\", \
\"fever\" is \"ಜ್ವರ\", \"medicine\" is \"ಔಷಧಿ\"\n\n\
TONE: Friendly doctor speaking to a patient in a clinic\n\n\
Text to translate:\n\"{}\"\n\n\
Respond ONLY with the Kannada translation in proper Kannada script. No English, \
no explanations.",
            text
        ),
        Language::Hindi => format!(
            "You are a Hindi language translator.\n\n\
Translate the following text into Hindi in a simple, natural and daily-spoken style \
that a normal person can easily understand.\n\n\
IMPORTANT RULES:\n\
- Use commonly spoken Hindi words (like \"सिरदर्द\" not \"शिरोवेदना\")\n\
- Avoid textbook Hindi, avoid complex grammar\n\
- Avoid English mixing unless necessary\n\
- If any medical terms appear, explain them in simple Hindi\n\
- Tone style: Friendly doctor speaking to a patient\n\n\
Text to translate:\n\"{}\"\n\n\
Respond ONLY with the Hindi translation. No explanations or additional text.",
            text
        ),
        other => format!(
            "Translate the following text into simple, everyday {}:\n\"{}\"\n\n\
Respond ONLY with the translation.",
            other.name(),
            text
        ),
    }
}

#[async_trait]
impl Translator for LlmTranslator {
    async fn translate(&self, text: &str, target: &Language) -> Result<String, TranslatorError> {
        let prompt = translation_prompt(text, target);

        let reply = self
            .llm_client
            .generate(&prompt)
            .await
            .map_err(|e| TranslatorError::ApiRequestFailed(e.to_string()))?;

        Ok(reply.trim().to_string())
    }
}
