use std::sync::Arc;

use crate::application::ports::{Translator, TranslatorError};
use crate::domain::Language;

/// Single-switch provider chain for translations: Google Cloud Translate
/// when configured, an LLM-prompted translation otherwise or on any error.
/// An English target returns the input unchanged unless `force` is set.
pub struct TranslationService {
    google: Option<Arc<dyn Translator>>,
    llm: Arc<dyn Translator>,
}

impl TranslationService {
    pub fn new(google: Option<Arc<dyn Translator>>, llm: Arc<dyn Translator>) -> Self {
        Self { google, llm }
    }

    pub async fn translate(
        &self,
        text: &str,
        target: &Language,
        force: bool,
    ) -> Result<String, TranslatorError> {
        if target.is_english() && !force {
            tracing::debug!("Target is English, returning source text unchanged");
            return Ok(text.to_string());
        }

        if let Some(google) = &self.google {
            match google.translate(text, target).await {
                Ok(translation) => return Ok(translation),
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        target = target.name(),
                        "Google translation failed, falling back to LLM"
                    );
                }
            }
        } else {
            tracing::debug!("Google Translate not configured, using LLM");
        }

        self.llm.translate(text, target).await
    }
}
