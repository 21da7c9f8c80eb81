/// Translation / transcription target language. The mobile client sends
/// either a display name ("Kannada") or an ISO code ("kn").
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Language {
    English,
    Hindi,
    Kannada,
    Other(String),
}

impl Language {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "english" | "en" | "en-us" => Language::English,
            "hindi" | "hi" | "hi-in" => Language::Hindi,
            "kannada" | "kn" | "kn-in" => Language::Kannada,
            _ => Language::Other(s.trim().to_string()),
        }
    }

    pub fn is_english(&self) -> bool {
        matches!(self, Language::English)
    }

    pub fn name(&self) -> &str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi",
            Language::Kannada => "Kannada",
            Language::Other(name) => name,
        }
    }

    /// Target code for the Google Translate v2 API. `None` when no ISO 639
    /// code is known for the language; the Google client then bails out
    /// before the request and the caller's LLM fallback takes over.
    pub fn translate_code(&self) -> Option<String> {
        match self {
            Language::English => Some("en".to_string()),
            Language::Hindi => Some("hi".to_string()),
            Language::Kannada => Some("kn".to_string()),
            Language::Other(name) => {
                let lower = name.to_lowercase();
                // A short all-letter value is assumed to already be a code.
                if lower.len() <= 3 && lower.chars().all(|c| c.is_ascii_lowercase()) {
                    return Some(lower);
                }
                let code = match lower.as_str() {
                    "tamil" => "ta",
                    "telugu" => "te",
                    "malayalam" => "ml",
                    "marathi" => "mr",
                    "bengali" => "bn",
                    "gujarati" => "gu",
                    "punjabi" => "pa",
                    "urdu" => "ur",
                    _ => return None,
                };
                Some(code.to_string())
            }
        }
    }

    /// BCP-47 code for the Google Speech-to-Text API.
    pub fn speech_code(&self) -> &'static str {
        match self {
            Language::English => "en-US",
            Language::Hindi => "hi-IN",
            Language::Kannada => "kn-IN",
            Language::Other(_) => "en-US",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_display_names_and_codes() {
        assert_eq!(Language::parse("English"), Language::English);
        assert_eq!(Language::parse("en"), Language::English);
        assert_eq!(Language::parse("HINDI"), Language::Hindi);
        assert_eq!(Language::parse("kn-IN"), Language::Kannada);
        assert_eq!(
            Language::parse("Tamil"),
            Language::Other("Tamil".to_string())
        );
    }

    #[test]
    fn google_codes_are_mapped() {
        assert_eq!(Language::Kannada.translate_code().as_deref(), Some("kn"));
        assert_eq!(Language::Hindi.speech_code(), "hi-IN");
        assert_eq!(
            Language::Other("Tamil".to_string()).translate_code().as_deref(),
            Some("ta")
        );
        assert_eq!(
            Language::Other("ta".to_string()).translate_code().as_deref(),
            Some("ta")
        );
    }

    #[test]
    fn unknown_display_name_has_no_translate_code() {
        assert_eq!(Language::Other("Klingon".to_string()).translate_code(), None);
    }

    #[test]
    fn only_english_short_circuits() {
        assert!(Language::parse("en").is_english());
        assert!(!Language::parse("Kannada").is_english());
    }
}
