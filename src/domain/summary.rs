use serde::{Deserialize, Serialize};

/// Structured summary of a single consultation, as produced by the LLM.
/// Field names mirror the JSON contract with the mobile client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationSummary {
    pub chief_complaint: String,
    pub history: String,
    pub diagnosis: String,
    pub medication: String,
    pub follow_up: String,
    /// Raw model reply, kept only when the reply could not be parsed as JSON.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_output: Option<String>,
}

impl ConsultationSummary {
    /// Parse a model reply, stripping markdown code fences first. A reply
    /// that is not valid JSON never fails: it becomes a fallback summary
    /// with the raw text preserved.
    pub fn from_model_reply(reply: &str) -> Self {
        let cleaned = strip_code_fences(reply);
        match serde_json::from_str(cleaned) {
            Ok(summary) => summary,
            Err(e) => {
                tracing::warn!(error = %e, "Summary reply was not valid JSON, using fallback");
                Self::fallback(reply)
            }
        }
    }

    pub fn fallback(raw: &str) -> Self {
        Self {
            chief_complaint: "Unable to generate summary".to_string(),
            history: "AI processing failed".to_string(),
            diagnosis: "Please review transcript manually".to_string(),
            medication: "N/A".to_string(),
            follow_up: "N/A".to_string(),
            raw_output: Some(raw.to_string()),
        }
    }
}

/// Aggregate summary over a patient's consultation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientHistorySummary {
    pub concise: String,
    pub detailed: String,
}

impl PatientHistorySummary {
    pub fn from_model_reply(reply: &str) -> Self {
        let cleaned = strip_code_fences(reply);
        match serde_json::from_str(cleaned) {
            Ok(summary) => summary,
            Err(e) => {
                tracing::warn!(error = %e, "History reply was not valid JSON, using fallback");
                Self {
                    concise: "Unable to generate summary.".to_string(),
                    detailed: reply.to_string(),
                }
            }
        }
    }
}

/// Strip a surrounding markdown code fence (``` or ```json) from a model
/// reply. Anything else is returned trimmed.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest
        .strip_prefix("json")
        .or_else(|| rest.strip_prefix("JSON"))
        .unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}
