//! Gemini `generateContent` backend
//!
//! One blocking HTTPS request per classification, no retries or streaming.
//! The API key is handed in by the caller; this module never reads the
//! environment.

use super::prompts::DIGIT_PROMPT;
use super::DigitClassifier;
use digit_types::{Error, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_CREDENTIAL_NAME: &str = "GEMINI_API_KEY";

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Serialize)]
pub(crate) struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
enum RequestPart<'a> {
    #[serde(rename_all = "camelCase")]
    InlineData { mime_type: &'a str, data: &'a str },
    Text(&'a str),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Image part first, instruction second
pub(crate) fn build_request<'a>(
    payload_b64: &'a str,
    mime_type: &'a str,
) -> GenerateContentRequest<'a> {
    GenerateContentRequest {
        contents: vec![RequestContent {
            parts: vec![
                RequestPart::InlineData {
                    mime_type,
                    data: payload_b64,
                },
                RequestPart::Text(DIGIT_PROMPT),
            ],
        }],
    }
}

/// Concatenated text of the first candidate
pub(crate) fn extract_text(body: &str) -> Result<String> {
    let response: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| Error::Service(format!("Malformed response: {}", e)))?;

    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .map(|r| format!("Response was blocked: {}", r))
            .unwrap_or_else(|| "Response contained no candidates".to_string());
        return Err(Error::Service(reason));
    };

    match candidate.content {
        Some(content) => Ok(content
            .parts
            .into_iter()
            .filter_map(|p| p.text)
            .collect::<String>()),
        None => Err(Error::Service(format!(
            "Response contained no content (finish reason: {})",
            candidate.finish_reason.as_deref().unwrap_or("unknown")
        ))),
    }
}

/// Best message for a non-success HTTP status
fn service_error_message(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => format!("{} ({})", envelope.error.message, status),
        Err(_) => {
            let truncated: String = body.chars().take(200).collect();
            format!("HTTP {}: {}", status, truncated)
        }
    }
}

// ============================================================================
// Client
// ============================================================================

/// Classifier backed by the Gemini REST API
pub struct GeminiClassifier {
    credential: Option<String>,
    credential_name: String,
    model: String,
    endpoint: String,
    client: Client,
}

impl GeminiClassifier {
    /// `credential` is the API key, `None` when it is not configured
    pub fn new(credential: Option<String>, model: impl Into<String>) -> Self {
        Self {
            credential,
            credential_name: DEFAULT_CREDENTIAL_NAME.to_string(),
            model: model.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            client: Client::new(),
        }
    }

    /// API base URL, e.g. a regional or proxy endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Name reported to the user when the credential is missing
    pub fn with_credential_name(mut self, name: impl Into<String>) -> Self {
        self.credential_name = name.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn api_key(&self) -> Result<&str> {
        self.credential
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| Error::MissingCredential(self.credential_name.clone()))
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

impl DigitClassifier for GeminiClassifier {
    fn classify(&self, payload_b64: &str, mime_type: &str) -> Result<String> {
        let api_key = self.api_key()?;

        info!(model = %self.model, mime = %mime_type, "calling Gemini generateContent");
        debug!(payload_len = payload_b64.len(), endpoint = %self.endpoint, "request details");

        let response = self
            .client
            .post(self.url())
            .query(&[("key", api_key)])
            .json(&build_request(payload_b64, mime_type))
            .send()
            .map_err(|e| Error::Service(e.without_url().to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| Error::Service(e.without_url().to_string()))?;

        if !status.is_success() {
            return Err(Error::Service(service_error_message(status, &body)));
        }

        let text = extract_text(&body)?;
        debug!(response = %text, "Gemini answered");
        Ok(text)
    }
}
