//! Gemini `generateContent` client.
//!
//! Sends one fixed prompt per question and parses the single-line
//! `<feature_key>|<location>` answer.

use std::time::Duration;

use async_trait::async_trait;
use outletdb_core::FeatureKey;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::answer::SUPPORTED_LOCATIONS;
use crate::error::AskError;
use crate::interpret::{parse_answer, Interpretation, QuestionInterpreter};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/";

/// Interpreter backed by a Gemini model.
pub struct GeminiInterpreter {
    client: Client,
    api_key: String,
    model: String,
    base_url: Url,
}

impl std::fmt::Debug for GeminiInterpreter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiInterpreter")
            .field("api_key", &"[redacted]")
            .field("model", &self.model)
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    fn into_text(self) -> Option<String> {
        let text: String = self
            .candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .filter_map(|p| p.text)
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

impl GeminiInterpreter {
    /// Creates an interpreter pointed at the production Gemini API.
    ///
    /// # Errors
    ///
    /// Returns [`AskError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, model: &str, timeout_secs: u64) -> Result<Self, AskError> {
        Self::with_base_url(api_key, model, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates an interpreter with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`AskError::Http`] if the client cannot be constructed, or
    /// [`AskError::InvalidBaseUrl`] if `base_url` is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, AskError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| AskError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            model: model.to_owned(),
            base_url,
        })
    }

    fn endpoint(&self) -> Result<Url, AskError> {
        self.base_url
            .join(&format!("v1beta/models/{}:generateContent", self.model))
            .map_err(|e| AskError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    /// Send `prompt` and return the model's text.
    ///
    /// # Errors
    ///
    /// - [`AskError::Http`] on network failure.
    /// - [`AskError::Api`] on a non-2xx status.
    /// - [`AskError::Deserialize`] if the body is not a `generateContent` response.
    /// - [`AskError::EmptyResponse`] if no candidate carries text.
    pub async fn generate(&self, prompt: &str) -> Result<String, AskError> {
        let url = self.endpoint()?;
        let body = GenerateRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(url.clone())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(AskError::Api {
                status: status.as_u16(),
                message: api_error_message(&text),
            });
        }

        let parsed: GenerateResponse =
            serde_json::from_str(&text).map_err(|e| AskError::Deserialize {
                context: url.to_string(),
                source: e,
            })?;
        parsed.into_text().ok_or(AskError::EmptyResponse)
    }

    async fn interpret_question(&self, question: &str) -> Result<Interpretation, AskError> {
        let answer = self.generate(&build_prompt(question)).await?;
        let interpretation = parse_answer(&answer);
        tracing::debug!(
            answer = answer.trim(),
            feature = ?interpretation.feature,
            location = ?interpretation.location,
            "question interpreted"
        );
        Ok(interpretation)
    }
}

#[async_trait]
impl QuestionInterpreter for GeminiInterpreter {
    async fn interpret(&self, question: &str) -> Result<Interpretation, AskError> {
        self.interpret_question(question).await
    }
}

fn api_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(serde_json::Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| "unknown error".to_string())
}

/// The fixed extraction prompt for `question`.
///
/// Places outside the supported list are still named in the answer so the
/// caller can tell "wrong city" apart from "unknown feature".
#[must_use]
pub fn build_prompt(question: &str) -> String {
    let keys: Vec<&str> = FeatureKey::ALL.iter().map(|k| k.as_str()).collect();
    let locations: Vec<String> = SUPPORTED_LOCATIONS.iter().map(|l| format!("'{l}'")).collect();
    let locations = locations.join(", ");

    format!(
        "You are a smart assistant for McDonald's outlet search in Malaysia.
Extract ONLY the following two things from the user's question:
1. Feature key: exactly one from this list: {keys}
2. Location: the place the question asks about. Supported places: {locations}.

Strict answer format: <feature_key>|<location>
Rules:
- If location is missing, assume 'kuala lumpur'.
- If the question names a place NOT in [{locations}], still output it as named, lower-cased: <feature_key>|<place>
- If no valid feature is mentioned but a place is, output: |<place>
- If neither a valid feature nor a place is mentioned, output just: |
- If the question is not about McDonald's outlets, output just: |
- Do NOT explain or repeat the user's question, only output the format.

Examples:
Q: Which outlets operate 24 hours in KL?
A: is_24h|kuala lumpur
Q: Which outlet allows birthday parties in PJ?
A: has_birthday|pj
Q: Which McDonald's has WiFi?
A: has_wifi|kuala lumpur
Q: Do any outlets in Singapore have a playground?
A: |singapore
Q: Do any outlets have a playground?
A: |

User question: {question}
Answer:",
        keys = keys.join(", "),
        question = question.trim(),
    )
}

#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;
