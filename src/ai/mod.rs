//! Client for the generated-encouragement message.
//!
//! After a successful check-in the frontend asks for a short personalized
//! encouragement. This module wraps the outbound call to the Gemini
//! `generateContent` endpoint; any failure at any layer degrades to the
//! fixed [`FALLBACK_MESSAGE`], so check-in success never depends on the
//! generation provider.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use checkin::ai::AiClient;
//!
//! let client = AiClient::new(api_key, model);
//! let text = client.encouragement("Ada").await?;
//! ```

pub mod prompt;

use serde::Deserialize;
use thiserror::Error;

pub use prompt::encouragement_prompt;

/// Served whenever generation fails or no API key is configured.
pub const FALLBACK_MESSAGE: &str =
    "May the Lord bless your crossover into 2026 with infinite favor.";

/// Number of attempts before giving up.
const DEFAULT_MAX_RETRIES: u32 = 3;

/// Delay between retries in milliseconds.
const RETRY_DELAY_MS: u64 = 1000;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// AI-related errors
#[derive(Error, Debug)]
pub enum AiError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid JSON response: {0}")]
    InvalidJson(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Empty response")]
    EmptyResponse,
}

/// Generation API client
#[derive(Clone)]
pub struct AiClient {
    api_key: String,
    model: String,
}

/// generateContent response structure
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

/// Generation API error response
#[derive(Debug, Deserialize)]
struct GenerateError {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

impl AiClient {
    /// Create a new client with explicit API key and model. Both come from
    /// [`crate::config::AppConfig`]; there is no separate env lookup here.
    pub fn new(api_key: String, model: String) -> Self {
        Self { api_key, model }
    }

    /// Generate a short encouragement for a named attendee (with retries).
    pub async fn encouragement(&self, name: &str) -> Result<String, AiError> {
        let mut last_error = None;

        for attempt in 1..=DEFAULT_MAX_RETRIES {
            match self.try_encouragement(name).await {
                Ok(text) => return Ok(text),
                Err(e) => {
                    eprintln!(
                        "   ⚠️  Attempt {}/{} failed: {}",
                        attempt, DEFAULT_MAX_RETRIES, e
                    );
                    last_error = Some(e);

                    if attempt < DEFAULT_MAX_RETRIES {
                        tokio::time::sleep(tokio::time::Duration::from_millis(RETRY_DELAY_MS))
                            .await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| AiError::ApiError("Unknown error".to_string())))
    }

    /// Single generation attempt.
    async fn try_encouragement(&self, name: &str) -> Result<String, AiError> {
        let body = self.call_api(&prompt::encouragement_prompt(name)).await?;
        extract_text(&body)
    }

    /// Call the generateContent endpoint.
    async fn call_api(&self, prompt_text: &str) -> Result<String, AiError> {
        let client = reqwest::Client::new();

        let request_body = serde_json::json!({
            "contents": [{
                "parts": [{ "text": prompt_text }]
            }]
        });

        let url = format!("{}/{}:generateContent", API_BASE, self.model);
        let response = client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| AiError::RequestFailed(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AiError::RequestFailed(e.to_string()))?;

        if !status.is_success() {
            if let Ok(error) = serde_json::from_str::<GenerateError>(&body) {
                return Err(AiError::ApiError(error.error.message));
            }
            return Err(AiError::ApiError(format!("HTTP {}: {}", status, body)));
        }

        Ok(body)
    }
}

/// Pull the generated text out of a generateContent response body.
fn extract_text(body: &str) -> Result<String, AiError> {
    let response: GenerateResponse =
        serde_json::from_str(body).map_err(|e| AiError::InvalidJson(e.to_string()))?;

    let text = response
        .candidates
        .iter()
        .flat_map(|c| c.content.parts.iter())
        .map(|p| p.text.as_str())
        .collect::<Vec<_>>()
        .join("")
        .trim()
        .to_string();

    if text.is_empty() {
        return Err(AiError::EmptyResponse);
    }

    Ok(text)
}

/// Resolve an encouragement, degrading to the fallback on any failure or
/// when no client is configured.
pub async fn encouragement_or_fallback(client: Option<&AiClient>, name: &str) -> String {
    match client {
        Some(client) => client
            .encouragement(name)
            .await
            .unwrap_or_else(|_| FALLBACK_MESSAGE.to_string()),
        None => FALLBACK_MESSAGE.to_string(),
    }
}
