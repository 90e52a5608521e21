//! ElevenLabs Speech Client
//!
//! Production `SpeechSynthesizer` implementation. Posts text to the
//! text-to-speech endpoint and returns the MPEG audio bytes unmodified.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::json;

use crate::error::{ApiError, Result};
use crate::services::SpeechSynthesizer;

const ELEVENLABS_API_BASE: &str = "https://api.elevenlabs.io/v1";

static URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://\S+").expect("valid URL pattern"));

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid email pattern")
});

/// Replaces URLs and email addresses so the voice does not read them out.
pub fn sanitize_speech_text(text: &str) -> String {
    let without_urls = URL_PATTERN.replace_all(text, "[URL]");
    EMAIL_PATTERN.replace_all(&without_urls, "[EMAIL]").into_owned()
}

// == Client ==
pub struct ElevenLabsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ElevenLabsClient {
    pub fn new(http: reqwest::Client, api_key: String) -> Self {
        Self {
            http,
            base_url: ELEVENLABS_API_BASE.to_string(),
            api_key,
        }
    }

    /// Overrides the API base URL (tests against a local stub).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl SpeechSynthesizer for ElevenLabsClient {
    async fn synthesize(&self, text: &str, voice_id: &str, model_id: &str) -> Result<Vec<u8>> {
        let url = format!("{}/text-to-speech/{}", self.base_url, voice_id);

        let response = self
            .http
            .post(&url)
            .header("Accept", "audio/mpeg")
            .header("xi-api-key", &self.api_key)
            .json(&json!({
                "text": text,
                "model_id": model_id,
                "voice_settings": {
                    "stability": 0.5,
                    "similarity_boost": 0.75,
                },
            }))
            .send()
            .await
            .map_err(|e| ApiError::Speech(format!("request failed: {}", e)))?;

        match response.status() {
            reqwest::StatusCode::UNAUTHORIZED => {
                Err(ApiError::Speech("API key invalid".to_string()))
            }
            reqwest::StatusCode::TOO_MANY_REQUESTS => {
                Err(ApiError::Speech("rate limit exceeded".to_string()))
            }
            status if !status.is_success() => {
                let detail = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                Err(ApiError::Speech(format!("status {}: {}", status, detail)))
            }
            _ => {
                let bytes = response
                    .bytes()
                    .await
                    .map_err(|e| ApiError::Speech(format!("failed to read audio body: {}", e)))?;
                Ok(bytes.to_vec())
            }
        }
    }
}
