//! Request DTOs for the roast backend API
//!
//! Defines the structure of incoming HTTP request bodies. Validation happens
//! here, upstream of orchestration.

use serde::Deserialize;

use crate::models::Intensity;

/// GitHub caps usernames at 39 characters.
pub const MAX_USERNAME_LENGTH: usize = 39;

/// Upper bound on repositories considered per roast.
pub const MAX_REPOS_LIMIT: u8 = 20;

/// Upper bound on TTS input length.
pub const MAX_TTS_TEXT_LENGTH: usize = 2000;

fn default_max_repos() -> u8 {
    5
}

fn default_tts_model() -> String {
    "eleven_multilingual_v2".to_string()
}

/// Request body for POST /roast.
#[derive(Debug, Clone, Deserialize)]
pub struct RoastRequest {
    /// GitHub username to analyze
    pub username: String,
    /// Roast tone
    pub intensity: Intensity,
    /// Whether to include README excerpts in the signals
    #[serde(default)]
    pub include_readme: bool,
    /// How many top repositories to consider (1..=20)
    #[serde(default = "default_max_repos")]
    pub max_repos: u8,
}

impl RoastRequest {
    /// Validates the request data.
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.username.is_empty() {
            return Some("username cannot be empty".to_string());
        }
        if self.username.len() > MAX_USERNAME_LENGTH {
            return Some(format!(
                "username exceeds maximum length of {} characters",
                MAX_USERNAME_LENGTH
            ));
        }
        // GitHub charset; also guarantees the ':' key delimiter never
        // appears inside a username
        if !self
            .username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Some("username may only contain letters, digits and hyphens".to_string());
        }
        if self.max_repos == 0 || self.max_repos > MAX_REPOS_LIMIT {
            return Some(format!("max_repos must be between 1 and {}", MAX_REPOS_LIMIT));
        }
        None
    }
}

/// Request body for POST /tts.
#[derive(Debug, Clone, Deserialize)]
pub struct TtsRequest {
    /// Text to synthesize
    pub text: String,
    /// Upstream voice identifier
    pub voice_id: String,
    /// Upstream synthesis model
    #[serde(default = "default_tts_model")]
    pub model_id: String,
}

impl TtsRequest {
    /// Validates the request data.
    pub fn validate(&self) -> Option<String> {
        if self.text.is_empty() {
            return Some("text cannot be empty".to_string());
        }
        if self.text.len() > MAX_TTS_TEXT_LENGTH {
            return Some(format!(
                "text exceeds maximum length of {} characters",
                MAX_TTS_TEXT_LENGTH
            ));
        }
        if self.voice_id.is_empty() {
            return Some("voice_id cannot be empty".to_string());
        }
        None
    }
}
