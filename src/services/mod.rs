//! Upstream Collaborators
//!
//! Trait seams for the three external services the backend talks to, plus
//! their production reqwest implementations. The orchestrator and handlers
//! depend on the traits only, so tests can substitute mocks.

mod elevenlabs;
mod github;
mod openai;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{GithubSignals, Intensity, RoastResult};

pub use elevenlabs::{sanitize_speech_text, ElevenLabsClient};
pub use github::GithubClient;
pub use openai::OpenAiClient;

// == Signal Source ==
/// Fetches profile signals for a subject.
///
/// Any upstream failure (auth, rate limit, not-found, network) surfaces as
/// `ApiError::SignalSource`.
#[async_trait]
pub trait SignalSource: Send + Sync {
    async fn fetch_signals(
        &self,
        username: &str,
        max_repos: u8,
        include_readme: bool,
    ) -> Result<GithubSignals>;
}

// == Roast Generator ==
/// Turns signals into a roast at the requested tone.
///
/// Upstream failure or structurally invalid output surfaces as
/// `ApiError::Generation`.
#[async_trait]
pub trait RoastGenerator: Send + Sync {
    async fn generate(&self, signals: &GithubSignals, intensity: Intensity)
        -> Result<RoastResult>;
}

// == Speech Synthesizer ==
/// Converts text to audio bytes (MPEG).
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str, voice_id: &str, model_id: &str) -> Result<Vec<u8>>;
}
