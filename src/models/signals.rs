//! Domain types shared between the upstream collaborators and the API
//!
//! `GithubSignals` is the structured profile summary fetched from GitHub;
//! `RoastResult` is the parsed generation output. Both are cached and echoed
//! back in roast responses.

use serde::{Deserialize, Serialize};

// == Intensity ==
/// Tone selector for generated output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Mild,
    Medium,
    Spicy,
}

impl Intensity {
    /// Lowercase wire/cache-key form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Intensity::Mild => "mild",
            Intensity::Medium => "medium",
            Intensity::Spicy => "spicy",
        }
    }

    /// Sampling temperature used for generation at this tone.
    pub fn temperature(&self) -> f64 {
        match self {
            Intensity::Mild => 0.5,
            Intensity::Medium => 0.7,
            Intensity::Spicy => 0.9,
        }
    }
}

// == GitHub Signals ==
/// Structured summary of a subject's public profile and top repositories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GithubSignals {
    pub profile: ProfileSignals,
    pub top_repos: Vec<RepoSignals>,
}

/// Profile-level signals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileSignals {
    pub public_repos: u32,
    pub followers: u32,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

/// Per-repository signals, including an optional README excerpt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RepoSignals {
    pub name: String,
    pub language: Option<String>,
    pub stars: u32,
    pub forks: u32,
    pub updated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readme_snippet: Option<String>,
}

// == Roast Result ==
/// Parsed output of the generation upstream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoastResult {
    pub roast: String,
    pub advice: Vec<String>,
    pub profile: RoastProfile,
}

/// Developer personality profile derived from code patterns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoastProfile {
    pub archetype: String,
    pub strengths: Vec<String>,
    pub blind_spots: Vec<String>,
}
