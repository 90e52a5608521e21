//! Structured Cache Keys
//!
//! Composite keys for the two memoization caches, with a canonical string
//! serialization. Components are joined with `:`, which cannot appear in a
//! valid GitHub username, and numeric components render in decimal, so
//! distinct keys never canonicalize to the same string.

use crate::models::Intensity;

// == Signal Key ==
/// Cache key for GitHub signal lookups.
///
/// All three components change what the fetched signals mean, so requests
/// differing in any of them must not share an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalKey<'a> {
    pub username: &'a str,
    pub max_repos: u8,
    pub include_readme: bool,
}

impl<'a> SignalKey<'a> {
    pub fn new(username: &'a str, max_repos: u8, include_readme: bool) -> Self {
        Self {
            username,
            max_repos,
            include_readme,
        }
    }

    /// Canonical serialization: `{username}:{max_repos}:{include_readme}`.
    pub fn canonical(&self) -> String {
        format!("{}:{}:{}", self.username, self.max_repos, self.include_readme)
    }
}

// == Generation Key ==
/// Cache key for generated roast results.
///
/// Output depends on both the subject and the requested tone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationKey<'a> {
    pub username: &'a str,
    pub intensity: Intensity,
}

impl<'a> GenerationKey<'a> {
    pub fn new(username: &'a str, intensity: Intensity) -> Self {
        Self {
            username,
            intensity,
        }
    }

    /// Canonical serialization: `{username}:{intensity}`.
    pub fn canonical(&self) -> String {
        format!("{}:{}", self.username, self.intensity.as_str())
    }
}
