//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

use anyhow::{bail, Context};

/// Server configuration parameters.
///
/// All tunables can be configured via environment variables with sensible
/// defaults; the upstream API keys are required at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// OpenAI API key (required)
    pub openai_api_key: String,
    /// OpenAI model used for roast generation
    pub openai_model: String,
    /// ElevenLabs API key (required)
    pub elevenlabs_api_key: String,
    /// Optional GitHub token for higher API quota
    pub github_token: Option<String>,
    /// CORS origin allowlist; empty allows all origins
    pub allowed_origins: Vec<String>,
    /// Maximum entries in the GitHub signal cache
    pub signal_cache_entries: usize,
    /// Signal cache TTL in milliseconds
    pub signal_cache_ttl_ms: u64,
    /// Maximum entries in the generation result cache
    pub generation_cache_entries: usize,
    /// Generation cache TTL in milliseconds
    pub generation_cache_ttl_ms: u64,
    /// Maximum requests per rate-limit window per client
    pub rate_limit_max_requests: u32,
    /// Rate-limit window length in milliseconds
    pub rate_limit_window_ms: u64,
    /// Background expiry sweep interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `OPENAI_API_KEY` - OpenAI key (required)
    /// - `OPENAI_MODEL` - generation model (default: gpt-4o-mini)
    /// - `ELEVENLABS_API_KEY` - ElevenLabs key (required)
    /// - `GITHUB_TOKEN` - optional GitHub token
    /// - `ALLOWED_ORIGINS` - comma-separated CORS allowlist (default: empty)
    /// - `SIGNAL_CACHE_ENTRIES` / `SIGNAL_CACHE_TTL_MS` (default: 100 / 300000)
    /// - `GENERATION_CACHE_ENTRIES` / `GENERATION_CACHE_TTL_MS` (default: 100 / 600000)
    /// - `RATE_LIMIT_MAX_REQUESTS` / `RATE_LIMIT_WINDOW_MS` (default: 10 / 60000)
    /// - `CLEANUP_INTERVAL` - sweep frequency in seconds (default: 30)
    pub fn from_env() -> anyhow::Result<Self> {
        let openai_api_key =
            env::var("OPENAI_API_KEY").context("OPENAI_API_KEY is required")?;
        let elevenlabs_api_key =
            env::var("ELEVENLABS_API_KEY").context("ELEVENLABS_API_KEY is required")?;

        if openai_api_key.is_empty() {
            bail!("OPENAI_API_KEY must not be empty");
        }
        if elevenlabs_api_key.is_empty() {
            bail!("ELEVENLABS_API_KEY must not be empty");
        }

        Ok(Self {
            server_port: env_or("SERVER_PORT", 3000),
            openai_api_key,
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            elevenlabs_api_key,
            github_token: env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty()),
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
            signal_cache_entries: env_or("SIGNAL_CACHE_ENTRIES", 100),
            signal_cache_ttl_ms: env_or("SIGNAL_CACHE_TTL_MS", 5 * 60 * 1000),
            generation_cache_entries: env_or("GENERATION_CACHE_ENTRIES", 100),
            generation_cache_ttl_ms: env_or("GENERATION_CACHE_TTL_MS", 10 * 60 * 1000),
            rate_limit_max_requests: env_or("RATE_LIMIT_MAX_REQUESTS", 10),
            rate_limit_window_ms: env_or("RATE_LIMIT_WINDOW_MS", 60 * 1000),
            cleanup_interval: env_or("CLEANUP_INTERVAL", 30),
        })
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            openai_api_key: String::new(),
            openai_model: "gpt-4o-mini".to_string(),
            elevenlabs_api_key: String::new(),
            github_token: None,
            allowed_origins: Vec::new(),
            signal_cache_entries: 100,
            signal_cache_ttl_ms: 5 * 60 * 1000,
            generation_cache_entries: 100,
            generation_cache_ttl_ms: 10 * 60 * 1000,
            rate_limit_max_requests: 10,
            rate_limit_window_ms: 60 * 1000,
            cleanup_interval: 30,
        }
    }
}
