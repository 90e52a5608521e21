//! Response DTOs for the roast backend API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use uuid::Uuid;

use crate::cache::CacheStats;
use crate::models::{GithubSignals, RoastResult};

/// Response body for POST /roast.
#[derive(Debug, Clone, Serialize)]
pub struct RoastResponse {
    /// Fresh identifier generated per request, cache hit or not
    pub request_id: Uuid,
    /// The subject that was analyzed
    pub username: String,
    /// Signals the roast was based on
    pub signals: GithubSignals,
    /// The generated roast, advice and personality profile
    pub result: RoastResult,
}

/// Response body for GET /stats.
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// GitHub signal cache counters
    pub signal_cache: CacheStats,
    /// Generation result cache counters
    pub generation_cache: CacheStats,
}

/// Response body for GET /health.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "ok")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp.
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Response body for GET / (API information).
#[derive(Debug, Clone, Serialize)]
pub struct InfoResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub endpoints: Vec<(&'static str, &'static str)>,
    pub timestamp: String,
}

impl InfoResponse {
    pub fn current() -> Self {
        Self {
            name: "gitroast",
            version: env!("CARGO_PKG_VERSION"),
            description: "GitHub profile roast backend",
            endpoints: vec![
                ("GET /", "API information (this endpoint)"),
                ("GET /health", "Health check endpoint"),
                ("GET /stats", "Cache statistics"),
                ("POST /roast", "Generate roast, advice and personality profile"),
                ("POST /tts", "Convert text to speech"),
            ],
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
