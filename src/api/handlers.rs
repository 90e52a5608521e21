//! API Handlers
//!
//! HTTP request handlers for each endpoint, plus the shared application
//! state. Validation happens here; orchestration and upstream calls live
//! behind the injected service.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    response::IntoResponse,
    Json,
};
use tokio::sync::RwLock;
use tracing::info;

use crate::cache::TtlCache;
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::{
    HealthResponse, InfoResponse, RoastRequest, RoastResponse, StatsResponse, TtsRequest,
};
use crate::orchestrator::{GenerationCache, RoastService, SignalCache};
use crate::ratelimit::RateLimiter;
use crate::services::{
    sanitize_speech_text, RoastGenerator, SignalSource, SpeechSynthesizer,
};

/// Application state shared across all handlers.
///
/// Every cache and the rate limiter are process-wide singletons constructed
/// once at startup and injected here; nothing reads or writes their
/// internals except through `get`/`set`/`check`.
#[derive(Clone)]
pub struct AppState {
    /// Orchestrates roast requests across caches and upstreams
    pub roast: Arc<RoastService>,
    /// Text-to-speech passthrough collaborator
    pub speech: Arc<dyn SpeechSynthesizer>,
    /// Fixed-window admission control, keyed by client IP
    pub limiter: Arc<RwLock<RateLimiter>>,
    /// Signal cache handle, kept for stats and sweeping
    pub signal_cache: SignalCache,
    /// Generation cache handle, kept for stats and sweeping
    pub generation_cache: GenerationCache,
}

impl AppState {
    /// Wires the state from already-built collaborators and config tunables.
    pub fn new(
        config: &Config,
        signal_source: Arc<dyn SignalSource>,
        generator: Arc<dyn RoastGenerator>,
        speech: Arc<dyn SpeechSynthesizer>,
    ) -> Result<Self> {
        let signal_cache: SignalCache = Arc::new(RwLock::new(TtlCache::new(
            config.signal_cache_entries,
            Duration::from_millis(config.signal_cache_ttl_ms),
        )?));
        let generation_cache: GenerationCache = Arc::new(RwLock::new(TtlCache::new(
            config.generation_cache_entries,
            Duration::from_millis(config.generation_cache_ttl_ms),
        )?));
        let limiter = Arc::new(RwLock::new(RateLimiter::new(
            config.rate_limit_max_requests,
            Duration::from_millis(config.rate_limit_window_ms),
        )?));

        let roast = Arc::new(RoastService::new(
            signal_source,
            generator,
            signal_cache.clone(),
            generation_cache.clone(),
        ));

        Ok(Self {
            roast,
            speech,
            limiter,
            signal_cache,
            generation_cache,
        })
    }
}

/// Handler for POST /roast
///
/// Validates the request and delegates to the orchestrator.
pub async fn roast_handler(
    State(state): State<AppState>,
    Json(req): Json<RoastRequest>,
) -> Result<Json<RoastResponse>> {
    if let Some(message) = req.validate() {
        return Err(ApiError::BadRequest(message));
    }

    let response = state.roast.handle(&req).await?;
    Ok(Json(response))
}

/// Handler for POST /tts
///
/// Sanitizes the text (URLs and emails are not read aloud) and streams the
/// synthesized MPEG audio back.
pub async fn tts_handler(
    State(state): State<AppState>,
    Json(req): Json<TtsRequest>,
) -> Result<impl IntoResponse> {
    if let Some(message) = req.validate() {
        return Err(ApiError::BadRequest(message));
    }

    let text = sanitize_speech_text(&req.text);
    info!(
        text_length = text.len(),
        voice_id = %req.voice_id,
        model_id = %req.model_id,
        "TTS request received"
    );

    let audio = state
        .speech
        .synthesize(&text, &req.voice_id, &req.model_id)
        .await?;

    info!(audio_size = audio.len(), "TTS generation completed");

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("audio/mpeg"));
    Ok((headers, audio))
}

/// Handler for GET /stats
///
/// Returns hit/miss/eviction counters for both memoization caches.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let signal_cache = state.signal_cache.read().await.stats();
    let generation_cache = state.generation_cache.read().await.stats();

    Json(StatsResponse {
        signal_cache,
        generation_cache,
    })
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// Handler for GET / (API information)
pub async fn info_handler() -> Json<InfoResponse> {
    Json(InfoResponse::current())
}
