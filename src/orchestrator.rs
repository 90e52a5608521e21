//! Roast Orchestrator
//!
//! Coordinates a validated roast request across the two memoization caches
//! and the two expensive upstreams: signal cache, signal fetch on miss,
//! generation cache, generation on miss, then response assembly. Caches and
//! collaborators are injected at construction; there is no global state.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::RwLock;
use tracing::{error, info};
use uuid::Uuid;

use crate::cache::{GenerationKey, SignalKey, TtlCache};
use crate::error::Result;
use crate::models::{GithubSignals, RoastRequest, RoastResponse, RoastResult};
use crate::services::{RoastGenerator, SignalSource};

/// Shared handle to the signal cache.
pub type SignalCache = Arc<RwLock<TtlCache<GithubSignals>>>;
/// Shared handle to the generation result cache.
pub type GenerationCache = Arc<RwLock<TtlCache<RoastResult>>>;

// == Roast Service ==
pub struct RoastService {
    signal_source: Arc<dyn SignalSource>,
    generator: Arc<dyn RoastGenerator>,
    signal_cache: SignalCache,
    generation_cache: GenerationCache,
}

impl RoastService {
    pub fn new(
        signal_source: Arc<dyn SignalSource>,
        generator: Arc<dyn RoastGenerator>,
        signal_cache: SignalCache,
        generation_cache: GenerationCache,
    ) -> Self {
        Self {
            signal_source,
            generator,
            signal_cache,
            generation_cache,
        }
    }

    // == Handle ==
    /// Produces a composed roast with minimal upstream calls.
    ///
    /// Each cache is only written after its collaborator call fully
    /// succeeds, so failures leave no partial state: a signal fetch failure
    /// caches nothing, and a generation failure leaves the already-populated
    /// signal cache intact for the next attempt. Locks are released before
    /// any upstream await, which means two concurrent misses for the same
    /// key may both invoke the collaborator; the second write simply
    /// overwrites the first.
    pub async fn handle(&self, request: &RoastRequest) -> Result<RoastResponse> {
        let request_id = Uuid::new_v4();
        let started = Instant::now();

        info!(
            %request_id,
            username = %request.username,
            intensity = request.intensity.as_str(),
            "Roast request received"
        );

        let signal_key =
            SignalKey::new(&request.username, request.max_repos, request.include_readme)
                .canonical();

        let cached_signals = { self.signal_cache.write().await.get(&signal_key) };
        let signals = match cached_signals {
            Some(signals) => {
                info!(%request_id, username = %request.username, "GitHub data served from cache");
                signals
            }
            None => {
                let fetch_started = Instant::now();
                let signals = self
                    .signal_source
                    .fetch_signals(&request.username, request.max_repos, request.include_readme)
                    .await
                    .map_err(|e| {
                        error!(%request_id, username = %request.username, error = %e, "GitHub fetch failed");
                        e
                    })?;

                self.signal_cache
                    .write()
                    .await
                    .set(signal_key, signals.clone());
                info!(
                    %request_id,
                    username = %request.username,
                    duration_ms = fetch_started.elapsed().as_millis() as u64,
                    "GitHub data fetched"
                );
                signals
            }
        };

        let generation_key =
            GenerationKey::new(&request.username, request.intensity).canonical();

        let cached_result = { self.generation_cache.write().await.get(&generation_key) };
        let result = match cached_result {
            Some(result) => {
                info!(
                    %request_id,
                    username = %request.username,
                    intensity = request.intensity.as_str(),
                    "Roast result served from cache"
                );
                result
            }
            None => {
                let generation_started = Instant::now();
                let result = self
                    .generator
                    .generate(&signals, request.intensity)
                    .await
                    .map_err(|e| {
                        error!(%request_id, username = %request.username, error = %e, "Roast generation failed");
                        e
                    })?;

                self.generation_cache
                    .write()
                    .await
                    .set(generation_key, result.clone());
                info!(
                    %request_id,
                    username = %request.username,
                    intensity = request.intensity.as_str(),
                    duration_ms = generation_started.elapsed().as_millis() as u64,
                    "Roast generated"
                );
                result
            }
        };

        info!(
            %request_id,
            username = %request.username,
            total_ms = started.elapsed().as_millis() as u64,
            "Roast request completed"
        );

        Ok(RoastResponse {
            request_id,
            username: request.username.clone(),
            signals,
            result,
        })
    }
}
