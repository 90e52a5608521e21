//! Expiry Sweep Task
//!
//! Background task that periodically removes expired entries from both
//! memoization caches and the rate-limit window store. Correctness never
//! depends on it (`get` and `check` handle expiry themselves); the sweep
//! just reclaims memory for entries nobody asks for again.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::api::AppState;

/// Spawns a background task that periodically sweeps expired entries.
///
/// Returns a JoinHandle which can be used to abort the task during graceful
/// shutdown.
pub fn spawn_cleanup_task(state: AppState, cleanup_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs);

    tokio::spawn(async move {
        info!(
            interval_secs = cleanup_interval_secs,
            "Starting expiry sweep task"
        );

        loop {
            tokio::time::sleep(interval).await;

            let signals = { state.signal_cache.write().await.sweep_expired() };
            let generations = { state.generation_cache.write().await.sweep_expired() };
            let windows = { state.limiter.write().await.sweep_expired() };

            let removed = signals + generations + windows;
            if removed > 0 {
                info!(
                    signals,
                    generations, windows, "Expiry sweep removed stale entries"
                );
            } else {
                debug!("Expiry sweep found nothing to remove");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::config::Config;
    use crate::error::Result;
    use crate::models::{GithubSignals, Intensity, ProfileSignals, RoastProfile, RoastResult};
    use crate::services::{RoastGenerator, SignalSource, SpeechSynthesizer};

    struct Stub;

    #[async_trait]
    impl SignalSource for Stub {
        async fn fetch_signals(
            &self,
            _username: &str,
            _max_repos: u8,
            _include_readme: bool,
        ) -> Result<GithubSignals> {
            Ok(GithubSignals {
                profile: ProfileSignals {
                    public_repos: 0,
                    followers: 0,
                    created_at: "2020-01-01T00:00:00Z".to_string(),
                    bio: None,
                    location: None,
                    company: None,
                },
                top_repos: vec![],
            })
        }
    }

    #[async_trait]
    impl RoastGenerator for Stub {
        async fn generate(
            &self,
            _signals: &GithubSignals,
            _intensity: Intensity,
        ) -> Result<RoastResult> {
            Ok(RoastResult {
                roast: "r".to_string(),
                advice: vec!["a".to_string()],
                profile: RoastProfile {
                    archetype: "x".to_string(),
                    strengths: vec![],
                    blind_spots: vec![],
                },
            })
        }
    }

    #[async_trait]
    impl SpeechSynthesizer for Stub {
        async fn synthesize(
            &self,
            _text: &str,
            _voice_id: &str,
            _model_id: &str,
        ) -> Result<Vec<u8>> {
            Ok(vec![])
        }
    }

    fn short_ttl_state() -> AppState {
        let config = Config {
            signal_cache_ttl_ms: 100,
            generation_cache_ttl_ms: 100,
            ..Config::default()
        };
        AppState::new(&config, Arc::new(Stub), Arc::new(Stub), Arc::new(Stub)).unwrap()
    }

    #[tokio::test]
    async fn test_cleanup_removes_expired_entries() {
        let state = short_ttl_state();

        {
            let signals = Stub.fetch_signals("alice", 5, false).await.unwrap();
            state
                .signal_cache
                .write()
                .await
                .set("alice:5:false".to_string(), signals);
        }

        let handle = spawn_cleanup_task(state.clone(), 1);

        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert!(state.signal_cache.read().await.is_empty());
        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_preserves_live_entries() {
        let config = Config::default(); // 5-minute signal TTL
        let state =
            AppState::new(&config, Arc::new(Stub), Arc::new(Stub), Arc::new(Stub)).unwrap();

        {
            let signals = Stub.fetch_signals("alice", 5, false).await.unwrap();
            state
                .signal_cache
                .write()
                .await
                .set("alice:5:false".to_string(), signals);
        }

        let handle = spawn_cleanup_task(state.clone(), 1);
        tokio::time::sleep(Duration::from_millis(1200)).await;

        assert_eq!(state.signal_cache.read().await.len(), 1);
        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_can_be_aborted() {
        let state = short_ttl_state();
        let handle = spawn_cleanup_task(state, 1);

        handle.abort();
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished());
    }
}
