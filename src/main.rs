//! gitroast - GitHub profile roast backend
//!
//! Startup sequence: logging, configuration, upstream clients, shared
//! caches and rate limiter, background expiry sweep, HTTP server with
//! graceful shutdown.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gitroast::api::{create_router, AppState};
use gitroast::config::Config;
use gitroast::services::{ElevenLabsClient, GithubClient, OpenAiClient};
use gitroast::tasks::spawn_cleanup_task;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gitroast=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting gitroast backend");

    let config = Config::from_env()?;
    info!(
        port = config.server_port,
        model = %config.openai_model,
        signal_cache_entries = config.signal_cache_entries,
        generation_cache_entries = config.generation_cache_entries,
        rate_limit = config.rate_limit_max_requests,
        "Configuration loaded"
    );
    if config.github_token.is_none() {
        warn!("GITHUB_TOKEN not set; using unauthenticated GitHub API quota");
    }
    if config.allowed_origins.is_empty() {
        warn!("ALLOWED_ORIGINS not set; CORS will allow all origins");
    }

    let http = reqwest::Client::new();
    let github = Arc::new(GithubClient::new(http.clone(), config.github_token.clone()));
    let openai = Arc::new(OpenAiClient::new(
        http.clone(),
        config.openai_api_key.clone(),
        config.openai_model.clone(),
    ));
    let elevenlabs = Arc::new(ElevenLabsClient::new(
        http,
        config.elevenlabs_api_key.clone(),
    ));

    let state = AppState::new(&config, github, openai, elevenlabs)?;
    info!("Caches and rate limiter initialized");

    let cleanup_handle = spawn_cleanup_task(state.clone(), config.cleanup_interval);

    let app = create_router(state, &config.allowed_origins);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal(cleanup_handle))
    .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the sweep task and allows graceful shutdown.
async fn shutdown_signal(cleanup_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    cleanup_handle.abort();
    warn!("Expiry sweep task aborted");
}
