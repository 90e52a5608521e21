//! API Routes
//!
//! Configures the Axum router: endpoints, CORS, request tracing, and the
//! fixed-window rate-limit middleware applied to every route.

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::HeaderValue,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{TimeZone, Utc};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use super::handlers::{
    health_handler, info_handler, roast_handler, stats_handler, tts_handler, AppState,
};
use crate::error::ApiError;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /roast` - Generate roast, advice and personality profile
/// - `POST /tts` - Convert text to speech
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
/// - `GET /` - API information
///
/// # Middleware
/// - Rate limiting: fixed window per client IP, all routes
/// - CORS: configured allowlist, or any origin when the list is empty
/// - Tracing: logs all requests
pub fn create_router(state: AppState, allowed_origins: &[String]) -> Router {
    let cors = build_cors(allowed_origins);

    Router::new()
        .route("/roast", post(roast_handler))
        .route("/tts", post(tts_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .route("/", get(info_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn build_cors(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        // Development fallback; production deployments set ALLOWED_ORIGINS
        warn!("CORS allowing all origins; set ALLOWED_ORIGINS to restrict");
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

// == Rate Limit Middleware ==
/// Admission check run before every handler.
///
/// Denied requests are answered immediately with 429 and a retry-after hint
/// derived from the window's reset time; admitted responses carry the
/// remaining budget in `X-RateLimit-*` headers.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let client_id = client_identifier(&request);
    let decision = { state.limiter.write().await.check(&client_id) };

    if !decision.allowed {
        let retry_after = Utc
            .timestamp_millis_opt(decision.reset_at as i64)
            .single()
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| decision.reset_at.to_string());
        warn!(client = %client_id, %retry_after, "Rate limit exceeded");
        return ApiError::RateLimited { retry_after }.into_response();
    }

    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    if let Ok(remaining) = HeaderValue::from_str(&decision.remaining.to_string()) {
        headers.insert("x-ratelimit-remaining", remaining);
    }
    if let Ok(reset) = HeaderValue::from_str(&decision.reset_at.to_string()) {
        headers.insert("x-ratelimit-reset", reset);
    }
    response
}

/// Derives the rate-limit key for a request.
///
/// Prefers the first `X-Forwarded-For` hop (deployments behind a proxy),
/// then the peer socket address, then a shared fallback bucket.
fn client_identifier(request: &Request) -> String {
    if let Some(forwarded) = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
    {
        return forwarded.to_string();
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
