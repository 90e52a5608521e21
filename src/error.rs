//! Error types for the roast backend
//!
//! Provides unified error handling using thiserror. Each variant carries an
//! API error code so the routing layer can map failures to responses without
//! inspecting message strings.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Api Error Enum ==
/// Unified error type for the roast backend.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed or out-of-range request data
    #[error("Validation error: {0}")]
    BadRequest(String),

    /// GitHub signal fetch failed (auth, rate limit, not found, network)
    #[error("GitHub API error: {0}")]
    SignalSource(String),

    /// Roast generation failed or returned structurally invalid output
    #[error("OpenAI API error: {0}")]
    Generation(String),

    /// Text-to-speech synthesis failed
    #[error("ElevenLabs API error: {0}")]
    Speech(String),

    /// Client exhausted its fixed rate-limit window
    #[error("Rate limit exceeded. Try again after {retry_after}")]
    RateLimited {
        /// Window reset time, ISO 8601
        retry_after: String,
    },

    /// Invalid startup configuration (zero cache capacity, bad parameters)
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Stable machine-readable error code carried in response bodies.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::SignalSource(_) => "GITHUB_ERROR",
            ApiError::Generation(_) => "OPENAI_ERROR",
            ApiError::RateLimited { .. } => "RATE_LIMIT",
            ApiError::Speech(_) | ApiError::Config(_) | ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            ApiError::SignalSource(_)
            | ApiError::Generation(_)
            | ApiError::Speech(_)
            | ApiError::Config(_)
            | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the roast backend.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ApiError::BadRequest("x".into()).code(), "BAD_REQUEST");
        assert_eq!(ApiError::SignalSource("x".into()).code(), "GITHUB_ERROR");
        assert_eq!(ApiError::Generation("x".into()).code(), "OPENAI_ERROR");
        assert_eq!(
            ApiError::RateLimited {
                retry_after: "soon".into()
            }
            .code(),
            "RATE_LIMIT"
        );
        assert_eq!(ApiError::Speech("x".into()).code(), "INTERNAL_ERROR");
        assert_eq!(ApiError::Internal("x".into()).code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_error_status_codes() {
        let cases = vec![
            (ApiError::BadRequest("bad".into()), StatusCode::BAD_REQUEST),
            (
                ApiError::SignalSource("down".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ApiError::Generation("down".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ApiError::RateLimited {
                    retry_after: "soon".into(),
                },
                StatusCode::TOO_MANY_REQUESTS,
            ),
            (
                ApiError::Internal("oops".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            let response = error.into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[tokio::test]
    async fn test_error_body_shape() {
        let response = ApiError::SignalSource("user not found".into()).into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["error"]["code"].as_str().unwrap(), "GITHUB_ERROR");
        assert!(json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("user not found"));
    }
}
