//! API Module
//!
//! HTTP handlers and routing for the roast backend REST API.
//!
//! # Endpoints
//! - `POST /roast` - Generate roast, advice and personality profile
//! - `POST /tts` - Convert text to speech
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint
//! - `GET /` - API information

pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
