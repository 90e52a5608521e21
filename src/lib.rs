//! gitroast - GitHub profile roast backend
//!
//! Gathers profile signals from GitHub, forwards them to a generation
//! upstream, and returns a composed roast, with dual-layer caching and
//! fixed-window rate limiting between requests and the expensive upstreams.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod ratelimit;
pub mod services;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_cleanup_task;
