//! Request, response and domain models for the roast backend
//!
//! DTOs for HTTP request/response bodies plus the domain types shared with
//! the upstream collaborators.

pub mod requests;
pub mod responses;
pub mod signals;

// Re-export commonly used types
pub use requests::{RoastRequest, TtsRequest};
pub use responses::{HealthResponse, InfoResponse, RoastResponse, StatsResponse};
pub use signals::{
    GithubSignals, Intensity, ProfileSignals, RepoSignals, RoastProfile, RoastResult,
};
