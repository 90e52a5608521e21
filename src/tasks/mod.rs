//! Background Tasks Module
//!
//! Periodic work that runs alongside the server.
//!
//! # Tasks
//! - Expiry sweep: removes expired cache and rate-limit entries at
//!   configured intervals

mod cleanup;

pub use cleanup::spawn_cleanup_task;
