//! Cache Module
//!
//! Bounded in-memory caching with TTL expiration and LRU eviction, plus the
//! structured keys used by the two memoization layers.

mod entry;
mod keys;
mod lru;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry};
pub use keys::{GenerationKey, SignalKey};
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::TtlCache;
