//! Fixed-Window Rate Limiter
//!
//! Per-client request counting over the bounded TTL cache. The window is
//! fixed, not sliding: a window is replaced wholesale once its reset time has
//! passed, which permits bursts of up to twice the nominal rate across a
//! window boundary. That is the intended behavior, not a bug.

use std::time::Duration;

use crate::cache::{current_timestamp_ms, TtlCache};
use crate::error::Result;

/// How many distinct clients the window store tracks before LRU eviction.
/// The TTL equal to the window length expires stale clients naturally.
const WINDOW_STORE_CAPACITY: usize = 1000;

// == Window Entry ==
/// One client's state inside the current window.
#[derive(Debug, Clone)]
struct WindowEntry {
    count: u32,
    reset_at: u64,
}

// == Decision ==
/// Outcome of a rate-limit check. Denial is a normal value, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    /// Whether the request may proceed
    pub allowed: bool,
    /// Requests left in the current window
    pub remaining: u32,
    /// When the current window resets (Unix milliseconds)
    pub reset_at: u64,
}

// == Rate Limiter ==
/// Fixed-window per-client request counter.
#[derive(Debug)]
pub struct RateLimiter {
    windows: TtlCache<WindowEntry>,
    max_requests: u32,
    window: Duration,
}

impl RateLimiter {
    // == Constructor ==
    /// Creates a limiter allowing `max_requests` per `window` per client.
    pub fn new(max_requests: u32, window: Duration) -> Result<Self> {
        Ok(Self {
            windows: TtlCache::new(WINDOW_STORE_CAPACITY, window)?,
            max_requests,
            window,
        })
    }

    // == Check ==
    /// Records one request attempt for `client_id` and decides admission.
    ///
    /// A missing or elapsed window starts fresh at count 1. An exhausted
    /// window denies without touching the counter or the reset time, so the
    /// caller can surface `reset_at` as a retry-after hint.
    pub fn check(&mut self, client_id: &str) -> RateLimitDecision {
        let now = current_timestamp_ms();

        let entry = self.windows.get(client_id);
        match entry {
            Some(entry) if now <= entry.reset_at => {
                if entry.count >= self.max_requests {
                    return RateLimitDecision {
                        allowed: false,
                        remaining: 0,
                        reset_at: entry.reset_at,
                    };
                }

                let count = entry.count + 1;
                let reset_at = entry.reset_at;
                self.windows
                    .set(client_id.to_string(), WindowEntry { count, reset_at });
                RateLimitDecision {
                    allowed: true,
                    remaining: self.max_requests - count,
                    reset_at,
                }
            }
            // No window yet, or the previous one has elapsed: replace wholesale
            _ => {
                let reset_at = now + self.window.as_millis() as u64;
                self.windows
                    .set(client_id.to_string(), WindowEntry { count: 1, reset_at });
                RateLimitDecision {
                    allowed: true,
                    remaining: self.max_requests.saturating_sub(1),
                    reset_at,
                }
            }
        }
    }

    // == Sweep Expired ==
    /// Drops window entries whose TTL has elapsed.
    pub fn sweep_expired(&mut self) -> usize {
        self.windows.sweep_expired()
    }

    /// Number of clients currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.windows.len()
    }
}
