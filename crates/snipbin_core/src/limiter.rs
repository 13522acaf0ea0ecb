//! Per-client fixed-window rate limiting.
//!
//! Process-local and advisory: horizontally scaled deployments get
//! independent quotas per instance. The state lives behind a shared
//! handle so a distributed backend can replace it without touching the
//! write path. Key cardinality is unbounded by design.

use crate::constants::{RATE_LIMIT_MAX_REQUESTS, RATE_LIMIT_WINDOW_SECS};
use dashmap::DashMap;
use std::time::{Duration, Instant};

/// Outcome of a rate limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    /// Requests left in the current window after this one.
    pub remaining: u32,
}

#[derive(Debug)]
struct Window {
    count: u32,
    reset_at: Instant,
}

/// Fixed-window limiter keyed by client network address.
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    windows: DashMap<String, Window>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::with_limits(
            RATE_LIMIT_MAX_REQUESTS,
            Duration::from_secs(RATE_LIMIT_WINDOW_SECS),
        )
    }

    /// Create a limiter with custom limits.
    pub fn with_limits(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            windows: DashMap::new(),
        }
    }

    /// Requests allowed per window per key.
    pub fn limit(&self) -> u32 {
        self.max_requests
    }

    /// Window length in seconds, for `Retry-After` headers.
    pub fn window_secs(&self) -> u64 {
        self.window.as_secs()
    }

    /// Record a request for `key` and decide whether it is allowed.
    ///
    /// Counter mutation is atomic per key: the dashmap entry guard is
    /// held for the whole read-modify-write.
    pub fn check(&self, key: &str) -> RateLimitDecision {
        self.check_at(key, Instant::now())
    }

    fn check_at(&self, key: &str, now: Instant) -> RateLimitDecision {
        let mut window = self
            .windows
            .entry(key.to_string())
            .or_insert_with(|| Window {
                count: 0,
                reset_at: now + self.window,
            });

        if now >= window.reset_at {
            window.count = 0;
            window.reset_at = now + self.window;
        }

        if window.count >= self.max_requests {
            return RateLimitDecision {
                allowed: false,
                remaining: 0,
            };
        }

        window.count += 1;
        RateLimitDecision {
            allowed: true,
            remaining: self.max_requests - window.count,
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
