//! Rate Limiting Infrastructure
//!
//! Fixed-window counters keyed by client identifier.
//!
//! ## Known imprecision
//! - A fixed window admits up to `2 × max_requests` around a window boundary
//!   (the tail of one window plus the head of the next).
//! - `get` and `set` are separate store calls, so two concurrent requests
//!   for the same key may both read the same count. The limiter can be off
//!   by one increment under such interleaving; it is a coarse abuse
//!   throttle, not an accounting system.

use std::sync::Arc;
use std::time::Duration;

use crate::clock::Clock;

/// Rate limit configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Maximum requests allowed in the window
    pub max_requests: u32,
    /// Time window duration
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self::per_minute(60)
    }
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }

    pub fn per_minute(max_requests: u32) -> Self {
        Self::new(max_requests, 60)
    }

    pub fn per_hour(max_requests: u32) -> Self {
        Self::new(max_requests, 3600)
    }

    pub fn window_ms(&self) -> i64 {
        self.window.as_millis() as i64
    }
}

/// Counter state for one client identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitEntry {
    pub count: u32,
    pub window_start_ms: i64,
}

impl RateLimitEntry {
    /// First request of a new window
    pub fn start(now_ms: i64) -> Self {
        Self {
            count: 1,
            window_start_ms: now_ms,
        }
    }

    /// Whether the window this entry belongs to has elapsed
    pub fn is_expired(&self, now_ms: i64, window_ms: i64) -> bool {
        now_ms - self.window_start_ms > window_ms
    }
}

/// Rate limit check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    /// Count after this request was recorded
    pub count: u32,
    pub remaining: u32,
    pub reset_at_ms: i64,
}

/// Trait for rate limit storage backends
#[trait_variant::make(RateLimitStore: Send)]
pub trait LocalRateLimitStore {
    /// Current entry for a key, if any
    async fn get(&self, key: &str) -> Option<RateLimitEntry>;

    /// Insert or overwrite the entry for a key
    async fn set(&self, key: &str, entry: RateLimitEntry);

    /// Remove entries whose window started before `cutoff_ms`.
    /// Returns the number of entries removed.
    async fn purge_started_before(&self, cutoff_ms: i64) -> usize;

    /// Number of tracked keys
    async fn len(&self) -> usize;
}

/// Fixed-window limiter over an injectable [`RateLimitStore`].
pub struct FixedWindowRateLimiter<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    config: RateLimitConfig,
}

impl<S> Clone for FixedWindowRateLimiter<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            clock: self.clock.clone(),
            config: self.config.clone(),
        }
    }
}

impl<S> FixedWindowRateLimiter<S>
where
    S: RateLimitStore + Send + Sync + 'static,
{
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>, config: RateLimitConfig) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Record one request for `key` and decide whether it is allowed.
    ///
    /// An absent or elapsed entry restarts the window at `count = 1`.
    /// Otherwise the count is incremented (also when the request is
    /// rejected) and the request is allowed while `count <= max_requests`.
    pub async fn check(&self, key: &str) -> RateLimitDecision {
        let now_ms = self.clock.now_ms();
        let window_ms = self.config.window_ms();

        let entry = match self.store.get(key).await {
            Some(entry) if !entry.is_expired(now_ms, window_ms) => RateLimitEntry {
                count: entry.count.saturating_add(1),
                ..entry
            },
            _ => RateLimitEntry::start(now_ms),
        };

        self.store.set(key, entry).await;

        RateLimitDecision {
            allowed: entry.count <= self.config.max_requests,
            count: entry.count,
            remaining: self.config.max_requests.saturating_sub(entry.count),
            reset_at_ms: entry.window_start_ms + window_ms,
        }
    }

    /// Drop entries whose window has elapsed. Returns how many were removed.
    pub async fn sweep(&self) -> usize {
        let cutoff_ms = self.clock.now_ms() - self.config.window_ms();
        self.store.purge_started_before(cutoff_ms).await
    }
}
