//! In-memory rate limit store
//!
//! Process-local table shared by every request handled by this process.

use dashmap::DashMap;

use crate::rate_limit::{RateLimitEntry, RateLimitStore};

/// [`RateLimitStore`] backed by a sharded concurrent map
#[derive(Debug, Default)]
pub struct MemoryRateLimitStore {
    entries: DashMap<String, RateLimitEntry>,
}

impl MemoryRateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RateLimitStore for MemoryRateLimitStore {
    async fn get(&self, key: &str) -> Option<RateLimitEntry> {
        self.entries.get(key).map(|entry| *entry.value())
    }

    async fn set(&self, key: &str, entry: RateLimitEntry) {
        self.entries.insert(key.to_owned(), entry);
    }

    async fn purge_started_before(&self, cutoff_ms: i64) -> usize {
        let mut removed = 0;
        self.entries.retain(|_, entry| {
            let keep = entry.window_start_ms >= cutoff_ms;
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }

    async fn len(&self) -> usize {
        self.entries.len()
    }
}
