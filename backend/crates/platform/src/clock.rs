//! Clock port
//!
//! Wall-clock time in milliseconds since the Unix epoch. Client-declared
//! form timestamps use the same unit, so both sides of an elapsed-time
//! comparison come from one source of truth.

use chrono::Utc;
use std::fmt::Debug;

/// Source of the current time.
pub trait Clock: Send + Sync + Debug {
    /// Milliseconds since the Unix epoch.
    fn now_ms(&self) -> i64;
}

/// System clock backed by `chrono::Utc::now()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

#[cfg(any(test, feature = "test-helpers"))]
pub use mock::MockClock;

#[cfg(any(test, feature = "test-helpers"))]
mod mock {
    use super::Clock;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::time::Duration;

    /// Manually driven clock for tests.
    ///
    /// Clones share the same time value.
    #[derive(Debug, Clone)]
    pub struct MockClock {
        now_ms: Arc<AtomicI64>,
    }

    impl MockClock {
        pub fn new(start_ms: i64) -> Self {
            Self {
                now_ms: Arc::new(AtomicI64::new(start_ms)),
            }
        }

        pub fn advance(&self, duration: Duration) {
            self.now_ms
                .fetch_add(duration.as_millis() as i64, Ordering::SeqCst);
        }

        pub fn set(&self, now_ms: i64) {
            self.now_ms.store(now_ms, Ordering::SeqCst);
        }
    }

    impl Clock for MockClock {
        fn now_ms(&self) -> i64 {
            self.now_ms.load(Ordering::SeqCst)
        }
    }
}
