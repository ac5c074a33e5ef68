//! Stale rate-limit entry sweeper
//!
//! A background tokio task that periodically purges elapsed windows from
//! every registered limiter. Request handling never waits on it.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::rate_limit::{FixedWindowRateLimiter, RateLimitStore};

/// Handle to a running sweeper. Call [`SweeperHandle::shutdown`] before exit.
#[derive(Debug)]
pub struct SweeperHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Signal the task to stop and wait for it to finish.
    pub async fn shutdown(self) {
        // receiver gone means the task already exited
        let _ = self.shutdown.send(true);

        if let Err(e) = self.task.await {
            tracing::warn!(error = %e, "Rate-limit sweeper task ended abnormally");
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Spawn the sweeper. The first purge runs one `every` after start.
pub fn spawn_sweeper<S>(limiters: Vec<FixedWindowRateLimiter<S>>, every: Duration) -> SweeperHandle
where
    S: RateLimitStore + Send + Sync + 'static,
{
    let (shutdown, mut shutdown_rx) = watch::channel(false);

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + every, every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(
            limiters = limiters.len(),
            interval_secs = every.as_secs(),
            "Rate-limit sweeper started"
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let mut purged = 0;
                    for limiter in &limiters {
                        purged += limiter.sweep().await;
                    }
                    if purged > 0 {
                        tracing::debug!(purged, "Purged stale rate-limit entries");
                    }
                }
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        break;
                    }
                }
            }
        }

        tracing::info!("Rate-limit sweeper stopped");
    });

    SweeperHandle { shutdown, task }
}
