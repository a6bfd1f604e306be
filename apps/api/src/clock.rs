//! Clock abstraction for the simulated delays and progress ticks.
//!
//! Every timer in the service goes through `Clock::sleep`, so tests can run the
//! whole upload flow under tokio's paused virtual time.

use std::time::Duration;

use async_trait::async_trait;

#[async_trait]
pub trait Clock: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Default clock backed by `tokio::time`. Honors `tokio::time::pause()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
