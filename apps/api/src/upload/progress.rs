//! Simulated upload progress.
//!
//! The counter starts at 0 and moves by a fixed step on every tick until it
//! reaches the cap, where the ticker stops on its own. The orchestrator
//! cancels the ticker when the upload settles and sets the final value itself.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::clock::Clock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Advanced(u8),
    /// The cap was already reached; the ticker should stop.
    Capped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSimulator {
    pub step: u8,
    pub cap: u8,
}

impl ProgressSimulator {
    pub fn new(step: u8, cap: u8) -> Self {
        Self { step, cap }
    }

    pub fn advance(&self, current: u8) -> Tick {
        if current >= self.cap {
            return Tick::Capped;
        }
        Tick::Advanced(current.saturating_add(self.step).min(self.cap))
    }
}

/// A recurring timer task. Aborted when cancelled or dropped, so it can never
/// outlive the upload that started it.
pub struct ProgressTicker {
    handle: JoinHandle<()>,
}

impl ProgressTicker {
    /// Calls `on_tick` every `interval` until it returns `false`.
    pub fn spawn<F>(clock: Arc<dyn Clock>, interval: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() -> bool + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            loop {
                clock.sleep(interval).await;
                if !on_tick() {
                    debug!("Progress ticker stopped");
                    break;
                }
            }
        });
        Self { handle }
    }

    pub fn cancel(self) {
        // Drop does the work.
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
