//! Periodic refresh timer
//!
//! The timer lives exactly as long as its [`RefreshScheduler`] handle.

use log::warn;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

/// Owns the background task that fires `on_tick` once per period.
#[derive(Debug)]
pub struct RefreshScheduler {
    period: Duration,
    handle: JoinHandle<()>,
}

impl RefreshScheduler {
    /// Starts the timer. The first tick happens one full `period` from now.
    ///
    /// `on_tick` must not block; spawn any real work from it.
    pub fn start<F>(period: Duration, on_tick: F) -> Self
    where
        F: Fn() + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            // A period past the clock's range never elapses.
            let Some(first_tick) = Instant::now().checked_add(period) else {
                warn!("refresh period {:?} is out of range; auto-refresh disabled", period);
                return;
            };
            let mut interval = interval_at(first_tick, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                on_tick();
            }
        });
        Self { period, handle }
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
