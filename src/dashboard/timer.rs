use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{self, Interval, MissedTickBehavior};

/// Cancellable refresh timer.
///
/// Wraps a tokio interval together with a stop signal so the hosting loop
/// can wait for the next cycle or shut down cleanly. The first tick fires
/// immediately, which gives the dashboard its initial fetch.
pub struct RefreshTimer {
    interval: Interval,
    stop_rx: watch::Receiver<bool>,
}

/// Handle used to stop a [`RefreshTimer`] from anywhere.
pub struct StopHandle {
    tx: watch::Sender<bool>,
}

impl StopHandle {
    pub fn stop(&self) {
        let _ = self.tx.send(true);
    }
}

impl RefreshTimer {
    pub fn new(period: Duration) -> (Self, StopHandle) {
        let (tx, stop_rx) = watch::channel(false);
        (
            Self {
                interval: build_interval(period),
                stop_rx,
            },
            StopHandle { tx },
        )
    }

    /// Replace the tick period. The next tick fires immediately, matching
    /// the refresh the user expects after changing the interval.
    pub fn set_period(&mut self, period: Duration) {
        self.interval = build_interval(period);
    }

    /// Wait for the next tick. Returns `false` once the stop handle fired
    /// or was dropped; no further ticks will be produced.
    pub async fn tick(&mut self) -> bool {
        loop {
            if *self.stop_rx.borrow() {
                return false;
            }
            tokio::select! {
                _ = self.interval.tick() => return true,
                changed = self.stop_rx.changed() => {
                    if changed.is_err() {
                        return false;
                    }
                }
            }
        }
    }
}

fn build_interval(period: Duration) -> Interval {
    let mut interval = time::interval(period);
    // A slow fetch cycle must not cause a burst of catch-up ticks.
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}
