use std::time::Duration;

use chrono::{DateTime, Utc};

/// Tracks when the car last changed floors and reports when it has been
/// still for longer than the threshold. Purely advisory.
#[derive(Debug, Clone)]
pub struct StallMonitor {
    last_movement_at: DateTime<Utc>,
    threshold: Duration,
}

impl StallMonitor {
    pub fn new(now: DateTime<Utc>, threshold: Duration) -> Self {
        StallMonitor {
            last_movement_at: now,
            threshold,
        }
    }

    pub fn record_movement(&mut self, now: DateTime<Utc>) {
        self.last_movement_at = now;
    }

    pub fn last_movement_at(&self) -> DateTime<Utc> {
        self.last_movement_at
    }

    /// Time since the last movement, if it exceeds the threshold.
    pub fn check(&self, now: DateTime<Utc>) -> Option<Duration> {
        // a clock that went backwards reads as no time passed
        let still_for = (now - self.last_movement_at).to_std().unwrap_or(Duration::ZERO);
        (still_for > self.threshold).then_some(still_for)
    }
}
