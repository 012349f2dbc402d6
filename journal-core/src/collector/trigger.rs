use std::time::{Duration, Instant};

/// Decides when the collector prints a report: every `every` messages, or
/// once `interval` has passed since the previous report.
#[derive(Debug, Clone)]
pub struct ReportTrigger {
    every: u64,
    interval: Duration,
    last_report: Instant,
    since_last: u64,
}

impl ReportTrigger {
    /// `every` must be non-zero; configuration validation guarantees it.
    pub fn new(every: u64, interval: Duration, now: Instant) -> Self {
        Self {
            every: every.max(1),
            interval,
            last_report: now,
            since_last: 0,
        }
    }

    /// Called after each recorded message with the new running total.
    pub fn on_message(&mut self, total: u64, now: Instant) -> bool {
        self.since_last += 1;
        total % self.every == 0 || self.interval_elapsed(now)
    }

    /// Called while the connection is idle. Only fires when messages arrived
    /// since the last report, so an idle stream does not repeat itself.
    pub fn on_idle(&self, now: Instant) -> bool {
        self.since_last > 0 && self.interval_elapsed(now)
    }

    pub fn reported(&mut self, now: Instant) {
        self.last_report = now;
        self.since_last = 0;
    }

    pub fn since_last(&self) -> u64 {
        self.since_last
    }

    fn interval_elapsed(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.last_report) >= self.interval
    }
}
