use crate::collector::constants::LAST_HOUR;
use crate::importance::Importance;
use std::collections::VecDeque;

/// Running statistics over every message the collector has seen.
///
/// Invariants:
/// - `avg_len` is the mean of all lengths so far, maintained incrementally
/// - the per-importance counts sum to `total`
/// - after `record`, every `last_hour` sample is at most `LAST_HOUR` seconds
///   older than the `now` passed in
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageStats {
    total: u64,
    min_len: usize,
    max_len: usize,
    avg_len: f64,
    by_importance: [u64; Importance::ALL.len()],
    last_hour: VecDeque<(i64, usize)>,
}

impl MessageStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one received message in. `now` is wall-clock seconds since the
    /// Unix epoch.
    pub fn record(&mut self, message: &str, now: i64) -> Importance {
        let len = message.len();
        let importance = Importance::from_tagged(message);

        self.total += 1;
        if self.total == 1 {
            self.min_len = len;
            self.max_len = len;
        } else {
            self.min_len = self.min_len.min(len);
            self.max_len = self.max_len.max(len);
        }
        let n = self.total as f64;
        self.avg_len = (self.avg_len * (n - 1.0) + len as f64) / n;

        self.by_importance[importance.index()] += 1;

        self.last_hour.push_back((now, len));
        self.prune(now);

        importance
    }

    fn prune(&mut self, now: i64) {
        self.last_hour
            .retain(|(timestamp, _)| now - timestamp <= LAST_HOUR);
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn min_len(&self) -> usize {
        self.min_len
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn avg_len(&self) -> f64 {
        self.avg_len
    }

    pub fn by_importance(&self, importance: Importance) -> u64 {
        self.by_importance[importance.index()]
    }

    /// Number of messages recorded within the last hour as of the latest
    /// update.
    pub fn last_hour_count(&self) -> usize {
        self.last_hour.len()
    }

    pub fn last_hour(&self) -> impl Iterator<Item = (i64, usize)> + '_ {
        self.last_hour.iter().copied()
    }
}
