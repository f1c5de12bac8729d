/// Cumulative delivery counters.
///
/// Explicit process-scoped state owned by `PushService`, reachable only
/// through it. `total_sent` and `total_failed` increase monotonically for the
/// life of the process; the subscription count is read live from the store at
/// snapshot time so it cannot drift from prunes and unsubscribes.
use std::sync::atomic::{AtomicU64, Ordering};

use crate::models::{DispatchResult, StatsSnapshot};

#[derive(Debug, Default)]
pub struct StatsAggregator {
    total_sent: AtomicU64,
    total_failed: AtomicU64,
}

impl StatsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one completed dispatch into the counters.
    pub fn record_dispatch(&self, result: &DispatchResult) {
        self.total_sent
            .fetch_add(result.sent as u64, Ordering::Relaxed);
        self.total_failed
            .fetch_add(result.failed as u64, Ordering::Relaxed);
    }

    /// Combine the counters with a live subscription count.
    pub fn snapshot(&self, active_subscriptions: u64) -> StatsSnapshot {
        StatsSnapshot {
            total_sent: self.total_sent.load(Ordering::Relaxed),
            total_failed: self.total_failed.load(Ordering::Relaxed),
            active_subscriptions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(sent: usize, failed: usize) -> DispatchResult {
        DispatchResult {
            sent,
            failed,
            total: sent + failed,
            outcomes: Vec::new(),
        }
    }

    #[test]
    fn test_counters_accumulate_across_dispatches() {
        let stats = StatsAggregator::new();
        stats.record_dispatch(&result(3, 1));
        stats.record_dispatch(&result(2, 2));

        let snapshot = stats.snapshot(7);
        assert_eq!(snapshot.total_sent, 5);
        assert_eq!(snapshot.total_failed, 3);
        assert_eq!(snapshot.active_subscriptions, 7);
    }

    #[test]
    fn test_empty_dispatch_leaves_counters_unchanged() {
        let stats = StatsAggregator::new();
        stats.record_dispatch(&result(0, 0));

        let snapshot = stats.snapshot(0);
        assert_eq!(snapshot.total_sent, 0);
        assert_eq!(snapshot.total_failed, 0);
    }
}
