use std::time::Duration;

use once_cell::sync::Lazy;
use prometheus::{Histogram, HistogramOpts, IntCounter, Opts};

use crate::models::DispatchResult;

static NOTIFICATIONS_SENT_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    let counter = IntCounter::with_opts(Opts::new(
        "push_service_notifications_sent_total",
        "Deliveries accepted by push services",
    ))
    .expect("failed to create push_service_notifications_sent_total");
    prometheus::default_registry()
        .register(Box::new(counter.clone()))
        .expect("failed to register push_service_notifications_sent_total");
    counter
});

static NOTIFICATIONS_FAILED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    let counter = IntCounter::with_opts(Opts::new(
        "push_service_notifications_failed_total",
        "Failed delivery attempts, transient and permanent",
    ))
    .expect("failed to create push_service_notifications_failed_total");
    prometheus::default_registry()
        .register(Box::new(counter.clone()))
        .expect("failed to register push_service_notifications_failed_total");
    counter
});

static SUBSCRIPTIONS_PRUNED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    let counter = IntCounter::with_opts(Opts::new(
        "push_service_subscriptions_pruned_total",
        "Subscriptions removed after a permanent delivery failure",
    ))
    .expect("failed to create push_service_subscriptions_pruned_total");
    prometheus::default_registry()
        .register(Box::new(counter.clone()))
        .expect("failed to register push_service_subscriptions_pruned_total");
    counter
});

static DISPATCH_DURATION_SECONDS: Lazy<Histogram> = Lazy::new(|| {
    let histogram = Histogram::with_opts(
        HistogramOpts::new(
            "push_service_dispatch_duration_seconds",
            "Wall-clock duration of one dispatch call",
        )
        .buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
    )
    .expect("failed to create push_service_dispatch_duration_seconds");
    prometheus::default_registry()
        .register(Box::new(histogram.clone()))
        .expect("failed to register push_service_dispatch_duration_seconds");
    histogram
});

/// Record one completed dispatch call.
pub fn observe_dispatch(result: &DispatchResult, elapsed: Duration) {
    NOTIFICATIONS_SENT_TOTAL.inc_by(result.sent as u64);
    NOTIFICATIONS_FAILED_TOTAL.inc_by(result.failed as u64);
    DISPATCH_DURATION_SECONDS.observe(elapsed.as_secs_f64());
}

/// Record one pruned subscription.
pub fn inc_pruned() {
    SUBSCRIPTIONS_PRUNED_TOTAL.inc();
}
