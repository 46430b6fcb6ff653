use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics registry for the application.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Action invocations received
    pub actions_total: AtomicU64,

    /// Action invocations that reported failure
    pub actions_failed: AtomicU64,

    /// Policy document renders served
    pub policy_renders_total: AtomicU64,

    /// Connectivity probes issued
    pub connectivity_checks_total: AtomicU64,

    /// Connectivity probes that failed
    pub connectivity_failures_total: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry.
    pub fn new() -> Self {
        MetricsRegistry::default()
    }

    pub fn record_action(&self) {
        self.actions_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_action_failure(&self) {
        self.actions_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_policy_render(&self) {
        self.policy_renders_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_connectivity_check(&self) {
        self.connectivity_checks_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_connectivity_failure(&self) {
        self.connectivity_failures_total.fetch_add(1, Ordering::Relaxed);
    }
}
