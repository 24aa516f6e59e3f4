//! Internal pipeline counters.
//!
//! Collected in-memory and logged as a snapshot at the end of a run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// A counter metric.
#[derive(Debug, Default)]
pub struct Counter(AtomicU64);

impl Counter {
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    pub fn inc(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_by(&self, n: u64) {
        self.0.fetch_add(n, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    pub fn reset(&self) -> u64 {
        self.0.swap(0, Ordering::Relaxed)
    }
}

/// Collected counters for one pipeline run.
#[derive(Debug, Default)]
pub struct Metrics {
    // Loader
    pub rows_read: Counter,
    pub events_loaded: Counter,

    // Engine
    pub sessions_grouped: Counter,
    pub cohorts_reported: Counter,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }
}

/// A snapshot of metrics at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub timestamp: DateTime<Utc>,
    pub rows_read: u64,
    pub events_loaded: u64,
    pub sessions_grouped: u64,
    pub cohorts_reported: u64,
}

impl Metrics {
    /// Takes a snapshot of current metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            timestamp: Utc::now(),
            rows_read: self.rows_read.get(),
            events_loaded: self.events_loaded.get(),
            sessions_grouped: self.sessions_grouped.get(),
            cohorts_reported: self.cohorts_reported.get(),
        }
    }

    /// Logs the current snapshot as JSON at debug level.
    pub fn log_snapshot(&self) {
        match serde_json::to_string(&self.snapshot()) {
            Ok(json) => tracing::debug!(snapshot = %json, "Pipeline metrics"),
            Err(e) => tracing::warn!("Failed to serialize metrics snapshot: {}", e),
        }
    }
}

/// Global metrics registry.
pub static METRICS: std::sync::LazyLock<Metrics> = std::sync::LazyLock::new(Metrics::new);

/// Get the global metrics instance.
pub fn metrics() -> &'static Metrics {
    &METRICS
}
