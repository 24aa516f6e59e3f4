//! Successful-search statistics.

use experiment_core::{Event, MetricValue};
use serde::Serialize;
use tracing::warn;

/// Search outcome counts for one cohort.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SearchStats {
    /// Events carrying a non-null `selectedIndexes`
    pub success_count: u64,
    /// `sessionFinished` events
    pub finished_count: u64,
    /// `success_count / finished_count`
    pub rate: MetricValue,
}

impl SearchStats {
    /// The `(count, rate)` shape, with `0` standing in for an undefined rate.
    pub fn as_tuple(&self) -> (u64, f64) {
        (self.success_count, self.rate.or_zero())
    }

    /// Whether the rate is above 1.
    ///
    /// Successes and finished sessions are counted over different rows, so
    /// this is possible and is reported rather than clamped.
    pub fn exceeds_unity(&self) -> bool {
        self.rate.value().is_some_and(|r| r > 1.0)
    }
}

/// Counts successful searches against completed sessions.
///
/// The two counts come from independent row sets (selection events vs.
/// `sessionFinished` markers); the rate is their plain ratio, not a
/// per-session proportion.
pub fn successful_search_stats(events: &[Event]) -> SearchStats {
    let finished_count = events.iter().filter(|e| e.is_session_finished()).count() as u64;
    let success_count = events.iter().filter(|e| e.is_successful_search()).count() as u64;

    let stats = SearchStats {
        success_count,
        finished_count,
        rate: MetricValue::ratio(success_count, finished_count),
    };

    if stats.exceeds_unity() {
        warn!(
            success_count,
            finished_count,
            "Successful searches outnumber finished sessions"
        );
    }

    stats
}
