//! Per-cohort report assembly and rendering.

use std::fmt;

use experiment_core::{CohortId, Event, MetricValue, Result};
use serde::Serialize;
use telemetry::metrics;
use tracing::{debug, info};

use crate::cohort::partition_by_cohort;
use crate::duration::{mean_duration_secs, session_spans};
use crate::search::{successful_search_stats, SearchStats};

/// Metrics for one experiment group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CohortReport {
    pub cohort: CohortId,
    /// Events assigned to this cohort
    pub event_count: usize,
    /// Distinct (device, session) pairs
    pub session_count: usize,
    pub search: SearchStats,
    /// Mean session duration in seconds (4 decimals)
    pub average_session_duration: MetricValue,
}

/// Builds the report block for one cohort's events.
pub fn cohort_report(cohort: CohortId, events: &[Event]) -> CohortReport {
    let spans = session_spans(events);
    let search = successful_search_stats(events);
    let average_session_duration = mean_duration_secs(&spans);

    metrics().sessions_grouped.inc_by(spans.len() as u64);
    metrics().cohorts_reported.inc();

    debug!(
        %cohort,
        events = events.len(),
        sessions = spans.len(),
        successes = search.success_count,
        finished = search.finished_count,
        "Computed cohort metrics"
    );

    CohortReport {
        cohort,
        event_count: events.len(),
        session_count: spans.len(),
        search,
        average_session_duration,
    }
}

/// Report over all configured cohorts, in ascending cohort order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperimentReport {
    pub total_events: usize,
    pub cohorts: Vec<CohortReport>,
}

impl ExperimentReport {
    pub fn cohort(&self, id: CohortId) -> Option<&CohortReport> {
        self.cohorts.iter().find(|c| c.cohort == id)
    }
}

/// Partitions `events` by cohort and computes every cohort's metrics.
///
/// Fails if an event belongs to a cohort outside `cohorts`.
pub fn analyze(events: Vec<Event>, cohorts: &[CohortId]) -> Result<ExperimentReport> {
    let total_events = events.len();
    let groups = partition_by_cohort(events, cohorts)?;

    let cohorts: Vec<CohortReport> = groups
        .iter()
        .map(|(&cohort, events)| cohort_report(cohort, events))
        .collect();

    info!(
        total_events,
        cohorts = cohorts.len(),
        "Experiment metrics computed"
    );

    Ok(ExperimentReport {
        total_events,
        cohorts,
    })
}

impl fmt::Display for CohortReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self.cohort;
        writeln!(f)?;
        writeln!(f, "Group {id} size: {}", self.event_count)?;
        writeln!(f, "Group {id} successful searches: {}", self.search.success_count)?;
        writeln!(
            f,
            "Group {id} percentage of successful searches: {}",
            self.search.rate
        )?;
        writeln!(
            f,
            "Group {id} average time spent on the Search Everywhere tab: {}{}",
            self.average_session_duration,
            if self.average_session_duration.is_defined() { "s" } else { "" }
        )
    }
}

impl fmt::Display for ExperimentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cohort in &self.cohorts {
            write!(f, "{cohort}")?;
        }
        Ok(())
    }
}
