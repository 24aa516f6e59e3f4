//! Per-cohort metrics for the search experiment.
//!
//! Every operation takes one cohort's events and is pure; [`analyze`] runs
//! them for each configured cohort and assembles the report.

pub mod cohort;
pub mod duration;
pub mod report;
pub mod search;

pub use cohort::partition_by_cohort;
pub use duration::{average_session_duration, session_spans};
pub use report::{analyze, cohort_report, CohortReport, ExperimentReport};
pub use search::{successful_search_stats, SearchStats};
