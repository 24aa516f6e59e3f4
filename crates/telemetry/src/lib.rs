//! Internal telemetry for the metrics pipeline.
//!
//! Logs go to stderr so that stdout carries only the report.

pub mod metrics;
pub mod tracing_setup;

pub use metrics::*;
pub use tracing_setup::*;
