//! Common test setup functions.

use event_loader::{load_events, LoaderConfig};
use experiment_core::{Event, Result};
use metrics_engine::{analyze, ExperimentReport};

/// Runs the load and analysis stages against in-memory CSV text.
pub struct TestContext {
    pub loader: LoaderConfig,
}

impl TestContext {
    /// Context with the default two-cohort configuration.
    pub fn new() -> Self {
        Self {
            loader: LoaderConfig::default(),
        }
    }

    pub fn with_cohorts(mut self, cohorts: impl IntoIterator<Item = i64>) -> Self {
        self.loader = self.loader.with_cohorts(cohorts);
        self
    }

    pub fn load(&self, csv: &str) -> Result<Vec<Event>> {
        load_events(csv.as_bytes(), &self.loader)
    }

    pub fn analyze(&self, csv: &str) -> Result<ExperimentReport> {
        let events = self.load(csv)?;
        analyze(events, &self.loader.cohorts)
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
