//! Loader configuration.

use experiment_core::limits::{DEFAULT_COHORTS, DEFAULT_PAYLOAD_COLUMN};
use experiment_core::CohortId;
use serde::{Deserialize, Serialize};

/// Event loader configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Column holding the serialized JSON payload
    #[serde(default = "default_payload_column")]
    pub payload_column: String,
    /// Valid experiment groups; any other group fails the load
    #[serde(default = "default_cohorts")]
    pub cohorts: Vec<CohortId>,
}

fn default_payload_column() -> String {
    DEFAULT_PAYLOAD_COLUMN.to_string()
}

fn default_cohorts() -> Vec<CohortId> {
    DEFAULT_COHORTS.iter().copied().map(CohortId).collect()
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            payload_column: default_payload_column(),
            cohorts: default_cohorts(),
        }
    }
}

impl LoaderConfig {
    pub fn with_payload_column(mut self, column: impl Into<String>) -> Self {
        self.payload_column = column.into();
        self
    }

    pub fn with_cohorts(mut self, cohorts: impl IntoIterator<Item = i64>) -> Self {
        self.cohorts = cohorts.into_iter().map(CohortId).collect();
        self
    }

    /// Whether `cohort` is one of the configured experiment groups.
    pub fn accepts(&self, cohort: CohortId) -> bool {
        self.cohorts.contains(&cohort)
    }
}
