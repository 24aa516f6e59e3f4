//! Event type definitions for the metrics pipeline.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cohort::CohortId;
use crate::error::{Error, Result};
use crate::limits::{EXPERIMENT_GROUP_FIELD, SESSION_FINISHED_EVENT, SESSION_ID_FIELD};
use crate::session::SessionKey;

/// Structured payload embedded in every logged event.
///
/// Required keys are still `Option` here so that their absence maps onto
/// [`Error::MissingField`] instead of a generic serde message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchPayload {
    /// Session identifier (string or number)
    pub session_id: Option<Value>,
    /// Experiment group assignment
    #[serde(rename = "experimentGroup")]
    pub experiment_group: Option<Value>,
    /// Indexes of the selected search results, non-null on success
    #[serde(rename = "selectedIndexes")]
    pub selected_indexes: Option<Value>,
}

impl SearchPayload {
    /// Returns the session id, rendering numeric ids as decimal text.
    pub fn require_session_id(&self, line: u64) -> Result<String> {
        match &self.session_id {
            None | Some(Value::Null) => Err(Error::missing_field(line, SESSION_ID_FIELD)),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(Value::Number(n)) => Ok(n.to_string()),
            Some(other) => Err(Error::malformed_payload(
                line,
                format!("{SESSION_ID_FIELD} must be a string or number, got {other}"),
            )),
        }
    }

    /// Returns the experiment group coerced to a cohort id.
    pub fn require_cohort(&self, line: u64) -> Result<CohortId> {
        match &self.experiment_group {
            None | Some(Value::Null) => Err(Error::missing_field(line, EXPERIMENT_GROUP_FIELD)),
            Some(value) => CohortId::from_json(value)
                .ok_or_else(|| Error::invalid_cohort(line, value.to_string())),
        }
    }
}

/// A normalized event, enriched with its session key and cohort.
///
/// Built once by the loader and only read afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    /// Source line in the input file
    pub line: u64,
    /// Logged action name
    pub event_id: String,
    /// Event time (ms since epoch)
    pub time_epoch: i64,
    /// Composite (device, session) identity
    pub session_key: SessionKey,
    /// Experiment group
    pub cohort: CohortId,
    /// Non-null `selectedIndexes` value, if any
    pub selected_indexes: Option<Value>,
}

impl Event {
    /// Creates a new event with no search selection.
    pub fn new(
        session_key: SessionKey,
        cohort: i64,
        event_id: impl Into<String>,
        time_epoch: i64,
    ) -> Self {
        Self {
            line: 0,
            event_id: event_id.into(),
            time_epoch,
            session_key,
            cohort: CohortId(cohort),
            selected_indexes: None,
        }
    }

    /// Set the source line.
    pub fn at_line(mut self, line: u64) -> Self {
        self.line = line;
        self
    }

    /// Set the selected result indexes. `null` counts as no selection.
    pub fn with_selection(mut self, selected: Value) -> Self {
        self.selected_indexes = if selected.is_null() { None } else { Some(selected) };
        self
    }

    pub fn device_id(&self) -> &str {
        &self.session_key.device_id
    }

    pub fn session_id(&self) -> &str {
        &self.session_key.session_id
    }

    /// Whether this is the session-completion sentinel.
    pub fn is_session_finished(&self) -> bool {
        self.event_id == SESSION_FINISHED_EVENT
    }

    /// Whether the user selected a search result in this event.
    pub fn is_successful_search(&self) -> bool {
        self.selected_indexes.is_some()
    }

    /// Event time as a UTC datetime.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.time_epoch).single()
    }
}
