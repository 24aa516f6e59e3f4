//! Constants shared by the loader and the metrics engine.

// === Event Vocabulary ===

/// `event_id` of the sentinel event that marks a completed session.
///
/// Used as the denominator of the successful-search rate.
pub const SESSION_FINISHED_EVENT: &str = "sessionFinished";

/// Payload key holding the session identifier.
pub const SESSION_ID_FIELD: &str = "session_id";

/// Payload key holding the experiment group.
pub const EXPERIMENT_GROUP_FIELD: &str = "experimentGroup";

// === Input Columns ===

/// Device identifier column.
pub const DEVICE_ID_COLUMN: &str = "device_id";

/// Event name column.
pub const EVENT_ID_COLUMN: &str = "event_id";

/// Event timestamp column (milliseconds since epoch).
pub const TIME_EPOCH_COLUMN: &str = "time_epoch";

/// Default name of the column holding the serialized payload.
pub const DEFAULT_PAYLOAD_COLUMN: &str = "event_data";

// === Cohorts ===

/// Experiment groups of a plain A/B test.
pub const DEFAULT_COHORTS: [i64; 2] = [0, 1];

// === Duration Reporting ===

/// Milliseconds per second, for converting epoch spans.
pub const MILLIS_PER_SECOND: f64 = 1000.0;

/// Decimal places kept in reported session durations.
pub const DURATION_DECIMALS: i32 = 4;
