//! Row normalization: payload parsing and enrichment.

use experiment_core::schema::{validate_session_key, validate_time_epoch};
use experiment_core::{Error, Event, Result, SearchPayload, SessionKey};
use serde_json::Value;

use crate::config::LoaderConfig;
use crate::reader::RawRecord;

/// Parses a row's serialized payload into its declared shape.
pub fn parse_payload(line: u64, raw: &str) -> Result<SearchPayload> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| Error::malformed_payload(line, e.to_string()))?;

    if !value.is_object() {
        let kind = match value {
            Value::Null => "null",
            Value::Bool(_) => "a boolean",
            Value::Number(_) => "a number",
            Value::String(_) => "a string",
            Value::Array(_) => "an array",
            Value::Object(_) => "an object",
        };
        return Err(Error::malformed_payload(
            line,
            format!("expected a JSON object, got {kind}"),
        ));
    }

    serde_json::from_value(value).map_err(|e| Error::malformed_payload(line, e.to_string()))
}

/// Turns one raw row into an enriched event.
///
/// Fails on the first problem found; the caller aborts the whole load.
pub fn normalize_record(line: u64, raw: &RawRecord, config: &LoaderConfig) -> Result<Event> {
    let payload = parse_payload(line, &raw.payload)?;
    let session_id = payload.require_session_id(line)?;
    let cohort = payload.require_cohort(line)?;

    if !config.accepts(cohort) {
        let expected: Vec<String> = config.cohorts.iter().map(|c| c.to_string()).collect();
        return Err(Error::invalid_cohort(
            line,
            format!("{cohort} (expected one of {})", expected.join(", ")),
        ));
    }

    let time_epoch = validate_time_epoch(line, &raw.time_epoch)?;

    let session_key = SessionKey::new(raw.device_id.clone(), session_id);
    validate_session_key(line, &session_key)?;

    Ok(Event {
        line,
        event_id: raw.event_id.clone(),
        time_epoch,
        session_key,
        cohort,
        selected_indexes: payload.selected_indexes,
    })
}
