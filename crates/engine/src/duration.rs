//! Session grouping and duration.

use std::collections::BTreeMap;

use experiment_core::limits::{DURATION_DECIMALS, MILLIS_PER_SECOND};
use experiment_core::{Event, MetricValue, SessionKey, SessionSpan};

/// Groups events by (device, session) and records each session's span.
///
/// Spans come back ordered by session key.
pub fn session_spans(events: &[Event]) -> Vec<SessionSpan> {
    let mut spans: BTreeMap<&SessionKey, SessionSpan> = BTreeMap::new();

    for event in events {
        spans
            .entry(&event.session_key)
            .and_modify(|span| span.record_event(event.time_epoch))
            .or_insert_with(|| SessionSpan::new(event.session_key.clone(), event.time_epoch));
    }

    spans.into_values().collect()
}

/// Mean session duration in seconds, rounded to 4 decimal places.
///
/// Each session lasts from its earliest to its latest event, so a
/// single-event session counts as 0. With no sessions the mean is
/// undefined.
pub fn average_session_duration(events: &[Event]) -> MetricValue {
    mean_duration_secs(&session_spans(events))
}

pub(crate) fn mean_duration_secs(spans: &[SessionSpan]) -> MetricValue {
    if spans.is_empty() {
        return MetricValue::Undefined;
    }

    let total_ms: i128 = spans.iter().map(|s| i128::from(s.duration_ms())).sum();
    let mean_ms = total_ms as f64 / spans.len() as f64;

    MetricValue::Defined(mean_ms / MILLIS_PER_SECOND).rounded(DURATION_DECIMALS)
}
