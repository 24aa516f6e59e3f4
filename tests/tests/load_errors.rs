//! Tests for error handling in the load stage.
//!
//! Every hard error aborts the run and points at the offending line.

use experiment_core::Error;
use integration_tests::{
    fixtures::{payload, raw_row, EventLog},
    setup::TestContext,
};

fn log_with_bad_row(row: String) -> String {
    EventLog::new()
        .finished("d1", "s1", 0, 1_000)
        .row(row)
        .finished("d2", "s2", 1, 2_000)
        .build()
}

/// Test non-JSON payload returns PAYLOAD_001 on line 3
#[test]
fn test_malformed_payload() {
    let csv = log_with_bad_row(raw_row("d9", "searchStarted", "1000", "{session_id: s9"));

    let err = TestContext::new().analyze(&csv).unwrap_err();
    assert!(matches!(err, Error::MalformedPayload { line: 3, .. }), "{err}");
    assert_eq!(err.error_code(), Some("PAYLOAD_001"));
}

/// Test payload missing session_id returns PAYLOAD_002
#[test]
fn test_missing_session_id() {
    let csv = log_with_bad_row(raw_row(
        "d9",
        "searchStarted",
        "1000",
        r#"{"experimentGroup": 0}"#,
    ));

    let err = TestContext::new().analyze(&csv).unwrap_err();
    assert!(
        matches!(err, Error::MissingField { line: 3, field: "session_id" }),
        "{err}"
    );
}

/// Test payload missing experimentGroup returns PAYLOAD_002
#[test]
fn test_missing_experiment_group() {
    let csv = log_with_bad_row(raw_row(
        "d9",
        "searchStarted",
        "1000",
        r#"{"session_id": "s9"}"#,
    ));

    let err = TestContext::new().analyze(&csv).unwrap_err();
    assert!(
        matches!(err, Error::MissingField { line: 3, field: "experimentGroup" }),
        "{err}"
    );
}

/// Test out-of-range cohort fails instead of being dropped
#[test]
fn test_unknown_cohort() {
    let bad = payload("s9", 7).to_string();
    let csv = log_with_bad_row(raw_row("d9", "searchStarted", "1000", &bad));

    let err = TestContext::new().analyze(&csv).unwrap_err();
    assert!(matches!(err, Error::InvalidCohort { line: 3, .. }), "{err}");
    assert_eq!(err.exit_code(), 4);
}

/// Test missing or non-numeric time_epoch returns TIME_001
#[test]
fn test_invalid_timestamps() {
    let good = payload("s9", 0).to_string();
    for cell in ["", "soon", "1.5", "-20"] {
        let csv = log_with_bad_row(raw_row("d9", "searchStarted", cell, &good));

        let err = TestContext::new().analyze(&csv).unwrap_err();
        assert!(
            matches!(err, Error::InvalidTimestamp { line: 3, .. }),
            "{cell:?}: {err}"
        );
        assert_eq!(err.exit_code(), 5);
    }
}

/// Test missing payload column returns LOAD_003
#[test]
fn test_missing_payload_column() {
    let csv = "device_id,event_id,time_epoch,data\nd,x,1,{}\n";

    let err = TestContext::new().load(csv).unwrap_err();
    assert_eq!(err.error_code(), Some("LOAD_003"));
}

/// Test the first bad row wins and nothing partial is returned
#[test]
fn test_first_error_aborts() {
    let csv = EventLog::new()
        .row(raw_row("d1", "x", "1", "not json"))
        .row(raw_row("d2", "x", "oops", r#"{"session_id": "s", "experimentGroup": 0}"#))
        .build();

    let err = TestContext::new().load(&csv).unwrap_err();
    assert_eq!(err.line(), Some(2));
    assert_eq!(err.error_code(), Some("PAYLOAD_001"));
}
