//! End-to-end tests: CSV text in, per-cohort report out.

use experiment_core::{CohortId, MetricValue};
use integration_tests::{fixtures::EventLog, setup::TestContext};

/// Two cohort-0 sessions spanning 1s and 2s average to 1.5s.
#[test]
fn test_average_session_duration_scenario() {
    let log = EventLog::new()
        .event("d1", "s1", 0, "searchStarted", 0)
        .finished("d1", "s1", 0, 1_000)
        .event("d2", "s2", 0, "searchStarted", 0)
        .finished("d2", "s2", 0, 2_000);

    let report = TestContext::new().analyze(&log.build()).unwrap();
    let control = report.cohort(CohortId(0)).unwrap();

    assert_eq!(control.session_count, 2);
    assert_eq!(control.average_session_duration, MetricValue::Defined(1.5));
}

/// Three finished sessions with two selections give (2, 0.6667).
#[test]
fn test_success_rate_scenario() {
    let log = EventLog::new()
        .selection("d1", "a", 1, 100)
        .finished("d1", "a", 1, 200)
        .selection("d1", "b", 1, 100)
        .finished("d1", "b", 1, 200)
        .event("d1", "c", 1, "searchStarted", 100)
        .finished("d1", "c", 1, 200);

    let report = TestContext::new().analyze(&log.build()).unwrap();
    let stats = report.cohort(CohortId(1)).unwrap().search;

    assert_eq!(stats.success_count, 2);
    assert_eq!(stats.finished_count, 3);
    assert_eq!(stats.rate.rounded(4), MetricValue::Defined(0.6667));
}

/// No sessionFinished events: undefined rate, no error.
#[test]
fn test_no_finished_sessions() {
    let log = EventLog::new()
        .selection("d1", "a", 0, 100)
        .event("d1", "a", 0, "searchStarted", 50);

    let report = TestContext::new().analyze(&log.build()).unwrap();
    let stats = report.cohort(CohortId(0)).unwrap().search;

    assert_eq!(stats.rate, MetricValue::Undefined);
    assert_eq!(stats.as_tuple(), (1, 0.0));
}

#[test]
fn test_cohort_sizes_sum_to_total() {
    let log = EventLog::new()
        .event("d1", "a", 0, "searchStarted", 0)
        .event("d2", "b", 1, "searchStarted", 0)
        .finished("d2", "b", 1, 10)
        .event("d3", "c", 0, "searchStarted", 0)
        .finished("d3", "c", 0, 10);

    let report = TestContext::new().analyze(&log.build()).unwrap();
    let sum: usize = report.cohorts.iter().map(|c| c.event_count).sum();

    assert_eq!(report.total_events, log.len());
    assert_eq!(sum, log.len());
}

#[test]
fn test_session_keys_are_per_device() {
    // Same session id on two devices, plus ids that collide when joined with "_"
    let log = EventLog::new()
        .event("dev", "1", 0, "searchStarted", 0)
        .event("other", "1", 0, "searchStarted", 5_000)
        .event("a_b", "c", 0, "searchStarted", 0)
        .event("a", "b_c", 0, "searchStarted", 7_000);

    let events = TestContext::new().load(&log.build()).unwrap();
    for pair in events.windows(2) {
        if pair[0].device_id() != pair[1].device_id() {
            assert_ne!(pair[0].session_key, pair[1].session_key);
        }
    }

    let report = TestContext::new().analyze(&log.build()).unwrap();
    let control = report.cohort(CohortId(0)).unwrap();
    assert_eq!(control.session_count, 4);
    assert_eq!(control.average_session_duration, MetricValue::Defined(0.0));
}

#[test]
fn test_out_of_order_rows() {
    let log = EventLog::new()
        .finished("d", "s", 0, 9_000)
        .event("d", "s", 0, "searchStarted", 1_000)
        .selection("d", "s", 0, 4_000);

    let report = TestContext::new().analyze(&log.build()).unwrap();
    assert_eq!(
        report.cohort(CohortId(0)).unwrap().average_session_duration,
        MetricValue::Defined(8.0)
    );
}

#[test]
fn test_empty_cohort_reported_as_undefined() {
    let log = EventLog::new().finished("d", "s", 0, 1_000);

    let report = TestContext::new().analyze(&log.build()).unwrap();
    let treatment = report.cohort(CohortId(1)).unwrap();

    assert_eq!(treatment.event_count, 0);
    assert_eq!(treatment.search.rate, MetricValue::Undefined);
    assert_eq!(treatment.average_session_duration, MetricValue::Undefined);
}

#[test]
fn test_three_cohorts() {
    let log = EventLog::new()
        .finished("d", "s0", 0, 1_000)
        .finished("d", "s1", 1, 1_000)
        .finished("d", "s2", 2, 1_000);

    let report = TestContext::new()
        .with_cohorts([0, 1, 2])
        .analyze(&log.build())
        .unwrap();

    let ids: Vec<CohortId> = report.cohorts.iter().map(|c| c.cohort).collect();
    assert_eq!(ids, vec![CohortId(0), CohortId(1), CohortId(2)]);
}

#[test]
fn test_rendered_report() {
    let log = EventLog::new()
        .event("d1", "s1", 0, "searchStarted", 0)
        .selection("d1", "s1", 0, 500)
        .finished("d1", "s1", 0, 1_000)
        .event("d2", "s1", 1, "searchStarted", 0)
        .finished("d2", "s1", 1, 3_000);

    let report = TestContext::new().analyze(&log.build()).unwrap();

    let expected = "\nGroup 0 size: 3\n\
                    Group 0 successful searches: 1\n\
                    Group 0 percentage of successful searches: 1.0\n\
                    Group 0 average time spent on the Search Everywhere tab: 1.0s\n\
                    \nGroup 1 size: 2\n\
                    Group 1 successful searches: 0\n\
                    Group 1 percentage of successful searches: 0.0\n\
                    Group 1 average time spent on the Search Everywhere tab: 3.0s\n";
    assert_eq!(report.to_string(), expected);
}

/// Opaque ids of any length load and group like short ones.
#[test]
fn test_long_session_ids() {
    let session = "s".repeat(300);
    let log = EventLog::new()
        .event("d1", &session, 0, "searchStarted", 0)
        .finished("d1", &session, 0, 1_000);

    let report = TestContext::new().analyze(&log.build()).unwrap();
    let control = report.cohort(CohortId(0)).unwrap();

    assert_eq!(control.session_count, 1);
    assert_eq!(control.average_session_duration, MetricValue::Defined(1.0));
}
