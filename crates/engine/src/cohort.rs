//! Cohort partitioning.

use std::collections::BTreeMap;

use experiment_core::{CohortId, Error, Event, Result};

/// Splits events into their experiment groups.
///
/// Every cohort in `cohorts` gets an entry, even when no event maps to it.
/// An event from any other group fails the partition rather than being
/// dropped, so the cohort sizes always add up to `events.len()`.
pub fn partition_by_cohort(
    events: Vec<Event>,
    cohorts: &[CohortId],
) -> Result<BTreeMap<CohortId, Vec<Event>>> {
    let mut groups: BTreeMap<CohortId, Vec<Event>> =
        cohorts.iter().map(|&c| (c, Vec::new())).collect();

    for event in events {
        match groups.get_mut(&event.cohort) {
            Some(group) => group.push(event),
            None => return Err(Error::invalid_cohort(event.line, event.cohort.to_string())),
        }
    }

    Ok(groups)
}
