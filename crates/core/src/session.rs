//! Session handling types.

use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Composite identity of a user session.
///
/// Held as two fields rather than a joined string, so a `device_id` or
/// `session_id` containing any delimiter can never alias another session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Validate)]
pub struct SessionKey {
    /// Device the session ran on
    #[validate(length(min = 1))]
    pub device_id: String,
    /// Session id as logged by the device
    #[validate(length(min = 1))]
    pub session_id: String,
}

impl SessionKey {
    pub fn new(device_id: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            session_id: session_id.into(),
        }
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {:?})", self.device_id, self.session_id)
    }
}

/// Observed time span of one session.
///
/// Bounded by the earliest and latest recorded event, so out-of-order rows
/// do not matter but missing events shorten the span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSpan {
    pub key: SessionKey,
    /// Earliest event time (ms since epoch)
    pub first_epoch: i64,
    /// Latest event time (ms since epoch)
    pub last_epoch: i64,
    /// Event count in this session
    pub event_count: u64,
}

impl SessionSpan {
    /// Creates a span from the session's first observed event.
    pub fn new(key: SessionKey, epoch: i64) -> Self {
        Self {
            key,
            first_epoch: epoch,
            last_epoch: epoch,
            event_count: 1,
        }
    }

    /// Widens the span with another event of the same session.
    pub fn record_event(&mut self, epoch: i64) {
        self.first_epoch = self.first_epoch.min(epoch);
        self.last_epoch = self.last_epoch.max(epoch);
        self.event_count += 1;
    }

    /// Returns the session duration in milliseconds. Never negative.
    pub fn duration_ms(&self) -> i64 {
        self.last_epoch - self.first_epoch
    }
}
