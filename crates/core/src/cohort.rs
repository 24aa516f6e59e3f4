//! Experiment cohort identifiers.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Experiment group an event was assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CohortId(pub i64);

impl CohortId {
    /// Coerces a payload value into a cohort id.
    ///
    /// Accepts JSON integers, floats with no fractional part, and strings
    /// holding an integer. Anything else yields `None`.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => {
                if let Some(id) = n.as_i64() {
                    return Some(Self(id));
                }
                let f = n.as_f64()?;
                if f.is_finite() && f.fract() == 0.0 && f.abs() <= i64::MAX as f64 {
                    Some(Self(f as i64))
                } else {
                    None
                }
            }
            Value::String(s) => s.trim().parse::<i64>().ok().map(Self),
            _ => None,
        }
    }
}

impl fmt::Display for CohortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
