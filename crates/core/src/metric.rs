//! Metric values that can be undefined.

use serde::Serialize;
use std::fmt;

/// A computed ratio or mean.
///
/// `Undefined` stands for a zero denominator (no finished sessions, no
/// sessions at all) and is never folded into `0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricValue {
    Defined(f64),
    Undefined,
}

impl MetricValue {
    /// `numerator / denominator`, undefined when the denominator is zero.
    pub fn ratio(numerator: u64, denominator: u64) -> Self {
        if denominator == 0 {
            Self::Undefined
        } else {
            Self::Defined(numerator as f64 / denominator as f64)
        }
    }

    /// Rounds a defined value to `decimals` decimal places.
    pub fn rounded(self, decimals: i32) -> Self {
        match self {
            Self::Defined(v) => {
                let scale = 10f64.powi(decimals);
                Self::Defined((v * scale).round() / scale)
            }
            Self::Undefined => Self::Undefined,
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Defined(v) => Some(*v),
            Self::Undefined => None,
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, Self::Defined(_))
    }

    /// Collapses `Undefined` to `0`, the zero-division sentinel of the
    /// `(count, rate)` report shape.
    pub fn or_zero(&self) -> f64 {
        self.value().unwrap_or(0.0)
    }
}

/// Writes `v` in shortest round-trip form with a trailing `.0` on whole
/// numbers and a signed, two-digit exponent (`5e-06`, `1e+16`).
fn write_float(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    let repr = format!("{v:?}");
    match repr.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exp),
            };
            write!(f, "{mantissa}e{sign}{digits:0>2}")
        }
        None => f.write_str(&repr),
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Defined(v) => write_float(f, *v),
            Self::Undefined => f.write_str("undefined"),
        }
    }
}
