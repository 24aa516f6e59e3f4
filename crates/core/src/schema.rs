//! Schema validation for raw event fields.

use chrono::{TimeZone, Utc};
use validator::Validate;

use crate::error::{Error, Result};
use crate::session::SessionKey;

/// Parses and validates a raw `time_epoch` cell.
///
/// The value must be a non-negative integer count of milliseconds that maps
/// to a representable UTC datetime. A float cell with no fractional part
/// (as written by dataframe exports) is accepted.
pub fn validate_time_epoch(line: u64, raw: &str) -> Result<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(Error::invalid_timestamp(line, "time_epoch is empty"));
    }

    let epoch = match raw.parse::<i64>() {
        Ok(v) => v,
        Err(_) => {
            let f: f64 = raw
                .parse()
                .map_err(|_| Error::invalid_timestamp(line, format!("not a number: {raw:?}")))?;
            if !f.is_finite() || f.fract() != 0.0 || f.abs() > i64::MAX as f64 {
                return Err(Error::invalid_timestamp(
                    line,
                    format!("not an integer millisecond value: {raw:?}"),
                ));
            }
            f as i64
        }
    };

    if epoch < 0 {
        return Err(Error::invalid_timestamp(
            line,
            format!("negative epoch: {epoch}"),
        ));
    }

    if Utc.timestamp_millis_opt(epoch).single().is_none() {
        return Err(Error::invalid_timestamp(
            line,
            format!("epoch out of range: {epoch}"),
        ));
    }

    Ok(epoch)
}

/// Validates the identifiers that make up a session key.
pub fn validate_session_key(line: u64, key: &SessionKey) -> Result<()> {
    key.validate()
        .map_err(|e| Error::validation(line, format!("session key: {}", e)))
}
