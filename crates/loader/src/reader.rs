//! CSV reading.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use experiment_core::error::LoadErrorCode;
use experiment_core::limits::{DEVICE_ID_COLUMN, EVENT_ID_COLUMN, TIME_EPOCH_COLUMN};
use experiment_core::{Error, Event, Result};
use telemetry::metrics;
use tracing::{debug, info};

use crate::config::LoaderConfig;
use crate::normalize::normalize_record;

/// One input row, reduced to the columns the pipeline reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub device_id: String,
    pub event_id: String,
    /// Unparsed `time_epoch` cell
    pub time_epoch: String,
    /// Unparsed payload cell
    pub payload: String,
}

/// Header positions of the required columns.
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    device_id: usize,
    event_id: usize,
    time_epoch: usize,
    payload: usize,
}

impl ColumnMap {
    fn resolve(headers: &StringRecord, payload_column: &str) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| {
                    Error::load(
                        LoadErrorCode::MissingColumn,
                        format!("missing required column: {name}"),
                    )
                })
        };

        Ok(Self {
            device_id: find(DEVICE_ID_COLUMN)?,
            event_id: find(EVENT_ID_COLUMN)?,
            time_epoch: find(TIME_EPOCH_COLUMN)?,
            payload: find(payload_column)?,
        })
    }

    fn extract(&self, record: &StringRecord) -> RawRecord {
        let cell = |i: usize| record.get(i).unwrap_or_default().to_string();
        RawRecord {
            device_id: cell(self.device_id),
            event_id: cell(self.event_id),
            time_epoch: cell(self.time_epoch),
            payload: cell(self.payload),
        }
    }
}

fn csv_error(e: csv::Error) -> Error {
    let message = e.to_string();
    match e.into_kind() {
        csv::ErrorKind::Io(io) => Error::Io(io),
        _ => Error::load(LoadErrorCode::Csv, message),
    }
}

/// Loads and normalizes every event in a CSV stream.
///
/// The first bad row aborts the load; no partial result is returned.
pub fn load_events<R: Read>(reader: R, config: &LoaderConfig) -> Result<Vec<Event>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers = rdr.headers().map_err(csv_error)?.clone();
    let columns = ColumnMap::resolve(&headers, &config.payload_column)?;
    debug!(?columns, "Resolved input columns");

    let mut events = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(csv_error)?;
        metrics().rows_read.inc();

        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let raw = columns.extract(&record);
        events.push(normalize_record(line, &raw, config)?);
    }

    metrics().events_loaded.inc_by(events.len() as u64);

    let first = events.iter().min_by_key(|e| e.time_epoch);
    let last = events.iter().max_by_key(|e| e.time_epoch);
    match (first, last) {
        (Some(first), Some(last)) => {
            let window = |e: &Event| {
                e.timestamp()
                    .map(|t| t.to_rfc3339())
                    .unwrap_or_else(|| e.time_epoch.to_string())
            };
            info!(
                events = events.len(),
                first = %window(first),
                last = %window(last),
                "Loaded events"
            );
        }
        _ => info!("Loaded events: input has no rows"),
    }

    Ok(events)
}

/// Loads and normalizes every event in the CSV file at `path`.
pub fn load_events_from_path(
    path: impl AsRef<Path>,
    config: &LoaderConfig,
) -> Result<Vec<Event>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        Error::load(LoadErrorCode::Io, format!("{}: {}", path.display(), e))
    })?;

    info!(path = %path.display(), "Reading events");
    load_events(file, config)
}
