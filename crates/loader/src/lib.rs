//! Event loading and normalization.
//!
//! Reads the CSV event log, parses each row's embedded JSON payload, and
//! produces [`Event`](experiment_core::Event)s enriched with their session
//! key and cohort.

pub mod config;
pub mod normalize;
pub mod reader;

pub use config::LoaderConfig;
pub use normalize::{normalize_record, parse_payload};
pub use reader::{load_events, load_events_from_path, RawRecord};
