//! Core types, error taxonomy, and validation for search A/B metrics.

pub mod cohort;
pub mod error;
pub mod events;
pub mod limits;
pub mod metric;
pub mod schema;
pub mod session;

pub use cohort::*;
pub use error::{Error, Result};
pub use events::*;
pub use metric::*;
pub use session::*;
