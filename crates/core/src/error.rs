//! Unified error types for the metrics pipeline.
//!
//! Error codes:
//! - LOAD_001-003: Input errors
//! - PAYLOAD_001-003: Event payload errors
//! - TIME_001: Timestamp errors
//! - VALID_001: Record validation errors

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Input error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadErrorCode {
    /// LOAD_001: Input file cannot be read
    Io,
    /// LOAD_002: CSV structure is broken
    Csv,
    /// LOAD_003: Required header column is missing
    MissingColumn,
}

impl LoadErrorCode {
    /// Get the error code string.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io => "LOAD_001",
            Self::Csv => "LOAD_002",
            Self::MissingColumn => "LOAD_003",
        }
    }

    /// Get the process exit code.
    pub fn exit_code(&self) -> u8 {
        3
    }
}

/// Payload error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadErrorCode {
    /// PAYLOAD_001: Payload is not a JSON object
    Malformed,
    /// PAYLOAD_002: Required payload field is missing
    MissingField,
    /// PAYLOAD_003: Experiment group is not a valid cohort id
    InvalidCohort,
}

impl PayloadErrorCode {
    /// Get the error code string.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Malformed => "PAYLOAD_001",
            Self::MissingField => "PAYLOAD_002",
            Self::InvalidCohort => "PAYLOAD_003",
        }
    }

    /// Get the process exit code.
    pub fn exit_code(&self) -> u8 {
        4
    }
}

/// Unified error type for the metrics pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// Input error with code.
    #[error("[{code}] {message}")]
    Load {
        code: &'static str,
        message: String,
        exit_code: u8,
    },

    #[error("[LOAD_001] {0}")]
    Io(#[from] std::io::Error),

    #[error("[PAYLOAD_001] line {line}: malformed payload: {reason}")]
    MalformedPayload { line: u64, reason: String },

    #[error("[PAYLOAD_002] line {line}: missing required field: {field}")]
    MissingField { line: u64, field: &'static str },

    #[error("[PAYLOAD_003] line {line}: invalid experiment group: {value}")]
    InvalidCohort { line: u64, value: String },

    #[error("[TIME_001] line {line}: invalid timestamp: {reason}")]
    InvalidTimestamp { line: u64, reason: String },

    #[error("[VALID_001] line {line}: {message}")]
    Validation { line: u64, message: String },

    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create an input error.
    pub fn load(code: LoadErrorCode, msg: impl Into<String>) -> Self {
        Self::Load {
            code: code.code(),
            message: msg.into(),
            exit_code: code.exit_code(),
        }
    }

    pub fn malformed_payload(line: u64, reason: impl Into<String>) -> Self {
        Self::MalformedPayload {
            line,
            reason: reason.into(),
        }
    }

    pub fn missing_field(line: u64, field: &'static str) -> Self {
        Self::MissingField { line, field }
    }

    pub fn invalid_cohort(line: u64, value: impl Into<String>) -> Self {
        Self::InvalidCohort {
            line,
            value: value.into(),
        }
    }

    pub fn invalid_timestamp(line: u64, reason: impl Into<String>) -> Self {
        Self::InvalidTimestamp {
            line,
            reason: reason.into(),
        }
    }

    pub fn validation(line: u64, msg: impl Into<String>) -> Self {
        Self::Validation {
            line,
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Source line the error points at, for row-level errors.
    pub fn line(&self) -> Option<u64> {
        match self {
            Self::MalformedPayload { line, .. }
            | Self::MissingField { line, .. }
            | Self::InvalidCohort { line, .. }
            | Self::InvalidTimestamp { line, .. }
            | Self::Validation { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Load { exit_code, .. } => *exit_code,
            Self::Io(_) => LoadErrorCode::Io.exit_code(),
            Self::MalformedPayload { .. } => PayloadErrorCode::Malformed.exit_code(),
            Self::MissingField { .. } => PayloadErrorCode::MissingField.exit_code(),
            Self::InvalidCohort { .. } => PayloadErrorCode::InvalidCohort.exit_code(),
            Self::InvalidTimestamp { .. } => 5,
            Self::Validation { .. } => 6,
            Self::Config(_) => 2,
        }
    }

    /// Get the error code if this is a coded error.
    pub fn error_code(&self) -> Option<&'static str> {
        match self {
            Self::Load { code, .. } => Some(*code),
            Self::Io(_) => Some(LoadErrorCode::Io.code()),
            Self::MalformedPayload { .. } => Some(PayloadErrorCode::Malformed.code()),
            Self::MissingField { .. } => Some(PayloadErrorCode::MissingField.code()),
            Self::InvalidCohort { .. } => Some(PayloadErrorCode::InvalidCohort.code()),
            Self::InvalidTimestamp { .. } => Some("TIME_001"),
            Self::Validation { .. } => Some("VALID_001"),
            _ => None,
        }
    }
}
