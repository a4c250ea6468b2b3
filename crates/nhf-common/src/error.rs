//! Error types for the no-hitter forecaster.
//!
//! Errors carry:
//! - Stable error codes for machine parsing
//! - Category classification for error grouping
//! - A headline and remediation hint for humans
//!
//! The engine only surfaces a hard error for a malformed target date. An
//! unusable event table is reported through [`Error::InsufficientData`] but the
//! prediction path turns it into a degraded result rather than failing.
//!
//! # Agent-Facing Output
//!
//! Errors serialize to structured JSON:
//! ```json
//! {
//!   "code": 20,
//!   "category": "data",
//!   "message": "malformed event at line 14: unparseable date '2021-13-40'",
//!   "recoverable": true,
//!   "context": { "line": 14 }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Result type alias for forecaster operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Model configuration errors.
    Config,
    /// Historical event data errors.
    Data,
    /// Prediction engine errors.
    Engine,
    /// File I/O and serialization errors.
    Io,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Data => write!(f, "data"),
            ErrorCategory::Engine => write!(f, "engine"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Unified error type for the forecaster.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    // Data errors (20-29)
    #[error("malformed event{}: {reason}", line_suffix(.line))]
    MalformedEvent { line: Option<usize>, reason: String },

    #[error("CSV error: {0}")]
    Csv(String),

    // Engine errors (30-39)
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    #[error("invalid date '{date}': {reason}")]
    InvalidDate { date: String, reason: String },

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

fn line_suffix(line: &Option<usize>) -> String {
    match line {
        Some(l) => format!(" at line {l}"),
        None => String::new(),
    }
}

impl Error {
    /// Returns the error code for this error type.
    ///
    /// Error codes are stable and grouped by category:
    /// - 10-19: Configuration errors
    /// - 20-29: Data errors
    /// - 30-39: Engine errors
    /// - 60-69: I/O errors
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::MalformedEvent { .. } => 20,
            Error::Csv(_) => 21,
            Error::InsufficientData(_) => 30,
            Error::InvalidDate { .. } => 31,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Config(_) => ErrorCategory::Config,
            Error::MalformedEvent { .. } | Error::Csv(_) => ErrorCategory::Data,
            Error::InsufficientData(_) | Error::InvalidDate { .. } => ErrorCategory::Engine,
            Error::Io(_) | Error::Json(_) => ErrorCategory::Io,
        }
    }

    /// Returns whether this error is potentially recoverable by the caller.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Error::Config(_) => true,
            Error::MalformedEvent { .. } => true,
            Error::Csv(_) => true,
            // Recoverable by loading more history.
            Error::InsufficientData(_) => true,
            // The date itself is wrong; retrying won't help.
            Error::InvalidDate { .. } => false,
            Error::Io(_) => true,
            Error::Json(_) => true,
        }
    }

    /// Returns a human-readable remediation hint.
    pub fn remediation(&self) -> &'static str {
        match self {
            Error::Config(_) => "Run 'nhf config validate' and fix the reported field in model.json.",
            Error::MalformedEvent { .. } => {
                "Fix or remove the reported row(s) in no_hitters.csv, then rerun the command."
            }
            Error::Csv(_) => "Check that no_hitters.csv has the header 'date,pitcher,team,opponent,notes'.",
            Error::InsufficientData(_) => {
                "Populate the event table with 'nhf data update' before requesting predictions."
            }
            Error::InvalidDate { .. } => "Pass the target date as YYYY-MM-DD within the supported year range.",
            Error::Io(_) => "Check that the data directory exists and is writable.",
            Error::Json(_) => "Invalid JSON in file. Check syntax or restore the file from backup.",
        }
    }

    /// Returns a short headline for human-readable output.
    pub fn headline(&self) -> &'static str {
        match self {
            Error::Config(_) => "Configuration Error",
            Error::MalformedEvent { .. } => "Malformed Event Record",
            Error::Csv(_) => "Event File Unreadable",
            Error::InsufficientData(_) => "Insufficient Historical Data",
            Error::InvalidDate { .. } => "Invalid Target Date",
            Error::Io(_) => "I/O Error",
            Error::Json(_) => "JSON Parse Error",
        }
    }
}

/// Structured error response for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// Stable error code.
    pub code: u32,

    /// Error category for grouping.
    pub category: ErrorCategory,

    /// Human-readable error message.
    pub message: String,

    /// Whether the error is potentially recoverable.
    pub recoverable: bool,

    /// Additional structured context (e.g., line number, date).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub context: BTreeMap<String, serde_json::Value>,
}

impl From<&Error> for StructuredError {
    fn from(err: &Error) -> Self {
        let mut context = BTreeMap::new();

        match err {
            Error::MalformedEvent { line: Some(line), .. } => {
                context.insert("line".to_string(), serde_json::json!(line));
            }
            Error::InvalidDate { date, .. } => {
                context.insert("date".to_string(), serde_json::json!(date));
            }
            _ => {}
        }

        StructuredError {
            code: err.code(),
            category: err.category(),
            message: err.to_string(),
            recoverable: err.is_recoverable(),
            context,
        }
    }
}
