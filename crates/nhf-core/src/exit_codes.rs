//! Exit codes for the nhf CLI.
//!
//! Exit codes communicate operation outcome without requiring output parsing.
//!
//! Exit code ranges:
//! - 0-2: Success/operational outcomes
//! - 10-19: User/environment errors (recoverable by user action)
//! - 20-29: Internal errors (bugs, should be reported)

use crate::config::{ConfigError, ValidationError};
use nhf_common::Error;

/// Exit codes for nhf operations.
///
/// These codes are a stable contract for automation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    // ========================================================================
    // Success / Operational Outcomes (0-2)
    // ========================================================================
    /// Success
    Clean = 0,

    /// Prediction produced, but from an unusable event table
    Degraded = 1,

    /// Data validation found problems (report still produced)
    DataIssues = 2,

    // ========================================================================
    // User / Environment Errors (10-19)
    // ========================================================================
    /// Invalid arguments (bad target date, unknown shell, ...)
    ArgsError = 10,

    /// Model configuration invalid
    ConfigError = 11,

    /// Event table unreadable or malformed in strict mode
    DataError = 12,

    /// Config schema version mismatch
    VersionError = 13,

    // ========================================================================
    // Internal Errors (20-29)
    // ========================================================================
    /// Internal error (bug - please report)
    InternalError = 20,

    /// I/O error
    IoError = 21,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the error code name as a string constant (for JSON output).
    pub fn code_name(&self) -> &'static str {
        match self {
            ExitCode::Clean => "OK",
            ExitCode::Degraded => "OK_DEGRADED",
            ExitCode::DataIssues => "OK_DATA_ISSUES",
            ExitCode::ArgsError => "ERR_ARGS",
            ExitCode::ConfigError => "ERR_CONFIG",
            ExitCode::DataError => "ERR_DATA",
            ExitCode::VersionError => "ERR_VERSION",
            ExitCode::InternalError => "ERR_INTERNAL",
            ExitCode::IoError => "ERR_IO",
        }
    }
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::Config(_) => ExitCode::ConfigError,
            Error::MalformedEvent { .. } | Error::Csv(_) => ExitCode::DataError,
            Error::InsufficientData(_) => ExitCode::DataError,
            Error::InvalidDate { .. } => ExitCode::ArgsError,
            Error::Io(_) => ExitCode::IoError,
            Error::Json(_) => ExitCode::InternalError,
        }
    }
}

impl From<&ConfigError> for ExitCode {
    fn from(err: &ConfigError) -> Self {
        match err {
            ConfigError::IoError { .. } => ExitCode::IoError,
            ConfigError::VersionMismatch { .. }
            | ConfigError::ValidationError(ValidationError::VersionMismatch { .. }) => {
                ExitCode::VersionError
            }
            _ => ExitCode::ConfigError,
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code_name(), self.as_i32())
    }
}
