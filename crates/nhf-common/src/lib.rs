//! No-hitter forecaster common types and errors.
//!
//! This crate provides the types shared by the engine, the event store and
//! the CLI:
//! - Historical event records
//! - Prediction results and their factor breakdown
//! - The unified error type with stable codes
//! - Output formats

pub mod error;
pub mod event;
pub mod output;
pub mod prediction;

pub use error::{Error, ErrorCategory, Result, StructuredError};
pub use event::NoHitterEvent;
pub use output::OutputFormat;
pub use prediction::{
    ConfidenceInterval, DegradedReason, Factor, FactorKind, FactorStatus, PredictionResult,
    PredictionStatus,
};

/// Schema version stamped on serialized predictions and ledgers.
pub const SCHEMA_VERSION: &str = "1.0.0";
