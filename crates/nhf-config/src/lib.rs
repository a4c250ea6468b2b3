//! No-hitter forecaster configuration loading and validation.
//!
//! This crate provides:
//! - Typed Rust structs for model.json
//! - Schema version checks and semantic validation

pub mod model;
pub mod validate;

pub use model::{
    DateSpecificParams, DecadalParams, LedgerParams, ModelConfig, MonteCarloParams, MonthlyParams,
    RecencyParams, SeasonParams,
};
pub use validate::{validate_model, ValidationError, ValidationResult};

/// Schema version for configuration files.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";
