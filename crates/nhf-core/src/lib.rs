//! No-Hitter Forecaster Core Library
//!
//! This library provides the core functionality of the forecaster:
//! - Historical event store (CSV table, built-in seed dataset, validation)
//! - Prediction engine (base rate, adjustment factors, Monte Carlo interval)
//! - Prediction ledger
//! - Configuration resolution, logging and exit codes for the CLI
//!
//! The binary entry point is in `main.rs`.

pub mod config;
pub mod engine;
pub mod exit_codes;
pub mod ledger;
pub mod logging;
pub mod output;
pub mod schema;
pub mod store;

pub use engine::{PredictOptions, Predictor};
pub use store::{CsvStore, EventStore, MemoryStore};
