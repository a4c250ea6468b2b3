//! Structured event names and pipeline stages.

use serde::{Deserialize, Serialize};

/// Stages of a forecaster run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Startup and configuration.
    Init,
    /// Loading and validating the event table.
    Load,
    /// Deriving statistics and factors.
    Estimate,
    /// Monte Carlo resampling.
    Simulate,
    /// Ledger bookkeeping.
    Record,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Stage::Init => "init",
            Stage::Load => "load",
            Stage::Estimate => "estimate",
            Stage::Simulate => "simulate",
            Stage::Record => "record",
        };
        write!(f, "{}", s)
    }
}

/// Standard event names used in logging.
pub mod event_names {
    // Run lifecycle
    pub const RUN_STARTED: &str = "run.started";
    pub const RUN_FINISHED: &str = "run.finished";

    // Config
    pub const CONFIG_LOADED: &str = "config.loaded";
    pub const CONFIG_DEFAULT_USED: &str = "config.default_used";

    // Event table
    pub const DATA_LOADED: &str = "data.loaded";
    pub const DATA_RECORD_SKIPPED: &str = "data.record_skipped";
    pub const DATA_WRITTEN: &str = "data.written";

    // Engine
    pub const STATS_CACHE_HIT: &str = "stats.cache_hit";
    pub const STATS_CACHE_MISS: &str = "stats.cache_miss";
    pub const FACTOR_NEUTRAL: &str = "factor.neutral";
    pub const PREDICT_DEGRADED: &str = "predict.degraded";
    pub const PREDICT_FINISHED: &str = "predict.finished";

    // Ledger
    pub const LEDGER_RECORDED: &str = "ledger.recorded";
    pub const LEDGER_PRUNED: &str = "ledger.pruned";
}
