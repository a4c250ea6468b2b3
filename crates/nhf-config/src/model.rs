//! Model parameter types.
//!
//! Every tunable constant of the prediction engine lives here. The defaults
//! reproduce the hand-tuned model; a `model.json` file may override any
//! section, and omitted sections fall back to their defaults.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::validate::ValidationError;

/// Complete model configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ModelConfig {
    pub schema_version: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub season: SeasonParams,

    #[serde(default)]
    pub monthly: MonthlyParams,

    #[serde(default)]
    pub date_specific: DateSpecificParams,

    #[serde(default)]
    pub decadal: DecadalParams,

    #[serde(default)]
    pub recency: RecencyParams,

    #[serde(default)]
    pub monte_carlo: MonteCarloParams,

    #[serde(default)]
    pub ledger: LedgerParams,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            schema_version: crate::CONFIG_SCHEMA_VERSION.to_string(),
            description: None,
            season: SeasonParams::default(),
            monthly: MonthlyParams::default(),
            date_specific: DateSpecificParams::default(),
            decadal: DecadalParams::default(),
            recency: RecencyParams::default(),
            monte_carlo: MonteCarloParams::default(),
            ledger: LedgerParams::default(),
        }
    }
}

/// Season calendar and the historical window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SeasonParams {
    /// Calendar months (1-12) that belong to the modeled season.
    pub months: Vec<u32>,
    /// Approximate game-days per season, used by the base rate.
    pub season_length_days: f64,
    /// Earliest year a target date may fall in.
    pub min_year: i32,
    /// Latest year a target date may fall in.
    pub max_year: i32,
    /// First season of the historical window. Defaults to the first event.
    pub history_start_year: Option<i32>,
    /// Last season of the historical window. Defaults to the last event.
    pub history_end_year: Option<i32>,
}

impl Default for SeasonParams {
    fn default() -> Self {
        Self {
            months: (4..=10).collect(),
            season_length_days: 180.0,
            min_year: 1876,
            max_year: 2200,
            history_start_year: None,
            history_end_year: None,
        }
    }
}

impl SeasonParams {
    pub fn contains_month(&self, month: u32) -> bool {
        self.months.contains(&month)
    }
}

/// Monthly seasonality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MonthlyParams {
    /// Additive (Laplace) smoothing per month.
    pub smoothing: f64,
    /// Lower bound for any in-season month.
    pub min_in_season_factor: f64,
    /// Factor applied to months outside the season.
    pub off_season_factor: f64,
}

impl Default for MonthlyParams {
    fn default() -> Self {
        Self {
            smoothing: 0.5,
            min_in_season_factor: 0.1,
            off_season_factor: 0.01,
        }
    }
}

/// Exact calendar-date boost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DateSpecificParams {
    /// Pseudo-count pulling the observed ratio toward 1.
    pub shrinkage: f64,
    /// Upper bound on the boost.
    pub max_factor: f64,
}

impl Default for DateSpecificParams {
    fn default() -> Self {
        Self {
            shrinkage: 4.0,
            max_factor: 5.0,
        }
    }
}

/// Era weighting across decades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DecadalParams {
    /// e-folding distance in years for decade weights.
    pub decay_years: f64,
    pub min_weight: f64,
    pub max_weight: f64,
}

impl Default for DecadalParams {
    fn default() -> Self {
        Self {
            decay_years: 50.0,
            min_weight: 0.25,
            max_weight: 4.0,
        }
    }
}

/// Waiting-time ("overdue") heuristic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RecencyParams {
    /// Strength of the tilt; 0 disables the adjustment.
    pub strength: f64,
    pub floor: f64,
    pub cap: f64,
    /// Gaps needed before the mean gap is trusted.
    pub min_gaps: u32,
}

impl Default for RecencyParams {
    fn default() -> Self {
        Self {
            strength: 0.5,
            floor: 0.5,
            cap: 2.0,
            min_gaps: 1,
        }
    }
}

/// Resampling for the confidence interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MonteCarloParams {
    pub trials: u32,
    /// Central mass of the reported band.
    pub level: f64,
    /// Cap on the relative perturbation of any single input.
    pub max_sigma: f64,
    /// Seed used when the caller does not pass one.
    pub default_seed: u64,
}

impl Default for MonteCarloParams {
    fn default() -> Self {
        Self {
            trials: 1000,
            level: 0.95,
            max_sigma: 0.5,
            default_seed: 20_240_726,
        }
    }
}

/// Prediction ledger retention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct LedgerParams {
    /// Number of most recent dates kept.
    pub retain: usize,
}

impl Default for LedgerParams {
    fn default() -> Self {
        Self { retain: 30 }
    }
}

impl ModelConfig {
    /// Load model config from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ValidationError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ValidationError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::from_json(&content)
    }

    /// Parse model config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ValidationError> {
        serde_json::from_str(json)
            .map_err(|e| ValidationError::ParseError(format!("Invalid JSON: {}", e)))
    }

    pub fn to_json_pretty(&self) -> Result<String, ValidationError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ValidationError::ParseError(format!("Serialization failed: {}", e)))
    }
}
