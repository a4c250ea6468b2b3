//! Prediction results and their factor breakdown.
//!
//! A [`PredictionResult`] is created fresh on every call and is never cached
//! by the engine. It contains no wall-clock values, so two calls with the same
//! event table, date, seed and configuration serialize identically.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The multiplicative adjustments applied to the base rate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum FactorKind {
    /// Seasonality by calendar month.
    Monthly,
    /// Historical concentration on the exact month/day.
    DateSpecific,
    /// Era correction from recency-weighted decade rates.
    Decadal,
    /// Waiting-time tilt from days since the last no-hitter.
    Recency,
}

impl FactorKind {
    /// All kinds in combination order.
    pub const ALL: [FactorKind; 4] = [
        FactorKind::Monthly,
        FactorKind::DateSpecific,
        FactorKind::Decadal,
        FactorKind::Recency,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FactorKind::Monthly => "Monthly",
            FactorKind::DateSpecific => "Date-specific",
            FactorKind::Decadal => "Decadal",
            FactorKind::Recency => "Recency",
        }
    }
}

impl std::fmt::Display for FactorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FactorKind::Monthly => write!(f, "monthly"),
            FactorKind::DateSpecific => write!(f, "date_specific"),
            FactorKind::Decadal => write!(f, "decadal"),
            FactorKind::Recency => write!(f, "recency"),
        }
    }
}

/// How a factor's multiplier was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FactorStatus {
    /// Estimated from historical events.
    Estimated,
    /// No usable evidence; multiplier fixed at 1.0.
    Neutral,
    /// The event table was unusable; multiplier fixed at 1.0.
    Unavailable,
}

/// One entry of the factor breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Factor {
    /// Strictly positive multiplier applied to the base rate.
    pub multiplier: f64,
    /// Human-readable reason for the multiplier.
    pub rationale: String,
    pub status: FactorStatus,
    /// Number of historical events underlying the estimate.
    pub sample_size: u32,
}

impl Factor {
    pub fn estimated(multiplier: f64, sample_size: u32, rationale: impl Into<String>) -> Self {
        Self {
            multiplier,
            rationale: rationale.into(),
            status: FactorStatus::Estimated,
            sample_size,
        }
    }

    pub fn neutral(rationale: impl Into<String>) -> Self {
        Self {
            multiplier: 1.0,
            rationale: rationale.into(),
            status: FactorStatus::Neutral,
            sample_size: 0,
        }
    }

    pub fn unavailable(rationale: impl Into<String>) -> Self {
        Self {
            multiplier: 1.0,
            rationale: rationale.into(),
            status: FactorStatus::Unavailable,
            sample_size: 0,
        }
    }
}

/// Resampled uncertainty band around the point estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ConfidenceInterval {
    pub low: f64,
    pub high: f64,
    /// Central mass covered, e.g. 0.95.
    pub level: f64,
    /// Monte Carlo trials behind the band (0 for the degraded fallback).
    pub trials: u32,
}

impl ConfidenceInterval {
    pub fn contains(&self, p: f64) -> bool {
        self.low <= p && p <= self.high
    }

    pub fn width(&self) -> f64 {
        self.high - self.low
    }
}

/// Why a prediction fell back to the degenerate result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DegradedReason {
    /// No events at all.
    EmptyTable,
    /// Events were supplied but none passed validation.
    AllRecordsMalformed,
    /// Events were supplied but none fall inside the configured history window.
    OutsideHistoryWindow,
}

/// Overall state of a prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PredictionStatus {
    Ok,
    Degraded {
        reason: DegradedReason,
        /// Stable error code of the underlying insufficient-data condition.
        code: u32,
        detail: String,
    },
}

/// Probability that at least one no-hitter happens on `date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PredictionResult {
    pub schema_version: String,
    pub date: NaiveDate,
    /// Point estimate in [0, 1].
    pub probability: f64,
    pub confidence_interval: ConfidenceInterval,
    /// Unadjusted long-run daily probability.
    pub base_rate: f64,
    pub factors: BTreeMap<FactorKind, Factor>,
    pub in_season: bool,
    pub status: PredictionStatus,
    /// Caveats a presentation layer should show next to the number.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub caveats: Vec<String>,
    pub explanation: String,
    pub seed: u64,
    /// SHA-256 of the event table the prediction was computed from.
    pub data_fingerprint: String,
}

impl PredictionResult {
    pub fn is_degraded(&self) -> bool {
        matches!(self.status, PredictionStatus::Degraded { .. })
    }

    pub fn factor(&self, kind: FactorKind) -> Option<&Factor> {
        self.factors.get(&kind)
    }

    /// Product of every factor multiplier.
    pub fn combined_multiplier(&self) -> f64 {
        self.factors.values().map(|f| f.multiplier).product()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PredictionResult {
        let mut factors = BTreeMap::new();
        factors.insert(FactorKind::Monthly, Factor::estimated(1.5, 12, "busy month"));
        factors.insert(FactorKind::Recency, Factor::neutral("no prior event"));
        PredictionResult {
            schema_version: crate::SCHEMA_VERSION.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 9, 20).unwrap(),
            probability: 0.03,
            confidence_interval: ConfidenceInterval { low: 0.01, high: 0.06, level: 0.95, trials: 1000 },
            base_rate: 0.02,
            factors,
            in_season: true,
            status: PredictionStatus::Ok,
            caveats: vec![],
            explanation: "September historically shows higher no-hitter frequency".into(),
            seed: 7,
            data_fingerprint: "abc".into(),
        }
    }

    #[test]
    fn factor_keys_serialize_as_snake_case() {
        let json = serde_json::to_value(sample()).unwrap();
        let factors = json["factors"].as_object().unwrap();
        assert!(factors.contains_key("monthly"));
        assert!(factors.contains_key("recency"));
        assert_eq!(json["status"]["state"], "ok");
        assert!(json.get("caveats").is_none());
    }

    #[test]
    fn degraded_status_serializes_reason() {
        let mut result = sample();
        result.status = PredictionStatus::Degraded {
            reason: DegradedReason::EmptyTable,
            code: 30,
            detail: "event table is empty".into(),
        };
        assert!(result.is_degraded());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"]["state"], "degraded");
        assert_eq!(json["status"]["reason"], "empty_table");
    }

    #[test]
    fn combined_multiplier_is_product() {
        let result = sample();
        assert!((result.combined_multiplier() - 1.5).abs() < 1e-15);
    }

    #[test]
    fn interval_contains() {
        let ci = ConfidenceInterval { low: 0.1, high: 0.2, level: 0.95, trials: 10 };
        assert!(ci.contains(0.15));
        assert!(!ci.contains(0.25));
        assert!((ci.width() - 0.1).abs() < 1e-15);
    }

    #[test]
    fn factor_kind_order_matches_all() {
        let mut sorted = FactorKind::ALL.to_vec();
        sorted.sort();
        assert_eq!(sorted, FactorKind::ALL.to_vec());
    }
}
