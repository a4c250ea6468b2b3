//! Summary statistics over finite samples.

use serde::{Deserialize, Serialize};

/// Arithmetic mean. Returns NaN for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Percentile of an already sorted slice, `p` in [0, 100].
///
/// Linear interpolation between the two closest ranks, the same rule as
/// numpy's default. Returns NaN for an empty slice or a NaN `p`.
pub fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() || p.is_nan() {
        return f64::NAN;
    }
    let p = p.clamp(0.0, 100.0);
    if sorted.len() == 1 {
        return sorted[0];
    }
    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Two-sided percentile band over a sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentileBand {
    pub low: f64,
    pub high: f64,
}

/// Central band holding `level` of the mass (e.g. 0.95 → 2.5th/97.5th).
///
/// Sorts a copy with a total order, so input order does not matter.
pub fn central_band(values: &[f64], level: f64) -> PercentileBand {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let tail = (1.0 - level.clamp(0.0, 1.0)) / 2.0 * 100.0;
    PercentileBand {
        low: percentile_sorted(&sorted, tail),
        high: percentile_sorted(&sorted, 100.0 - tail),
    }
}
