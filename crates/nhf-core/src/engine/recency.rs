//! Waiting-time ("overdue") heuristic.
//!
//! Gaps between no-hitters are modeled as exponential with the historical
//! mean gap `mu`. A true exponential process is memoryless, so elapsed time
//! carries no information; this adjustment deliberately departs from that and
//! treats a long drought as a weak signal. It is an approximation tuned by
//! hand, not a statistical claim:
//!
//! ```text
//! F(t)       = 1 - exp(-t / mu)
//! adjustment = exp(strength * (F(t) - F(mu)) / F(mu)),  clamped to [floor, cap]
//! ```
//!
//! The adjustment is 1 at `t = mu`, rises monotonically with `t`, and is
//! bounded by `exp(±strength)`-ish limits before clamping.

use chrono::NaiveDate;
use nhf_common::Factor;
use nhf_config::{ModelConfig, RecencyParams};
use nhf_math::{exponential_cdf, mean};

use super::stats::HistoricalStats;

/// Adjustment for `elapsed_days` since the last event given mean gap `mean_gap`.
pub fn recency_from_gap(elapsed_days: f64, mean_gap: f64, params: &RecencyParams) -> f64 {
    if !(mean_gap > 0.0) || !elapsed_days.is_finite() {
        return 1.0;
    }
    let at_mean = exponential_cdf(mean_gap, mean_gap);
    let now = exponential_cdf(elapsed_days.max(0.0), mean_gap);
    let raw = (params.strength * (now - at_mean) / at_mean).exp();
    raw.clamp(params.floor, params.cap)
}

/// Recency factor for `target` from the events strictly before it.
pub fn recency_adjustment(
    stats: &HistoricalStats,
    target: NaiveDate,
    config: &ModelConfig,
) -> Factor {
    let params = &config.recency;
    let prior = stats.dates_before(target);
    let gaps = stats.gaps_before(target);

    let Some(&last) = prior.last() else {
        return Factor::neutral(format!("no recorded no-hitter before {target}"));
    };
    if gaps.len() < params.min_gaps as usize {
        return Factor::neutral(format!(
            "only {} event(s) before {target}; need {} gap(s) for a mean",
            prior.len(),
            params.min_gaps
        ));
    }

    let mean_gap = mean(&gaps);
    if !(mean_gap > 0.0) {
        return Factor::neutral("all prior events share one date; no gap to compare");
    }

    let elapsed = (target - last).num_days();
    let factor = recency_from_gap(elapsed as f64, mean_gap, params);
    let relation = if (elapsed as f64) > mean_gap {
        "longer than"
    } else if (elapsed as f64) < mean_gap {
        "shorter than"
    } else {
        "equal to"
    };

    Factor::estimated(
        factor,
        gaps.len() as u32,
        format!(
            "{elapsed} days since the last no-hitter ({last}), {relation} the {mean_gap:.1}-day mean gap"
        ),
    )
}
