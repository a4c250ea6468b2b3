//! Era correction from recency-weighted decade rates.

use nhf_common::Factor;
use nhf_config::ModelConfig;

use super::stats::HistoricalStats;
use crate::store::summary::decade_of;

/// Per-season rate of one decade bucket, clipped to the history window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecadeRate {
    pub decade: i32,
    pub events: u32,
    pub seasons: u32,
    pub weight: f64,
}

impl DecadeRate {
    pub fn per_season(&self) -> f64 {
        self.events as f64 / self.seasons as f64
    }
}

/// Decade buckets intersecting the window and not after `target_decade`,
/// each weighted `exp(-(target_decade - decade) / decay_years)`.
pub fn decade_rates(
    stats: &HistoricalStats,
    window: (i32, i32),
    target_decade: i32,
    decay_years: f64,
) -> Vec<DecadeRate> {
    let (first, last) = window;
    let mut rates = Vec::new();
    let mut decade = decade_of(first);
    let last_decade = decade_of(last).min(target_decade);
    while decade <= last_decade {
        let lo = decade.max(first);
        let hi = (decade + 9).min(last);
        if lo <= hi {
            let age = (target_decade - decade) as f64;
            rates.push(DecadeRate {
                decade,
                events: stats.count_in_years(lo, hi),
                seasons: (hi - lo + 1) as u32,
                weight: (-age / decay_years).exp(),
            });
        }
        decade += 10;
    }
    rates
}

/// Recency-weighted per-season rate relative to the long-run rate.
///
/// Corrects for drift across eras (mound height, expansion, strikeout
/// trends) instead of assuming a stationary rate. Targets before the history
/// window are neutral.
pub fn decadal_weight(stats: &HistoricalStats, year: i32, config: &ModelConfig) -> Factor {
    let params = &config.decadal;
    let Some(window) = stats.window(&config.season) else {
        return Factor::neutral("no history to compare eras");
    };
    if year < window.0 {
        return Factor::neutral(format!(
            "{year} predates the recorded history ({}-{})",
            window.0, window.1
        ));
    }

    let target_decade = decade_of(year);
    let rates = decade_rates(stats, window, target_decade, params.decay_years);
    let total_weight: f64 = rates.iter().map(|r| r.weight).sum();
    let seasons = (window.1 - window.0 + 1) as f64;
    let long_run = stats.count_in_years(window.0, window.1) as f64 / seasons;
    if rates.is_empty() || !(total_weight > 0.0) || !(long_run > 0.0) {
        return Factor::neutral("too little history to weight by decade");
    }

    let blended = rates.iter().map(|r| r.weight * r.per_season()).sum::<f64>() / total_weight;
    let factor = (blended / long_run).clamp(params.min_weight, params.max_weight);
    let sample: u32 = rates.iter().map(|r| r.events).sum();
    let latest = rates.last().map(|r| r.decade).unwrap_or(target_decade);

    Factor::estimated(
        factor,
        sample,
        format!(
            "era-weighted rate {blended:.2}/season (through the {latest}s) vs long-run {long_run:.2}/season"
        ),
    )
}
