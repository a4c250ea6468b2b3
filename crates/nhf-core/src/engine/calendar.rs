//! Exact calendar-date concentration.

use nhf_common::Factor;
use nhf_config::ModelConfig;

use super::season::{month_name, season_days};
use super::stats::HistoricalStats;

/// Boost for a month/day that has hosted more no-hitters than a uniform
/// spread over season days would predict.
///
/// The raw ratio is shrunk toward 1 with credibility
/// `count / (count + shrinkage)`, never drops below 1 and is capped at
/// `max_factor`. A date with no recorded events is neutral: no evidence is
/// not evidence of impossibility.
pub fn date_specific_factor(
    stats: &HistoricalStats,
    month: u32,
    day: u32,
    config: &ModelConfig,
) -> Factor {
    let params = &config.date_specific;
    let label = format!("{} {day}", month_name(month));
    let count = stats.date_count(month, day);

    if count == 0 {
        return Factor::neutral(format!("no recorded no-hitters on {label}"));
    }

    let in_season = stats.count_in_months(&config.season.months);
    let days = season_days(&config.season) as f64;
    let expected = in_season as f64 / days;
    if !(expected > 0.0) {
        return Factor::neutral(format!(
            "{label}: no in-season baseline to compare {count} event(s) against"
        ));
    }

    let ratio = count as f64 / expected;
    let credibility = count as f64 / (count as f64 + params.shrinkage);
    let factor = (1.0 + credibility * (ratio - 1.0))
        .max(1.0)
        .min(params.max_factor);

    Factor::estimated(
        factor,
        count,
        format!("{label}: {count} recorded vs {expected:.2} expected per calendar day"),
    )
}
