//! Seasonality by calendar month.

use nhf_common::Factor;
use nhf_config::ModelConfig;

use super::season::{days_in_month, month_name, season_days};
use super::stats::HistoricalStats;

/// Observed share of in-season events in `month` over the share its days
/// would get under a uniform spread.
///
/// The observed share is Laplace-smoothed so a month with no recorded
/// events still gets a small positive factor, then floored at
/// `min_in_season_factor`. Months outside the season get the fixed
/// `off_season_factor`.
pub fn monthly_factor(stats: &HistoricalStats, month: u32, config: &ModelConfig) -> Factor {
    let season = &config.season;
    let params = &config.monthly;
    let name = month_name(month);
    let count = stats.month_count(month);

    if !season.contains_month(month) {
        return Factor::estimated(
            params.off_season_factor,
            count,
            format!("{name} is outside the season; games are not normally scheduled"),
        );
    }

    let in_season = stats.count_in_months(&season.months);
    if in_season == 0 {
        return Factor::neutral(format!(
            "no in-season events recorded; {name} treated as average"
        ));
    }

    let total_days = season_days(season) as f64;
    let k = season.months.len() as f64;
    let observed = (count as f64 + params.smoothing) / (in_season as f64 + params.smoothing * k);
    let expected = days_in_month(month) as f64 / total_days;
    let factor = (observed / expected).max(params.min_in_season_factor);

    Factor::estimated(
        factor,
        count,
        format!(
            "{name}: {count} of {in_season} in-season events ({:.1}%) vs {:.1}% expected from its share of season days",
            count as f64 / in_season as f64 * 100.0,
            expected * 100.0
        ),
    )
}
