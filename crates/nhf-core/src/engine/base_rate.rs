//! Long-run daily probability.
//!
//! Events are treated as a Poisson process over game-days:
//! `lambda = events / (seasons * season_length_days)` and the daily
//! probability of at least one event is `1 - exp(-lambda)`.

use nhf_common::{Error, Result};
use nhf_config::SeasonParams;
use nhf_math::poisson_at_least_one;
use serde::Serialize;

use super::stats::HistoricalStats;

/// Base rate with the quantities it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BaseRate {
    /// Daily probability of at least one no-hitter.
    pub probability: f64,
    /// Expected no-hitters per game-day.
    pub lambda: f64,
    pub events: u32,
    pub seasons: u32,
    pub season_length_days: f64,
}

/// Compute the base rate over the historical window.
///
/// Every usable event counts, including several on one date.
pub fn base_rate(stats: &HistoricalStats, season: &SeasonParams) -> Result<BaseRate> {
    if stats.is_empty() {
        return Err(Error::InsufficientData(if stats.supplied() == 0 {
            "event table is empty".to_string()
        } else {
            format!(
                "none of the {} supplied events passed validation",
                stats.supplied()
            )
        }));
    }

    let (first, last) = stats
        .window(season)
        .ok_or_else(|| Error::InsufficientData("event table has no dated events".to_string()))?;
    let seasons = (last - first + 1).max(1) as u32;
    let game_days = seasons as f64 * season.season_length_days;
    if !(game_days > 0.0) {
        return Err(Error::InsufficientData(format!(
            "historical window has no game-days ({seasons} seasons of {} days)",
            season.season_length_days
        )));
    }

    let events = stats.total();
    let lambda = events as f64 / game_days;

    Ok(BaseRate {
        probability: poisson_at_least_one(lambda),
        lambda,
        events,
        seasons,
        season_length_days: season.season_length_days,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use nhf_common::NoHitterEvent;

    fn event(y: i32, m: u32, d: u32) -> NoHitterEvent {
        NoHitterEvent::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), "P", "T", "O")
    }

    #[test]
    fn rate_over_inclusive_year_span() {
        let stats = HistoricalStats::from_events(&[event(2019, 5, 7), event(2021, 6, 2)]);
        let rate = base_rate(&stats, &SeasonParams::default()).unwrap();
        assert_eq!(rate.seasons, 3);
        assert!((rate.lambda - 2.0 / 540.0).abs() < 1e-15);
        assert!((rate.probability - (1.0 - (-2.0f64 / 540.0).exp())).abs() < 1e-15);
    }

    #[test]
    fn duplicate_date_changes_rate() {
        let base = vec![event(2019, 5, 7), event(2021, 6, 2)];
        let mut with_dup = base.clone();
        with_dup.push(event(2021, 6, 2));

        let a = base_rate(&HistoricalStats::from_events(&base), &SeasonParams::default()).unwrap();
        let b = base_rate(&HistoricalStats::from_events(&with_dup), &SeasonParams::default()).unwrap();
        assert!(b.probability > a.probability);
        assert_eq!(b.events, 3);
    }

    #[test]
    fn empty_table_is_insufficient_data() {
        let err = base_rate(&HistoricalStats::from_events(&[]), &SeasonParams::default()).unwrap_err();
        assert_eq!(err.code(), 30);
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn all_malformed_is_insufficient_data() {
        let mut bad = event(2019, 5, 7);
        bad.pitcher.clear();
        let err = base_rate(&HistoricalStats::from_events(&[bad]), &SeasonParams::default()).unwrap_err();
        assert!(err.to_string().contains("passed validation"));
    }

    #[test]
    fn configured_window_widens_denominator() {
        let stats = HistoricalStats::from_events(&[event(2019, 5, 7), event(2021, 6, 2)]);
        let season = SeasonParams {
            history_start_year: Some(2012),
            ..SeasonParams::default()
        };
        let rate = base_rate(&stats, &season).unwrap();
        assert_eq!(rate.seasons, 10);
    }
}
