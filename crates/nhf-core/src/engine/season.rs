//! Season calendar helpers.

use chrono::{Datelike, NaiveDate};
use nhf_config::SeasonParams;
use serde::Serialize;

/// Nominal days per month (February counted as 28).
const MONTH_DAYS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Nominal length of `month` (1-12); 0 for anything else.
pub fn days_in_month(month: u32) -> u32 {
    match month {
        1..=12 => MONTH_DAYS[(month - 1) as usize],
        _ => 0,
    }
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1..=12 => MONTH_NAMES[(month - 1) as usize],
        _ => "Unknown",
    }
}

/// Calendar days covered by the season months (214 for April-October).
pub fn season_days(season: &SeasonParams) -> u32 {
    season.months.iter().map(|&m| days_in_month(m)).sum()
}

pub fn is_in_season(date: NaiveDate, season: &SeasonParams) -> bool {
    season.contains_month(date.month())
}

/// Where a date sits relative to the season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeasonStatus {
    pub date: NaiveDate,
    pub in_season: bool,
    pub month: &'static str,
    /// First day of the next season month, when `date` is off-season.
    pub next_season_day: Option<NaiveDate>,
    pub days_until_season: Option<i64>,
}

pub fn season_status(date: NaiveDate, season: &SeasonParams) -> SeasonStatus {
    let in_season = is_in_season(date, season);
    let next_season_day = if in_season {
        None
    } else {
        next_season_start(date, season)
    };
    SeasonStatus {
        date,
        in_season,
        month: month_name(date.month()),
        next_season_day,
        days_until_season: next_season_day.map(|d| (d - date).num_days()),
    }
}

/// First day of the earliest season month strictly after `date`'s month.
fn next_season_start(date: NaiveDate, season: &SeasonParams) -> Option<NaiveDate> {
    (1..=12u32).find_map(|offset| {
        let index = date.month0() + offset;
        let year = date.year() + (index / 12) as i32;
        let month = index % 12 + 1;
        if season.contains_month(month) {
            NaiveDate::from_ymd_opt(year, month, 1)
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn default_season_has_214_days() {
        assert_eq!(season_days(&SeasonParams::default()), 214);
    }

    #[test]
    fn january_is_off_season_until_april() {
        let status = season_status(date(2025, 1, 15), &SeasonParams::default());
        assert!(!status.in_season);
        assert_eq!(status.month, "January");
        assert_eq!(status.next_season_day, Some(date(2025, 4, 1)));
        assert_eq!(status.days_until_season, Some(76));
    }

    #[test]
    fn november_rolls_into_next_year() {
        let status = season_status(date(2024, 11, 20), &SeasonParams::default());
        assert_eq!(status.next_season_day, Some(date(2025, 4, 1)));
    }

    #[test]
    fn in_season_has_no_next_start() {
        let status = season_status(date(2024, 9, 20), &SeasonParams::default());
        assert!(status.in_season);
        assert!(status.next_season_day.is_none());
    }

    #[test]
    fn month_helpers_reject_out_of_range() {
        assert_eq!(days_in_month(13), 0);
        assert_eq!(month_name(0), "Unknown");
        assert_eq!(month_name(9), "September");
    }
}
