//! Descriptive summary of the event table (trends and history views).

use chrono::{Datelike, NaiveDate};
use nhf_common::NoHitterEvent;
use nhf_math::mean;
use serde::Serialize;
use std::collections::BTreeMap;

/// Occurrences of one calendar month/day across all seasons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarDateCount {
    pub month: u32,
    pub day: u32,
    pub count: usize,
}

/// Aggregate view of the event table.
#[derive(Debug, Clone, Serialize)]
pub struct DataSummary {
    pub total_events: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub by_month: BTreeMap<u32, usize>,
    /// Keyed by the first year of the decade (1990, 2000, ...).
    pub by_decade: BTreeMap<i32, usize>,
    pub mean_gap_days: Option<f64>,
    pub longest_gap_days: Option<i64>,
    pub most_recent: Option<NoHitterEvent>,
    pub top_dates: Vec<CalendarDateCount>,
    pub perfect_games: usize,
    pub combined: usize,
}

/// Summarize sorted events. `top_n` bounds the calendar-date ranking.
pub fn summarize(events: &[NoHitterEvent], top_n: usize) -> DataSummary {
    let mut by_month = BTreeMap::new();
    let mut by_decade = BTreeMap::new();
    let mut by_calendar: BTreeMap<(u32, u32), usize> = BTreeMap::new();

    for event in events {
        *by_month.entry(event.date.month()).or_insert(0) += 1;
        *by_decade.entry(decade_of(event.date.year())).or_insert(0) += 1;
        *by_calendar
            .entry((event.date.month(), event.date.day()))
            .or_insert(0) += 1;
    }

    let gaps: Vec<i64> = events
        .windows(2)
        .map(|w| (w[1].date - w[0].date).num_days())
        .collect();
    let gap_values: Vec<f64> = gaps.iter().map(|&g| g as f64).collect();

    let mut top_dates: Vec<CalendarDateCount> = by_calendar
        .into_iter()
        .map(|((month, day), count)| CalendarDateCount { month, day, count })
        .collect();
    // Highest count first; ties in calendar order.
    top_dates.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then(a.month.cmp(&b.month))
            .then(a.day.cmp(&b.day))
    });
    top_dates.truncate(top_n);

    DataSummary {
        total_events: events.len(),
        first_date: events.first().map(|e| e.date),
        last_date: events.last().map(|e| e.date),
        by_month,
        by_decade,
        mean_gap_days: if gap_values.is_empty() {
            None
        } else {
            Some(mean(&gap_values))
        },
        longest_gap_days: gaps.iter().copied().max(),
        most_recent: events.last().cloned(),
        top_dates,
        perfect_games: events.iter().filter(|e| e.is_perfect_game()).count(),
        combined: events.iter().filter(|e| e.is_combined()).count(),
    }
}

/// First year of the decade containing `year` (floor division).
pub fn decade_of(year: i32) -> i32 {
    year.div_euclid(10) * 10
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(y: i32, m: u32, d: u32, notes: &str) -> NoHitterEvent {
        NoHitterEvent::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), "P", "T", "O")
            .with_notes(notes)
    }

    #[test]
    fn counts_by_month_and_decade() {
        let events = vec![
            event(1999, 7, 18, "Perfect game"),
            event(2001, 9, 3, ""),
            event(2002, 9, 4, ""),
            event(2012, 9, 3, "Combined"),
        ];
        let summary = summarize(&events, 5);
        assert_eq!(summary.by_month[&9], 3);
        assert_eq!(summary.by_decade[&1990], 1);
        assert_eq!(summary.by_decade[&2000], 2);
        assert_eq!(summary.perfect_games, 1);
        assert_eq!(summary.combined, 1);
        assert_eq!(summary.top_dates[0], CalendarDateCount { month: 9, day: 3, count: 2 });
    }

    #[test]
    fn gaps_are_measured_in_days() {
        let events = vec![event(2020, 1, 1, ""), event(2020, 1, 11, ""), event(2020, 1, 31, "")];
        let summary = summarize(&events, 3);
        assert_eq!(summary.mean_gap_days, Some(15.0));
        assert_eq!(summary.longest_gap_days, Some(20));
    }

    #[test]
    fn empty_table_summary() {
        let summary = summarize(&[], 3);
        assert_eq!(summary.total_events, 0);
        assert!(summary.mean_gap_days.is_none());
        assert!(summary.most_recent.is_none());
    }

    #[test]
    fn decade_floor() {
        assert_eq!(decade_of(2024), 2020);
        assert_eq!(decade_of(1900), 1900);
        assert_eq!(decade_of(1909), 1900);
    }
}
