//! Event table validation report.

use chrono::{Datelike, NaiveDate};
use nhf_common::NoHitterEvent;
use nhf_config::SeasonParams;
use serde::Serialize;
use std::collections::BTreeSet;

use super::csv::SkippedRow;

/// Completeness report for an event table.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub total_records: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    /// Events whose date already appeared earlier in the table.
    pub duplicate_dates: usize,
    /// Events outside the configured season months.
    pub off_season_events: usize,
    /// Events dated after `today`.
    pub future_events: usize,
    pub skipped_rows: Vec<SkippedRow>,
    pub issues: Vec<String>,
}

impl ValidationReport {
    /// No skipped rows and nothing suspicious.
    pub fn is_clean(&self) -> bool {
        self.skipped_rows.is_empty() && self.issues.is_empty()
    }
}

/// Build a validation report over loaded events.
///
/// Duplicate dates are legal (two no-hitters can happen on one day); they are
/// counted for information only.
pub fn validate_events(
    events: &[NoHitterEvent],
    skipped: &[SkippedRow],
    season: &SeasonParams,
    today: NaiveDate,
) -> ValidationReport {
    let mut seen = BTreeSet::new();
    let mut duplicate_dates = 0;
    let mut off_season_events = 0;
    let mut future_events = 0;

    for event in events {
        if !seen.insert(event.date) {
            duplicate_dates += 1;
        }
        if !season.contains_month(event.date.month()) {
            off_season_events += 1;
        }
        if event.date > today {
            future_events += 1;
        }
    }

    let mut issues = Vec::new();
    if events.is_empty() {
        issues.push("event table contains no usable records".to_string());
    }
    if off_season_events > 0 {
        issues.push(format!(
            "{off_season_events} event(s) fall outside the season months"
        ));
    }
    if future_events > 0 {
        issues.push(format!("{future_events} event(s) are dated after {today}"));
    }
    if let Some(first) = events.first() {
        if first.date.year() < season.min_year {
            issues.push(format!(
                "earliest event {} predates season.min_year {}",
                first.date, season.min_year
            ));
        }
    }

    ValidationReport {
        total_records: events.len(),
        first_date: events.first().map(|e| e.date),
        last_date: events.last().map(|e| e.date),
        duplicate_dates,
        off_season_events,
        future_events,
        skipped_rows: skipped.to_vec(),
        issues,
    }
}
