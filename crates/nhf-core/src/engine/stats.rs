//! Historical statistics derived from an event snapshot.
//!
//! `HistoricalStats` is the only thing the factor functions look at. It is
//! built once per distinct snapshot and shared through the predictor cache,
//! keyed by [`fingerprint_events`].

use chrono::{Datelike, NaiveDate};
use nhf_common::NoHitterEvent;
use nhf_config::SeasonParams;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// An input record that failed re-validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedEvent {
    /// Position in the supplied slice.
    pub index: usize,
    pub reason: String,
}

/// Counts and gaps over the validated events.
#[derive(Debug, Clone)]
pub struct HistoricalStats {
    fingerprint: String,
    supplied: usize,
    rejected: Vec<RejectedEvent>,
    /// Sorted, duplicates kept.
    dates: Vec<NaiveDate>,
    month_counts: [u32; 13],
    date_counts: BTreeMap<(u32, u32), u32>,
    year_counts: BTreeMap<i32, u32>,
}

impl HistoricalStats {
    /// Re-validate and tally the events. Bad records are skipped and listed
    /// in [`HistoricalStats::rejected`].
    pub fn from_events(events: &[NoHitterEvent]) -> Self {
        let mut rejected = Vec::new();
        let mut dates = Vec::with_capacity(events.len());
        let mut month_counts = [0u32; 13];
        let mut date_counts = BTreeMap::new();
        let mut year_counts = BTreeMap::new();

        for (index, event) in events.iter().enumerate() {
            if let Err(e) = event.validate() {
                rejected.push(RejectedEvent {
                    index,
                    reason: e.to_string(),
                });
                continue;
            }
            let date = event.date;
            dates.push(date);
            month_counts[date.month() as usize] += 1;
            *date_counts.entry((date.month(), date.day())).or_insert(0) += 1;
            *year_counts.entry(date.year()).or_insert(0) += 1;
        }
        dates.sort_unstable();

        Self {
            fingerprint: fingerprint_events(events),
            supplied: events.len(),
            rejected,
            dates,
            month_counts,
            date_counts,
            year_counts,
        }
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Number of records handed in, valid or not.
    pub fn supplied(&self) -> usize {
        self.supplied
    }

    pub fn rejected(&self) -> &[RejectedEvent] {
        &self.rejected
    }

    /// Number of usable events.
    pub fn total(&self) -> u32 {
        self.dates.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn month_count(&self, month: u32) -> u32 {
        self.month_counts.get(month as usize).copied().unwrap_or(0)
    }

    pub fn date_count(&self, month: u32, day: u32) -> u32 {
        self.date_counts.get(&(month, day)).copied().unwrap_or(0)
    }

    /// Events in any of `months`.
    pub fn count_in_months(&self, months: &[u32]) -> u32 {
        months.iter().map(|&m| self.month_count(m)).sum()
    }

    /// Events with `first <= year <= last`.
    pub fn count_in_years(&self, first: i32, last: i32) -> u32 {
        if first > last {
            return 0;
        }
        self.year_counts.range(first..=last).map(|(_, c)| *c).sum()
    }

    pub fn first_year(&self) -> Option<i32> {
        self.dates.first().map(|d| d.year())
    }

    pub fn last_year(&self) -> Option<i32> {
        self.dates.last().map(|d| d.year())
    }

    /// Inclusive season window: configured bounds, else the data's own span.
    pub fn window(&self, season: &SeasonParams) -> Option<(i32, i32)> {
        let first = season.history_start_year.or(self.first_year())?;
        let last = season.history_end_year.or(self.last_year())?;
        Some((first, last.max(first)))
    }

    /// Events strictly before `target`.
    pub fn dates_before(&self, target: NaiveDate) -> &[NaiveDate] {
        let end = self.dates.partition_point(|d| *d < target);
        &self.dates[..end]
    }

    /// Gaps in days between consecutive events strictly before `target`.
    pub fn gaps_before(&self, target: NaiveDate) -> Vec<f64> {
        self.dates_before(target)
            .windows(2)
            .map(|w| (w[1] - w[0]).num_days() as f64)
            .collect()
    }
}

/// SHA-256 over the canonical lines of every supplied record.
///
/// Lines are sorted first, so the fingerprint depends on content only and
/// not on the order the caller happened to supply.
pub fn fingerprint_events(events: &[NoHitterEvent]) -> String {
    let mut lines: Vec<String> = events.iter().map(NoHitterEvent::canonical_line).collect();
    lines.sort_unstable();

    let mut hasher = Sha256::new();
    for line in &lines {
        hasher.update(line.as_bytes());
        hasher.update(b"\n");
    }
    hex::encode(hasher.finalize())
}

/// Events whose year falls inside the configured history window.
pub fn within_window(events: &[NoHitterEvent], season: &SeasonParams) -> Vec<NoHitterEvent> {
    events
        .iter()
        .filter(|e| {
            let year = e.date.year();
            season.history_start_year.is_none_or(|start| year >= start)
                && season.history_end_year.is_none_or(|end| year <= end)
        })
        .cloned()
        .collect()
}
