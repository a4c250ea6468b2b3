//! Flat-file event table (`no_hitters.csv`).
//!
//! Header: `date,pitcher,team,opponent,notes`. Column order is resolved from
//! the header, `notes` is optional. Rows that fail validation are reported in
//! a [`LoadReport`] and skipped unless the store is strict.

use chrono::{NaiveDate, NaiveDateTime};
use nhf_common::{Error, NoHitterEvent, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::{sort_events, EventStore};
use crate::logging::event_names;

/// File name of the event table inside the data directory.
pub const EVENTS_FILE_NAME: &str = "no_hitters.csv";

const REQUIRED_COLUMNS: [&str; 4] = ["date", "pitcher", "team", "opponent"];

/// A row that was dropped while loading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRow {
    /// 1-based line number in the file (the header is line 1).
    pub line: usize,
    pub reason: String,
}

impl SkippedRow {
    pub fn to_error(&self) -> Error {
        Error::MalformedEvent {
            line: Some(self.line),
            reason: self.reason.clone(),
        }
    }
}

/// Outcome of reading the event table.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// Usable events, sorted by date.
    pub events: Vec<NoHitterEvent>,
    pub skipped: Vec<SkippedRow>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    /// All rows as events, or an error naming every skipped line.
    ///
    /// Used before rewriting the table, which would otherwise drop the
    /// skipped rows.
    pub fn into_complete(self) -> Result<Vec<NoHitterEvent>> {
        let Some(first) = self.skipped.first() else {
            return Ok(self.events);
        };
        let lines = self
            .skipped
            .iter()
            .map(|s| s.line.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Err(Error::MalformedEvent {
            line: Some(first.line),
            reason: format!(
                "{} unreadable row(s) would be lost by rewriting the table (lines {lines}); {}",
                self.skipped.len(),
                first.reason
            ),
        })
    }
}

struct Columns {
    date: usize,
    pitcher: usize,
    team: usize,
    opponent: usize,
    notes: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().trim_start_matches('\u{feff}').eq_ignore_ascii_case(name))
        };
        let mut required = [0usize; 4];
        for (slot, name) in required.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = find(name).ok_or_else(|| Error::Csv(format!("missing '{name}' column")))?;
        }
        Ok(Self {
            date: required[0],
            pitcher: required[1],
            team: required[2],
            opponent: required[3],
            notes: find("notes"),
        })
    }
}

/// Parse `YYYY-MM-DD`, also accepting a trailing time component.
pub fn parse_event_date(raw: &str) -> std::result::Result<NaiveDate, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("missing date".to_string());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date()))
        .map_err(|_| format!("unparseable date '{raw}'"))
}

/// Parse event-table text.
///
/// With `strict`, the first malformed row is returned as an error.
pub fn parse_events(text: &str, strict: bool) -> Result<LoadReport> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| Error::Csv(e.to_string()))?
        .clone();
    let columns = Columns::from_headers(&headers)?;

    let mut report = LoadReport::default();
    for (index, result) in reader.records().enumerate() {
        let fallback_line = index + 2;
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                let line = e
                    .position()
                    .map(|p| p.line() as usize)
                    .unwrap_or(fallback_line);
                let skipped = SkippedRow {
                    line,
                    reason: e.to_string(),
                };
                if strict {
                    return Err(skipped.to_error());
                }
                report.skipped.push(skipped);
                continue;
            }
        };
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(fallback_line);

        match row_to_event(&record, &columns) {
            Ok(event) => report.events.push(event),
            Err(reason) => {
                let skipped = SkippedRow { line, reason };
                if strict {
                    return Err(skipped.to_error());
                }
                report.skipped.push(skipped);
            }
        }
    }

    sort_events(&mut report.events);
    Ok(report)
}

fn row_to_event(
    record: &csv::StringRecord,
    columns: &Columns,
) -> std::result::Result<NoHitterEvent, String> {
    let field = |i: usize| record.get(i).unwrap_or("").trim();

    let date = parse_event_date(field(columns.date))?;
    let mut event = NoHitterEvent::new(
        date,
        field(columns.pitcher),
        field(columns.team),
        field(columns.opponent),
    );
    if let Some(notes) = columns.notes {
        event = event.with_notes(field(notes));
    }
    event.validate().map_err(|e| match e {
        Error::MalformedEvent { reason, .. } => reason,
        other => other.to_string(),
    })?;
    Ok(event)
}

/// Render events as event-table text, sorted by date.
pub fn render_events(events: &[NoHitterEvent]) -> Result<String> {
    let mut sorted = events.to_vec();
    sort_events(&mut sorted);

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["date", "pitcher", "team", "opponent", "notes"])
        .map_err(|e| Error::Csv(e.to_string()))?;
    for event in &sorted {
        let date = event.date.format("%Y-%m-%d").to_string();
        writer
            .write_record([
                date.as_str(),
                event.pitcher.as_str(),
                event.team.as_str(),
                event.opponent.as_str(),
                event.notes.as_deref().unwrap_or(""),
            ])
            .map_err(|e| Error::Csv(e.to_string()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Csv(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| Error::Csv(e.to_string()))
}

/// CSV-backed event store.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
    strict: bool,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            strict: false,
        }
    }

    /// Store for `no_hitters.csv` inside `data_dir`.
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(EVENTS_FILE_NAME))
    }

    /// Fail on the first malformed row instead of skipping it.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read and validate every row.
    pub fn load(&self) -> Result<LoadReport> {
        let text = fs::read_to_string(&self.path)?;
        let report = parse_events(&text, self.strict)?;
        for skipped in &report.skipped {
            warn!(
                event = event_names::DATA_RECORD_SKIPPED,
                path = %self.path.display(),
                line = skipped.line,
                reason = %skipped.reason,
                "skipping malformed event row"
            );
        }
        debug!(
            event = event_names::DATA_LOADED,
            path = %self.path.display(),
            events = report.events.len(),
            skipped = report.skipped.len(),
            "event table loaded"
        );
        Ok(report)
    }

    /// Write the table sorted by date, replacing the file atomically.
    pub fn save(&self, events: &[NoHitterEvent]) -> Result<usize> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = render_events(events)?;
        let tmp = self.path.with_extension("csv.tmp");
        fs::write(&tmp, text)?;
        fs::rename(&tmp, &self.path)?;
        debug!(
            event = event_names::DATA_WRITTEN,
            path = %self.path.display(),
            events = events.len(),
            "event table written"
        );
        Ok(events.len())
    }
}

impl EventStore for CsvStore {
    fn events(&self) -> Result<Vec<NoHitterEvent>> {
        Ok(self.load()?.events)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
