//! Daily prediction ledger (`daily_predictions.json`).
//!
//! One entry per target date; recording the same date again replaces the
//! entry. Only the most recent `retain` dates are kept. The file is rewritten
//! through a temp file and rename so a crash never leaves half a ledger.

use chrono::{DateTime, NaiveDate, Utc};
use nhf_common::{PredictionResult, Result, SCHEMA_VERSION};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::logging::event_names;

/// File name of the ledger inside the data directory.
pub const LEDGER_FILE_NAME: &str = "daily_predictions.json";

/// A recorded prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub prediction: PredictionResult,
    pub recorded_at: DateTime<Utc>,
}

/// On-disk ledger contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    pub schema_version: String,
    #[serde(default)]
    pub entries: BTreeMap<NaiveDate, LedgerEntry>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            entries: BTreeMap::new(),
        }
    }
}

impl Ledger {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, date: NaiveDate) -> Option<&LedgerEntry> {
        self.entries.get(&date)
    }

    /// Entry with the latest target date.
    pub fn latest(&self) -> Option<&LedgerEntry> {
        self.entries.values().next_back()
    }

    /// Entry for `today`, falling back to the latest one.
    pub fn today_or_latest(&self, today: NaiveDate) -> Option<&LedgerEntry> {
        self.get(today).or_else(|| self.latest())
    }

    /// Up to `limit` entries, newest first.
    pub fn recent(&self, limit: usize) -> Vec<&LedgerEntry> {
        self.entries.values().rev().take(limit).collect()
    }

    /// Insert or replace the entry for the prediction's date.
    pub fn insert(&mut self, prediction: PredictionResult, recorded_at: DateTime<Utc>) {
        self.entries.insert(
            prediction.date,
            LedgerEntry {
                prediction,
                recorded_at,
            },
        );
    }

    /// Drop the oldest dates beyond `retain`. Returns how many were removed.
    pub fn prune(&mut self, retain: usize) -> usize {
        let excess = self.entries.len().saturating_sub(retain);
        for _ in 0..excess {
            self.entries.pop_first();
        }
        excess
    }
}

/// File-backed ledger.
#[derive(Debug, Clone)]
pub struct LedgerStore {
    path: PathBuf,
}

impl LedgerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Ledger at `<dir>/daily_predictions.json`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(LEDGER_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the ledger; a missing file is an empty ledger.
    pub fn load(&self) -> Result<Ledger> {
        if !self.path.exists() {
            return Ok(Ledger::default());
        }
        let file = File::open(&self.path)?;
        let ledger = serde_json::from_reader(BufReader::new(file))?;
        Ok(ledger)
    }

    pub fn save(&self, ledger: &Ledger) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.path.with_extension("json.tmp");
        {
            let writer = BufWriter::new(File::create(&tmp)?);
            serde_json::to_writer_pretty(writer, ledger)?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Record `prediction`, prune to `retain` dates and persist.
    pub fn record(
        &self,
        prediction: PredictionResult,
        recorded_at: DateTime<Utc>,
        retain: usize,
    ) -> Result<Ledger> {
        let mut ledger = self.load()?;
        let date = prediction.date;
        ledger.insert(prediction, recorded_at);
        let pruned = ledger.prune(retain);
        self.save(&ledger)?;

        debug!(
            event = event_names::LEDGER_RECORDED,
            date = %date,
            entries = ledger.len(),
            path = %self.path.display()
        );
        if pruned > 0 {
            debug!(event = event_names::LEDGER_PRUNED, pruned, retain);
        }
        Ok(ledger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::predict;
    use nhf_common::NoHitterEvent;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn prediction_for(target: NaiveDate) -> PredictionResult {
        let events = vec![
            NoHitterEvent::new(date(2019, 5, 7), "A", "T", "O"),
            NoHitterEvent::new(date(2021, 6, 2), "B", "T", "O"),
        ];
        predict(&events, target, 1).unwrap()
    }

    fn at(day: u32) -> DateTime<Utc> {
        date(2024, 6, day).and_hms_opt(12, 0, 0).unwrap().and_utc()
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let ledger = LedgerStore::in_dir(dir.path()).load().unwrap();
        assert!(ledger.is_empty());
        assert!(ledger.latest().is_none());
    }

    #[test]
    fn record_persists_and_replaces_same_date() {
        let dir = TempDir::new().unwrap();
        let store = LedgerStore::in_dir(dir.path());
        store.record(prediction_for(date(2024, 6, 1)), at(1), 30).unwrap();
        store.record(prediction_for(date(2024, 6, 1)), at(2), 30).unwrap();

        let ledger = store.load().unwrap();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.get(date(2024, 6, 1)).unwrap().recorded_at, at(2));
        assert!(!store.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn retains_most_recent_dates() {
        let dir = TempDir::new().unwrap();
        let store = LedgerStore::in_dir(dir.path());
        for day in 1..=5 {
            store.record(prediction_for(date(2024, 6, day)), at(day), 3).unwrap();
        }
        let ledger = store.load().unwrap();
        let dates: Vec<_> = ledger.entries.keys().copied().collect();
        assert_eq!(dates, vec![date(2024, 6, 3), date(2024, 6, 4), date(2024, 6, 5)]);
    }

    #[test]
    fn today_falls_back_to_latest() {
        let mut ledger = Ledger::default();
        ledger.insert(prediction_for(date(2024, 6, 1)), at(1));
        ledger.insert(prediction_for(date(2024, 6, 3)), at(3));
        assert_eq!(
            ledger.today_or_latest(date(2024, 6, 1)).unwrap().prediction.date,
            date(2024, 6, 1)
        );
        assert_eq!(
            ledger.today_or_latest(date(2024, 6, 9)).unwrap().prediction.date,
            date(2024, 6, 3)
        );
        let recent: Vec<_> = ledger.recent(5).iter().map(|e| e.prediction.date).collect();
        assert_eq!(recent, vec![date(2024, 6, 3), date(2024, 6, 1)]);
    }

    #[test]
    fn corrupt_file_is_json_error() {
        let dir = TempDir::new().unwrap();
        let store = LedgerStore::in_dir(dir.path());
        std::fs::write(store.path(), "{not json").unwrap();
        assert_eq!(store.load().unwrap_err().code(), 61);
    }
}
