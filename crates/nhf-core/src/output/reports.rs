use chrono::NaiveDate;
use serde::Serialize;

use super::{percent, Render};
use crate::config::ConfigSnapshot;
use crate::engine::season::month_name;
use crate::engine::SeasonStatus;
use crate::ledger::LedgerEntry;
use crate::store::{DataSummary, ValidationReport};
use nhf_config::ModelConfig;
use std::path::PathBuf;

/// What `nhf status` reports.
#[derive(Debug, Clone, Serialize)]
pub struct StatusView {
    pub today: NaiveDate,
    pub season: SeasonStatus,
    /// Today's ledger entry, or the most recent one.
    pub prediction: Option<LedgerEntry>,
    pub is_today: bool,
    pub ledger_entries: usize,
}

/// What `nhf history` reports, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryView {
    pub entries: Vec<LedgerEntry>,
}

/// What `nhf data update` reports.
#[derive(Debug, Clone, Serialize)]
pub struct DataUpdateView {
    pub path: PathBuf,
    pub total_events: usize,
    pub added: usize,
}

/// What `nhf config show` and `nhf config validate` report.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigView {
    pub status: &'static str,
    pub source: ConfigSnapshot,
    pub model: ModelConfig,
}

impl Render for SeasonStatus {
    fn markdown(&self) -> String {
        let mut out = format!("# Season status for {}\n\n", self.date);
        if self.in_season {
            out.push_str(&format!("{} is in season.\n", self.month));
        } else {
            out.push_str(&format!("{} is outside the season.\n", self.month));
            if let (Some(day), Some(days)) = (self.next_season_day, self.days_until_season) {
                out.push_str(&format!("\nThe next season month starts {day} ({days} days).\n"));
            }
        }
        out
    }

    fn summary(&self) -> String {
        match (self.in_season, self.days_until_season) {
            (true, _) => format!("{}: in season", self.date),
            (false, Some(days)) => format!("{}: off season, {days} days until the season", self.date),
            (false, None) => format!("{}: off season", self.date),
        }
    }
}

impl Render for DataSummary {
    fn markdown(&self) -> String {
        let mut out = String::from("# Historical no-hitters\n\n");
        out.push_str(&format!("- Events: {}\n", self.total_events));
        if let (Some(first), Some(last)) = (self.first_date, self.last_date) {
            out.push_str(&format!("- Range: {first} to {last}\n"));
        }
        if let Some(gap) = self.mean_gap_days {
            out.push_str(&format!("- Mean gap: {gap:.1} days\n"));
        }
        if let Some(gap) = self.longest_gap_days {
            out.push_str(&format!("- Longest gap: {gap} days\n"));
        }
        out.push_str(&format!("- Perfect games: {}\n", self.perfect_games));
        out.push_str(&format!("- Combined: {}\n", self.combined));
        if let Some(event) = &self.most_recent {
            out.push_str(&format!(
                "- Most recent: {} by {} ({} vs {})\n",
                event.date, event.pitcher, event.team, event.opponent
            ));
        }

        if !self.by_month.is_empty() {
            out.push_str("\n## By month\n\n");
            out.push_str("| Month | Events |\n|---|---|\n");
            for (month, count) in &self.by_month {
                out.push_str(&format!("| {} | {count} |\n", month_name(*month)));
            }
        }
        if !self.by_decade.is_empty() {
            out.push_str("\n## By decade\n\n");
            out.push_str("| Decade | Events |\n|---|---|\n");
            for (decade, count) in &self.by_decade {
                out.push_str(&format!("| {decade}s | {count} |\n"));
            }
        }
        if !self.top_dates.is_empty() {
            out.push_str("\n## Busiest calendar dates\n\n");
            for date in &self.top_dates {
                out.push_str(&format!(
                    "- {} {}: {}\n",
                    month_name(date.month),
                    date.day,
                    date.count
                ));
            }
        }
        out
    }

    fn summary(&self) -> String {
        match (self.first_date, self.last_date) {
            (Some(first), Some(last)) => {
                format!("{} events from {first} to {last}", self.total_events)
            }
            _ => "no events".to_string(),
        }
    }
}

impl Render for ValidationReport {
    fn markdown(&self) -> String {
        let mut out = String::from("# Event table validation\n\n");
        out.push_str(&format!("- Records: {}\n", self.total_records));
        out.push_str(&format!("- Skipped rows: {}\n", self.skipped_rows.len()));
        out.push_str(&format!("- Duplicate dates: {}\n", self.duplicate_dates));
        out.push_str(&format!("- Off-season events: {}\n", self.off_season_events));
        out.push_str(&format!("- Future events: {}\n", self.future_events));
        if !self.skipped_rows.is_empty() {
            out.push_str("\n## Skipped rows\n\n");
            for row in &self.skipped_rows {
                out.push_str(&format!("- line {}: {}\n", row.line, row.reason));
            }
        }
        if !self.issues.is_empty() {
            out.push_str("\n## Issues\n\n");
            for issue in &self.issues {
                out.push_str(&format!("- {issue}\n"));
            }
        }
        out
    }

    fn summary(&self) -> String {
        if self.is_clean() {
            format!("ok: {} records", self.total_records)
        } else {
            format!(
                "{} issue(s), {} skipped row(s) in {} records",
                self.issues.len(),
                self.skipped_rows.len(),
                self.total_records
            )
        }
    }
}

impl Render for StatusView {
    fn markdown(&self) -> String {
        let mut out = format!("# Forecaster status ({})\n\n", self.today);
        out.push_str(&format!("- {}\n", self.season.summary()));
        out.push_str(&format!("- Ledger entries: {}\n", self.ledger_entries));
        match &self.prediction {
            Some(entry) => {
                let label = if self.is_today { "Today's" } else { "Latest" };
                out.push_str(&format!(
                    "- {label} prediction: {} (recorded {})\n",
                    entry.prediction.summary(),
                    entry.recorded_at.format("%Y-%m-%d %H:%M UTC")
                ));
            }
            None => {
                out.push_str("- No prediction recorded yet; run `nhf predict --record`\n");
            }
        }
        out
    }

    fn summary(&self) -> String {
        let season = if self.season.in_season { "in season" } else { "off season" };
        match &self.prediction {
            Some(entry) => format!(
                "{}: {season}; {} {}",
                self.today,
                if self.is_today { "today" } else { "latest" },
                entry.prediction.summary()
            ),
            None => format!("{}: {season}; no prediction recorded", self.today),
        }
    }
}

impl Render for HistoryView {
    fn markdown(&self) -> String {
        let mut out = String::from("# Prediction history\n\n");
        if self.entries.is_empty() {
            out.push_str("No predictions recorded.\n");
            return out;
        }
        out.push_str("| Date | Probability | Interval | Recorded |\n|---|---|---|---|\n");
        for entry in &self.entries {
            let p = &entry.prediction;
            out.push_str(&format!(
                "| {} | {} | {} - {} | {} |\n",
                p.date,
                percent(p.probability),
                percent(p.confidence_interval.low),
                percent(p.confidence_interval.high),
                entry.recorded_at.format("%Y-%m-%d %H:%M")
            ));
        }
        out
    }

    fn summary(&self) -> String {
        self.entries
            .iter()
            .map(|e| e.prediction.summary())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Render for DataUpdateView {
    fn markdown(&self) -> String {
        format!(
            "# Event table updated\n\n- Path: {}\n- Events: {}\n- Added: {}\n",
            self.path.display(),
            self.total_events,
            self.added
        )
    }

    fn summary(&self) -> String {
        format!(
            "{}: {} events ({} added)",
            self.path.display(),
            self.total_events,
            self.added
        )
    }
}

impl Render for ConfigView {
    fn markdown(&self) -> String {
        let mut out = self.source.markdown();
        out.push_str(&format!("- Status: {}\n", self.status));
        let season = &self.model.season;
        out.push_str(&format!(
            "- Season months: {}\n",
            season
                .months
                .iter()
                .map(|m| month_name(*m))
                .collect::<Vec<_>>()
                .join(", ")
        ));
        out.push_str(&format!(
            "- Monte Carlo: {} trials at {:.0}%\n",
            self.model.monte_carlo.trials,
            self.model.monte_carlo.level * 100.0
        ));
        out
    }

    fn summary(&self) -> String {
        format!("{}: {}", self.status, self.source.summary())
    }
}

impl Render for ConfigSnapshot {
    fn markdown(&self) -> String {
        let mut out = String::from("# Model configuration\n\n");
        match &self.model_path {
            Some(path) => {
                out.push_str(&format!("- Source: {}\n", path.display()));
            }
            None => {
                out.push_str("- Source: built-in defaults\n");
            }
        }
        if let Some(hash) = &self.model_hash {
            out.push_str(&format!("- SHA-256: {hash}\n"));
        }
        out.push_str(&format!("- Schema version: {}\n", self.model_schema_version));
        out.push_str(&format!("- Config dir: {}\n", self.config_dir.display()));
        out
    }

    fn summary(&self) -> String {
        match &self.model_path {
            Some(path) => format!("model {} ({})", path.display(), self.model_schema_version),
            None => format!("built-in defaults ({})", self.model_schema_version),
        }
    }
}
