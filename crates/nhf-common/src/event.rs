//! Historical no-hitter event records.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One recorded no-hitter.
///
/// Records are immutable once loaded. Two events may share a date; both
/// count toward every statistic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct NoHitterEvent {
    pub date: NaiveDate,
    pub pitcher: String,
    pub team: String,
    pub opponent: String,
    /// Free-form annotation, e.g. "Perfect game" or "Combined".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NoHitterEvent {
    pub fn new(
        date: NaiveDate,
        pitcher: impl Into<String>,
        team: impl Into<String>,
        opponent: impl Into<String>,
    ) -> Self {
        Self {
            date,
            pitcher: pitcher.into(),
            team: team.into(),
            opponent: opponent.into(),
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        let notes = notes.into();
        self.notes = if notes.trim().is_empty() { None } else { Some(notes) };
        self
    }

    /// Check that every required field is present.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("pitcher", &self.pitcher),
            ("team", &self.team),
            ("opponent", &self.opponent),
        ] {
            if value.trim().is_empty() {
                return Err(Error::MalformedEvent {
                    line: None,
                    reason: format!("missing {field} for event on {}", self.date),
                });
            }
        }
        Ok(())
    }

    pub fn is_perfect_game(&self) -> bool {
        self.notes_contain("perfect game")
    }

    pub fn is_combined(&self) -> bool {
        self.notes_contain("combined")
    }

    /// Stable single-line encoding used for content fingerprints.
    pub fn canonical_line(&self) -> String {
        format!(
            "{}\u{1f}{}\u{1f}{}\u{1f}{}\u{1f}{}",
            self.date.format("%Y-%m-%d"),
            self.pitcher.trim(),
            self.team.trim(),
            self.opponent.trim(),
            self.notes.as_deref().unwrap_or("").trim()
        )
    }

    fn notes_contain(&self, needle: &str) -> bool {
        self.notes
            .as_deref()
            .map(|n| n.to_lowercase().contains(needle))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn validate_rejects_blank_pitcher() {
        let event = NoHitterEvent::new(date(2012, 6, 1), "  ", "CWS", "SEA");
        let err = event.validate().unwrap_err();
        assert!(err.to_string().contains("missing pitcher"));
    }

    #[test]
    fn validate_accepts_complete_record() {
        let event = NoHitterEvent::new(date(2012, 6, 1), "Philip Humber", "CWS", "SEA")
            .with_notes("Perfect game");
        assert!(event.validate().is_ok());
        assert!(event.is_perfect_game());
        assert!(!event.is_combined());
    }

    #[test]
    fn blank_notes_become_none() {
        let event = NoHitterEvent::new(date(2019, 6, 21), "Walker Buehler", "LAD", "COL")
            .with_notes("   ");
        assert_eq!(event.notes, None);
    }

    #[test]
    fn canonical_line_is_whitespace_insensitive() {
        let a = NoHitterEvent::new(date(2021, 5, 19), "Corey Kluber", "NYY", "TEX");
        let b = NoHitterEvent::new(date(2021, 5, 19), " Corey Kluber ", "NYY", "TEX ");
        assert_eq!(a.canonical_line(), b.canonical_line());
    }

    #[test]
    fn serde_omits_missing_notes() {
        let event = NoHitterEvent::new(date(2024, 8, 10), "Framber Valdez", "HOU", "TEX");
        let json = serde_json::to_string(&event).unwrap();
        assert!(!json.contains("notes"));
        let back: NoHitterEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
