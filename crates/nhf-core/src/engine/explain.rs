//! Human-readable explanation and caveats for a prediction.

use chrono::{Datelike, NaiveDate};
use nhf_common::{Factor, FactorKind, FactorStatus};
use std::collections::BTreeMap;

use super::season::month_name;

/// Multipliers beyond these bounds are called out in the explanation.
const NOTABLE_HIGH: f64 = 1.1;
const NOTABLE_LOW: f64 = 0.9;

/// One-sentence summary of the factors that moved the estimate.
pub fn explain(
    date: NaiveDate,
    in_season: bool,
    factors: &BTreeMap<FactorKind, Factor>,
) -> String {
    let month = month_name(date.month());
    let multiplier = |kind: FactorKind| factors.get(&kind).map(|f| f.multiplier).unwrap_or(1.0);

    let mut parts = Vec::new();
    if !in_season {
        parts.push(format!("{month} is outside the season, so a no-hitter is very unlikely"));
    } else {
        let monthly = multiplier(FactorKind::Monthly);
        if monthly > NOTABLE_HIGH {
            parts.push(format!("{month} historically shows higher no-hitter frequency"));
        } else if monthly < NOTABLE_LOW {
            parts.push(format!("{month} historically shows lower no-hitter frequency"));
        }
    }

    if multiplier(FactorKind::DateSpecific) > NOTABLE_HIGH {
        parts.push(format!(
            "{month} {} is a historically significant date for no-hitters",
            date.day()
        ));
    }

    let decadal = multiplier(FactorKind::Decadal);
    if decadal > NOTABLE_HIGH {
        parts.push("the recent era produces more no-hitters than the long-run average".to_string());
    } else if decadal < NOTABLE_LOW {
        parts.push("the recent era produces fewer no-hitters than the long-run average".to_string());
    }

    let recency = multiplier(FactorKind::Recency);
    if recency > NOTABLE_HIGH {
        parts.push("it's been longer than average since the last no-hitter".to_string());
    } else if recency < NOTABLE_LOW {
        parts.push("a no-hitter happened more recently than the average gap".to_string());
    }

    if parts.is_empty() {
        return "Probability based on historical average patterns".to_string();
    }

    let mut sentence = parts.join("; ");
    if let Some(first) = sentence.get(..1) {
        let upper = first.to_uppercase();
        sentence.replace_range(..1, &upper);
    }
    sentence
}

/// Caveats a presentation layer should show beside the number.
pub fn caveats(
    in_season: bool,
    factors: &BTreeMap<FactorKind, Factor>,
    rejected_records: usize,
) -> Vec<String> {
    let mut out = Vec::new();
    if !in_season {
        out.push("off-season date: the estimate is a near-zero floor, not a forecast".to_string());
    }
    for (kind, factor) in factors {
        if factor.status == FactorStatus::Neutral && *kind != FactorKind::DateSpecific {
            out.push(format!("{} factor held at 1.0: {}", kind.label(), factor.rationale));
        }
    }
    if rejected_records > 0 {
        out.push(format!(
            "{rejected_records} malformed record(s) were skipped"
        ));
    }
    if factors
        .get(&FactorKind::Recency)
        .is_some_and(|f| f.status == FactorStatus::Estimated)
    {
        out.push("the recency adjustment is a heuristic, not a statistical claim".to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factors(monthly: f64, date: f64, decadal: f64, recency: f64) -> BTreeMap<FactorKind, Factor> {
        let mut map = BTreeMap::new();
        map.insert(FactorKind::Monthly, Factor::estimated(monthly, 7, "m"));
        map.insert(FactorKind::DateSpecific, Factor::estimated(date, 1, "d"));
        map.insert(FactorKind::Decadal, Factor::estimated(decadal, 26, "e"));
        map.insert(FactorKind::Recency, Factor::estimated(recency, 25, "r"));
        map
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn september_overdue_explanation() {
        let text = explain(date(2023, 9, 20), true, &factors(1.8, 2.4, 1.0, 1.2));
        assert!(text.starts_with("September historically shows higher"));
        assert!(text.contains("September 20 is a historically significant date"));
        assert!(text.contains("longer than average"));
    }

    #[test]
    fn average_day_has_fallback_text() {
        let text = explain(date(2023, 6, 10), true, &factors(1.0, 1.0, 1.0, 1.0));
        assert_eq!(text, "Probability based on historical average patterns");
    }

    #[test]
    fn off_season_is_called_out() {
        let text = explain(date(2024, 1, 15), false, &factors(0.01, 1.0, 1.0, 1.0));
        assert!(text.starts_with("January is outside the season"));
        let notes = caveats(false, &factors(0.01, 1.0, 1.0, 1.0), 0);
        assert!(notes[0].starts_with("off-season"));
    }

    #[test]
    fn neutral_factors_and_rejects_become_caveats() {
        let mut map = factors(1.0, 1.0, 1.0, 1.0);
        map.insert(FactorKind::Recency, Factor::neutral("no recorded no-hitter before 1901-07-15"));
        let notes = caveats(true, &map, 2);
        assert!(notes.iter().any(|c| c.starts_with("Recency factor held at 1.0")));
        assert!(notes.iter().any(|c| c.contains("2 malformed")));
        assert!(!notes.iter().any(|c| c.contains("heuristic")));
    }
}
