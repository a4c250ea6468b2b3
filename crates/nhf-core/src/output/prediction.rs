use nhf_common::{FactorStatus, PredictionResult, PredictionStatus};

use super::{multiplier, percent, Render};

impl Render for PredictionResult {
    fn markdown(&self) -> String {
        let mut out = String::new();
        let ci = &self.confidence_interval;
        out.push_str(&format!("# No-hitter forecast for {}\n\n", self.date));
        out.push_str(&format!("**Probability:** {}\n", percent(self.probability)));
        out.push_str(&format!(
            "**{:.0}% interval:** {} - {} ({} trials, seed {})\n",
            ci.level * 100.0,
            percent(ci.low),
            percent(ci.high),
            ci.trials,
            self.seed
        ));
        out.push_str(&format!("**Base rate:** {}\n", percent(self.base_rate)));
        out.push_str(&format!(
            "**Season:** {}\n",
            if self.in_season { "in season" } else { "off season" }
        ));
        if let PredictionStatus::Degraded { reason, code, detail } = &self.status {
            out.push_str(&format!("**Status:** degraded ({reason:?}, code {code}): {detail}\n"));
        }
        out.push_str(&format!("\n{}\n\n", self.explanation));

        out.push_str("## Factors\n\n");
        out.push_str("| Factor | Multiplier | Events | Basis |\n|---|---|---|---|\n");
        for (kind, factor) in &self.factors {
            let shown = match factor.status {
                FactorStatus::Estimated => multiplier(factor.multiplier),
                FactorStatus::Neutral => format!("{} (neutral)", multiplier(factor.multiplier)),
                FactorStatus::Unavailable => "n/a".to_string(),
            };
            out.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                kind.label(),
                shown,
                factor.sample_size,
                factor.rationale
            ));
        }

        if !self.caveats.is_empty() {
            out.push_str("\n## Caveats\n\n");
            for caveat in &self.caveats {
                out.push_str(&format!("- {caveat}\n"));
            }
        }
        out
    }

    fn summary(&self) -> String {
        if self.is_degraded() {
            return format!("{}: degraded (insufficient data)", self.date);
        }
        let ci = &self.confidence_interval;
        format!(
            "{}: {} ({:.0}% CI {}-{}){}",
            self.date,
            percent(self.probability),
            ci.level * 100.0,
            percent(ci.low),
            percent(ci.high),
            if self.in_season { "" } else { " [off season]" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::predict;
    use crate::output::render;
    use chrono::NaiveDate;
    use nhf_common::{NoHitterEvent, OutputFormat};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn result() -> PredictionResult {
        let events = vec![
            NoHitterEvent::new(date(2019, 5, 7), "A", "T", "O"),
            NoHitterEvent::new(date(2020, 8, 19), "B", "T", "O"),
            NoHitterEvent::new(date(2021, 6, 2), "C", "T", "O"),
        ];
        predict(&events, date(2022, 6, 2), 3).unwrap()
    }

    #[test]
    fn markdown_lists_every_factor() {
        let md = render(&result(), OutputFormat::Md).unwrap();
        assert!(md.starts_with("# No-hitter forecast for 2022-06-02"));
        for label in ["Monthly", "Date-specific", "Decadal", "Recency"] {
            assert!(md.contains(&format!("| {label} |")), "{md}");
        }
        let interval = md.lines().find(|l| l.contains("interval:**")).unwrap();
        assert!(interval.contains("% - "), "{interval}");
        assert!(md.ends_with('\n'));
    }

    #[test]
    fn summary_is_one_line() {
        let line = render(&result(), OutputFormat::Summary).unwrap();
        assert!(!line.contains('\n'));
        assert!(line.starts_with("2022-06-02: "));
    }

    #[test]
    fn json_uses_snake_case_factor_keys() {
        let json = render(&result(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let factors = value["factors"].as_object().unwrap();
        let mut keys: Vec<_> = factors.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["date_specific", "decadal", "monthly", "recency"]);
        assert_eq!(value["status"]["state"], "ok");
    }

    #[test]
    fn degraded_summary() {
        let degraded = predict(&[], date(2022, 6, 2), 3).unwrap();
        assert!(degraded.summary().contains("degraded"));
        assert!(degraded.markdown().contains("**Status:** degraded"));
    }
}
