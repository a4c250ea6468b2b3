//! Combination of the base rate and factors into a single prediction.
//!
//! The rule is purely multiplicative:
//!
//! ```text
//! p = clamp(base × monthly × date_specific × decadal × recency, 0, 1)
//! ```
//!
//! Each factor is estimated independently from the same snapshot; no factor
//! is blended additively with another.

use chrono::{Datelike, NaiveDate};
use nhf_common::{
    ConfidenceInterval, DegradedReason, Error, Factor, FactorKind, NoHitterEvent,
    PredictionResult, PredictionStatus, Result, SCHEMA_VERSION,
};
use nhf_config::ModelConfig;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

use super::base_rate::base_rate;
use super::calendar::date_specific_factor;
use super::decadal::decadal_weight;
use super::explain::{caveats, explain};
use super::interval::{monte_carlo_interval, InputUncertainty};
use super::monthly::monthly_factor;
use super::recency::recency_adjustment;
use super::season::is_in_season;
use super::stats::{fingerprint_events, within_window, HistoricalStats};
use crate::logging::event_names;

/// Per-call knobs. Unset fields fall back to the model configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PredictOptions {
    pub seed: Option<u64>,
    pub trials: Option<u32>,
}

impl PredictOptions {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            trials: None,
        }
    }
}

type CacheSlot = Option<(String, Arc<HistoricalStats>)>;

/// Prediction engine.
///
/// Holds the model configuration and a one-entry statistics cache keyed by
/// the event fingerprint, so a refreshed snapshot is never served stale
/// statistics. Safe to share across threads.
#[derive(Debug)]
pub struct Predictor {
    config: ModelConfig,
    cache: Mutex<CacheSlot>,
}

impl Default for Predictor {
    fn default() -> Self {
        Self::new(ModelConfig::default())
    }
}

impl Predictor {
    pub fn new(config: ModelConfig) -> Self {
        Self {
            config,
            cache: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Statistics for `events`, reused when the content is unchanged.
    pub fn stats_for(&self, events: &[NoHitterEvent]) -> Arc<HistoricalStats> {
        let events = within_window(events, &self.config.season);
        let fingerprint = fingerprint_events(&events);

        {
            let slot = self.cache.lock().unwrap_or_else(|p| p.into_inner());
            if let Some((key, stats)) = slot.as_ref() {
                if *key == fingerprint {
                    debug!(event = event_names::STATS_CACHE_HIT, fingerprint = %fingerprint);
                    return Arc::clone(stats);
                }
            }
        }

        debug!(
            event = event_names::STATS_CACHE_MISS,
            fingerprint = %fingerprint,
            events = events.len()
        );
        let stats = Arc::new(HistoricalStats::from_events(&events));
        let mut slot = self.cache.lock().unwrap_or_else(|p| p.into_inner());
        *slot = Some((fingerprint, Arc::clone(&stats)));
        stats
    }

    /// Fingerprint of the cached statistics, if any.
    pub fn cached_fingerprint(&self) -> Option<String> {
        let slot = self.cache.lock().unwrap_or_else(|p| p.into_inner());
        slot.as_ref().map(|(key, _)| key.clone())
    }

    /// Predict with an explicit seed and the configured trial count.
    pub fn predict(
        &self,
        events: &[NoHitterEvent],
        target: NaiveDate,
        seed: u64,
    ) -> Result<PredictionResult> {
        self.predict_with(events, target, &PredictOptions::with_seed(seed))
    }

    /// Probability of at least one no-hitter on `target`.
    ///
    /// Only a target outside `[min_year, max_year]` is a hard error. An empty
    /// or fully malformed table yields a degraded result.
    pub fn predict_with(
        &self,
        events: &[NoHitterEvent],
        target: NaiveDate,
        options: &PredictOptions,
    ) -> Result<PredictionResult> {
        self.check_date(target)?;

        let seed = options.seed.unwrap_or(self.config.monte_carlo.default_seed);
        let trials = options.trials.unwrap_or(self.config.monte_carlo.trials);
        let stats = self.stats_for(events);
        let in_season = is_in_season(target, &self.config.season);

        let base = match base_rate(&stats, &self.config.season) {
            Ok(base) => base,
            Err(err) => {
                let (reason, err) = self.degraded_reason(events.len(), &stats, err);
                return Ok(self.degraded(&stats, target, in_season, seed, reason, &err));
            }
        };

        let mut factors = BTreeMap::new();
        factors.insert(
            FactorKind::Monthly,
            monthly_factor(&stats, target.month(), &self.config),
        );
        factors.insert(
            FactorKind::DateSpecific,
            date_specific_factor(&stats, target.month(), target.day(), &self.config),
        );
        factors.insert(
            FactorKind::Decadal,
            decadal_weight(&stats, target.year(), &self.config),
        );
        factors.insert(
            FactorKind::Recency,
            recency_adjustment(&stats, target, &self.config),
        );
        for (kind, factor) in factors.iter_mut() {
            sanitize(*kind, factor);
        }

        let combined: f64 = factors.values().map(|f| f.multiplier).product();
        let probability = (base.probability * combined).clamp(0.0, 1.0);

        let max_sigma = self.config.monte_carlo.max_sigma;
        let mut inputs = vec![InputUncertainty::from_count(base.events, max_sigma)];
        inputs.extend(
            factors
                .values()
                .map(|f| InputUncertainty::from_count(f.sample_size, max_sigma)),
        );
        let confidence_interval = monte_carlo_interval(
            probability,
            &inputs,
            trials,
            self.config.monte_carlo.level,
            seed,
        );

        debug!(
            event = event_names::PREDICT_FINISHED,
            date = %target,
            probability,
            base_rate = base.probability,
            combined,
            low = confidence_interval.low,
            high = confidence_interval.high
        );

        Ok(PredictionResult {
            schema_version: SCHEMA_VERSION.to_string(),
            date: target,
            probability,
            confidence_interval,
            base_rate: base.probability,
            explanation: explain(target, in_season, &factors),
            caveats: caveats(in_season, &factors, stats.rejected().len()),
            factors,
            in_season,
            status: PredictionStatus::Ok,
            seed,
            data_fingerprint: stats.fingerprint().to_string(),
        })
    }

    fn check_date(&self, target: NaiveDate) -> Result<()> {
        let season = &self.config.season;
        let year = target.year();
        if year < season.min_year || year > season.max_year {
            return Err(Error::InvalidDate {
                date: target.to_string(),
                reason: format!(
                    "year must be between {} and {}",
                    season.min_year, season.max_year
                ),
            });
        }
        Ok(())
    }

    /// `supplied` counts events before the history window is applied.
    fn degraded_reason(
        &self,
        supplied: usize,
        stats: &HistoricalStats,
        err: Error,
    ) -> (DegradedReason, Error) {
        if supplied == 0 {
            return (DegradedReason::EmptyTable, err);
        }
        if stats.supplied() == 0 {
            let season = &self.config.season;
            let bound = |year: Option<i32>| year.map_or_else(|| "..".to_string(), |y| y.to_string());
            let err = Error::InsufficientData(format!(
                "none of the {supplied} supplied events fall inside the history window {}-{}",
                bound(season.history_start_year),
                bound(season.history_end_year)
            ));
            return (DegradedReason::OutsideHistoryWindow, err);
        }
        (DegradedReason::AllRecordsMalformed, err)
    }

    fn degraded(
        &self,
        stats: &HistoricalStats,
        target: NaiveDate,
        in_season: bool,
        seed: u64,
        reason: DegradedReason,
        err: &Error,
    ) -> PredictionResult {
        warn!(
            event = event_names::PREDICT_DEGRADED,
            date = %target,
            ?reason,
            in_window = stats.supplied(),
            rejected = stats.rejected().len(),
            error = %err,
            "no usable history; returning degraded prediction"
        );

        let factors = FactorKind::ALL
            .iter()
            .map(|&kind| (kind, Factor::unavailable("no usable historical events")))
            .collect();
        let mut notes = vec![format!("{}: {err}", err.headline())];
        if !stats.rejected().is_empty() {
            notes.push(format!(
                "{} malformed record(s) were skipped",
                stats.rejected().len()
            ));
        }

        PredictionResult {
            schema_version: SCHEMA_VERSION.to_string(),
            date: target,
            probability: 0.0,
            confidence_interval: ConfidenceInterval {
                low: 0.0,
                high: 1.0,
                level: self.config.monte_carlo.level,
                trials: 0,
            },
            base_rate: 0.0,
            factors,
            in_season,
            status: PredictionStatus::Degraded {
                reason,
                code: err.code(),
                detail: err.to_string(),
            },
            caveats: notes,
            explanation: "Insufficient historical data; no estimate available".to_string(),
            seed,
            data_fingerprint: stats.fingerprint().to_string(),
        }
    }
}

/// Replace a non-positive or non-finite multiplier with a neutral factor.
fn sanitize(kind: FactorKind, factor: &mut Factor) {
    if !(factor.multiplier.is_finite() && factor.multiplier > 0.0) {
        warn!(
            event = event_names::FACTOR_NEUTRAL,
            factor = %kind,
            multiplier = factor.multiplier,
            "factor out of range; using 1.0"
        );
        *factor = Factor::neutral(format!(
            "{} estimate was not a positive finite number",
            kind.label()
        ));
    }
}

/// One-shot prediction with the default model.
pub fn predict(events: &[NoHitterEvent], target: NaiveDate, seed: u64) -> Result<PredictionResult> {
    Predictor::default().predict(events, target, seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nhf_common::FactorStatus;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(y: i32, m: u32, d: u32) -> NoHitterEvent {
        NoHitterEvent::new(date(y, m, d), "P", "T", "O")
    }

    fn sample() -> Vec<NoHitterEvent> {
        vec![
            event(2018, 5, 8),
            event(2018, 9, 21),
            event(2019, 5, 7),
            event(2019, 6, 21),
            event(2019, 9, 28),
            event(2020, 8, 19),
            event(2021, 4, 14),
            event(2021, 5, 5),
            event(2021, 5, 19),
            event(2021, 6, 2),
        ]
    }

    #[test]
    fn all_four_factors_are_reported() {
        let result = predict(&sample(), date(2022, 7, 1), 1).unwrap();
        assert_eq!(result.factors.len(), 4);
        for kind in FactorKind::ALL {
            assert!(result.factor(kind).unwrap().multiplier > 0.0);
        }
        assert!(matches!(result.status, PredictionStatus::Ok));
    }

    #[test]
    fn probability_is_clamped_product() {
        let result = predict(&sample(), date(2022, 7, 1), 1).unwrap();
        let expected = (result.base_rate * result.combined_multiplier()).clamp(0.0, 1.0);
        assert_eq!(result.probability, expected);
        assert!(result.confidence_interval.contains(result.probability));
    }

    #[test]
    fn empty_table_degrades() {
        let result = predict(&[], date(2022, 7, 1), 1).unwrap();
        assert!(result.is_degraded());
        assert_eq!(result.probability, 0.0);
        assert_eq!(result.confidence_interval.low, 0.0);
        assert_eq!(result.confidence_interval.high, 1.0);
        assert!(result
            .factors
            .values()
            .all(|f| f.status == FactorStatus::Unavailable));
        match result.status {
            PredictionStatus::Degraded { reason, code, .. } => {
                assert_eq!(reason, DegradedReason::EmptyTable);
                assert_eq!(code, 30);
            }
            PredictionStatus::Ok => panic!("expected degraded"),
        }
    }

    #[test]
    fn all_malformed_degrades() {
        let mut bad = event(2019, 5, 7);
        bad.opponent.clear();
        let result = predict(&[bad], date(2022, 7, 1), 1).unwrap();
        match result.status {
            PredictionStatus::Degraded { reason, .. } => {
                assert_eq!(reason, DegradedReason::AllRecordsMalformed)
            }
            PredictionStatus::Ok => panic!("expected degraded"),
        }
    }

    #[test]
    fn history_window_excluding_everything_degrades() {
        let mut config = ModelConfig::default();
        config.season.history_start_year = Some(1990);
        config.season.history_end_year = Some(1999);
        let result = Predictor::new(config)
            .predict(&sample(), date(2022, 7, 1), 1)
            .unwrap();
        match result.status {
            PredictionStatus::Degraded { reason, code, detail } => {
                assert_eq!(reason, DegradedReason::OutsideHistoryWindow);
                assert_eq!(code, 30);
                assert!(detail.contains("none of the 10 supplied events"), "{detail}");
                assert!(detail.contains("1990-1999"), "{detail}");
            }
            PredictionStatus::Ok => panic!("expected degraded"),
        }
    }

    #[test]
    fn out_of_range_year_is_invalid_date() {
        let err = predict(&sample(), date(1492, 10, 12), 1).unwrap_err();
        assert_eq!(err.code(), 31);
        let err = predict(&sample(), date(2500, 6, 1), 1).unwrap_err();
        assert!(matches!(err, Error::InvalidDate { .. }));
    }

    #[test]
    fn cache_follows_content() {
        let predictor = Predictor::default();
        let events = sample();
        let first = predictor.stats_for(&events);
        let again = predictor.stats_for(&events);
        assert!(Arc::ptr_eq(&first, &again));

        let mut more = events.clone();
        more.push(event(2021, 6, 2));
        let refreshed = predictor.stats_for(&more);
        assert!(!Arc::ptr_eq(&first, &refreshed));
        assert_eq!(refreshed.total(), 11);
        assert_eq!(predictor.cached_fingerprint().as_deref(), Some(refreshed.fingerprint()));
    }

    #[test]
    fn trials_override_is_honored() {
        let predictor = Predictor::default();
        let options = PredictOptions {
            seed: Some(5),
            trials: Some(64),
        };
        let result = predictor.predict_with(&sample(), date(2022, 7, 1), &options).unwrap();
        assert_eq!(result.confidence_interval.trials, 64);
        assert_eq!(result.seed, 5);
    }

    #[test]
    fn default_seed_comes_from_config() {
        let predictor = Predictor::default();
        let result = predictor
            .predict_with(&sample(), date(2022, 7, 1), &PredictOptions::default())
            .unwrap();
        assert_eq!(result.seed, ModelConfig::default().monte_carlo.default_seed);
    }
}
