//! Prediction engine.
//!
//! Pure computation over an event snapshot: no I/O, no wall clock, no global
//! random source. The pipeline is
//!
//! 1. [`stats::HistoricalStats`] from the snapshot (cached by fingerprint)
//! 2. [`base_rate::base_rate`] and four independent factors
//! 3. multiplicative combination, clamped to [0, 1]
//! 4. seeded Monte Carlo band ([`interval`])

pub mod base_rate;
pub mod calendar;
pub mod decadal;
pub mod explain;
pub mod interval;
pub mod monthly;
pub mod predictor;
pub mod recency;
pub mod season;
pub mod stats;

pub use base_rate::{base_rate, BaseRate};
pub use calendar::date_specific_factor;
pub use decadal::decadal_weight;
pub use monthly::monthly_factor;
pub use predictor::{predict, PredictOptions, Predictor};
pub use recency::{recency_adjustment, recency_from_gap};
pub use season::{is_in_season, season_status, SeasonStatus};
pub use stats::{fingerprint_events, HistoricalStats};
