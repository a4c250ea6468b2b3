//! Property-based tests for prediction invariants.

use chrono::NaiveDate;
use nhf_common::NoHitterEvent;
use nhf_config::RecencyParams;
use nhf_core::engine::{predict, recency_from_gap};
use proptest::prelude::*;

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (1950i32..2030, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn arb_events() -> impl Strategy<Value = Vec<NoHitterEvent>> {
    prop::collection::vec(arb_date(), 0..60).prop_map(|dates| {
        dates
            .into_iter()
            .map(|d| NoHitterEvent::new(d, "P", "T", "O"))
            .collect()
    })
}

fn arb_season_events() -> impl Strategy<Value = Vec<NoHitterEvent>> {
    prop::collection::vec((1950i32..2030, 4u32..=10, 1u32..=28), 0..60).prop_map(|parts| {
        parts
            .into_iter()
            .map(|(y, m, d)| {
                NoHitterEvent::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), "P", "T", "O")
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn probability_and_interval_stay_in_range(
        events in arb_events(),
        target in arb_date(),
        seed in any::<u64>(),
    ) {
        let result = predict(&events, target, seed).unwrap();
        let ci = result.confidence_interval;
        prop_assert!((0.0..=1.0).contains(&result.probability));
        prop_assert!(0.0 <= ci.low && ci.high <= 1.0);
        prop_assert!(ci.low <= result.probability && result.probability <= ci.high);
        for factor in result.factors.values() {
            prop_assert!(factor.multiplier.is_finite() && factor.multiplier > 0.0);
        }
    }

    #[test]
    fn same_seed_is_deterministic(
        events in arb_events(),
        target in arb_date(),
        seed in any::<u64>(),
    ) {
        let a = predict(&events, target, seed).unwrap();
        let b = predict(&events, target, seed).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn recency_never_decreases_with_elapsed_time(
        mean_gap in 1.0f64..400.0,
        t in 0.0f64..2000.0,
        extra in 0.0f64..500.0,
    ) {
        let params = RecencyParams::default();
        let earlier = recency_from_gap(t, mean_gap, &params);
        let later = recency_from_gap(t + extra, mean_gap, &params);
        prop_assert!(later >= earlier);
        prop_assert!((params.floor..=params.cap).contains(&later));
    }

    #[test]
    fn off_season_never_beats_in_season(
        events in arb_season_events(),
        year in 1950i32..2030,
        day in 1u32..=28,
        seed in any::<u64>(),
    ) {
        // The off-season floor is far below the in-season floor, and
        // recency can move the two by at most cap / floor.
        let january = predict(&events, NaiveDate::from_ymd_opt(year, 1, day).unwrap(), seed).unwrap();
        let june = predict(&events, NaiveDate::from_ymd_opt(year, 6, day).unwrap(), seed).unwrap();
        prop_assert!(january.probability <= june.probability);
    }
}
