//! Fuzz target for the prediction engine.
//!
//! Builds an event table from arbitrary dates and checks the range and
//! interval invariants of the result.

#![no_main]

use arbitrary::Arbitrary;
use chrono::NaiveDate;
use libfuzzer_sys::fuzz_target;
use nhf_common::NoHitterEvent;
use nhf_core::engine::predict;

#[derive(Debug, Arbitrary)]
struct Input {
    events: Vec<(u16, u8, u8)>,
    target: (u16, u8, u8),
    seed: u64,
}

fn to_date((year, month, day): (u16, u8, u8)) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(1876 + i32::from(year % 300), u32::from(month), u32::from(day))
}

fuzz_target!(|input: Input| {
    let Some(target) = to_date(input.target) else {
        return;
    };
    let events: Vec<NoHitterEvent> = input
        .events
        .iter()
        .filter_map(|&parts| to_date(parts))
        .map(|date| NoHitterEvent::new(date, "P", "T", "O"))
        .collect();

    // Every generated year is inside the default [1876, 2200] range.
    let result = predict(&events, target, input.seed).expect("in-range target");
    let ci = result.confidence_interval;
    assert!((0.0..=1.0).contains(&result.probability));
    assert!(ci.low <= result.probability && result.probability <= ci.high);
    assert!(result.factors.values().all(|f| f.multiplier > 0.0 && f.multiplier.is_finite()));
});
