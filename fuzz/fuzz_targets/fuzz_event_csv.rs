//! Fuzz target for no_hitters.csv parsing.
//!
//! Tests that `parse_events` handles arbitrary input without panicking and
//! that every accepted row is a valid event.

#![no_main]

use libfuzzer_sys::fuzz_target;
use nhf_core::store::csv::parse_events;

fuzz_target!(|data: &str| {
    if let Ok(report) = parse_events(data, false) {
        for event in &report.events {
            assert!(event.validate().is_ok());
        }
    }
    let _ = parse_events(data, true);
});
