//! Historical event store.
//!
//! The engine never reads files itself: callers load a snapshot through an
//! [`EventStore`] and hand the event slice to the predictor. Every store
//! returns events sorted by date; duplicate dates are kept.

pub mod csv;
pub mod seed;
pub mod summary;
pub mod validate;

pub use self::csv::{CsvStore, LoadReport, SkippedRow, EVENTS_FILE_NAME};
pub use seed::{seed_events, SEED_RECORDS};
pub use summary::{summarize, DataSummary};
pub use validate::{validate_events, ValidationReport};

use nhf_common::{NoHitterEvent, Result};

/// Source of historical no-hitter events.
pub trait EventStore {
    /// All usable events, sorted by date.
    fn events(&self) -> Result<Vec<NoHitterEvent>>;

    /// Short human description of where the events come from.
    fn describe(&self) -> String;
}

/// In-memory event table.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    events: Vec<NoHitterEvent>,
}

impl MemoryStore {
    pub fn new(mut events: Vec<NoHitterEvent>) -> Self {
        sort_events(&mut events);
        Self { events }
    }

    /// Store pre-populated with the curated list.
    pub fn seeded() -> Self {
        Self::new(seed_events())
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn push(&mut self, event: NoHitterEvent) {
        let at = self.events.partition_point(|e| e.date <= event.date);
        self.events.insert(at, event);
    }
}

impl EventStore for MemoryStore {
    fn events(&self) -> Result<Vec<NoHitterEvent>> {
        Ok(self.events.clone())
    }

    fn describe(&self) -> String {
        format!("memory ({} events)", self.events.len())
    }
}

/// Stable sort by date; same-date events keep their input order.
pub(crate) fn sort_events(events: &mut [NoHitterEvent]) {
    events.sort_by(|a, b| a.date.cmp(&b.date));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn event(y: i32, m: u32, d: u32, pitcher: &str) -> NoHitterEvent {
        NoHitterEvent::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), pitcher, "AAA", "BBB")
    }

    #[test]
    fn memory_store_sorts_on_construction() {
        let store = MemoryStore::new(vec![
            event(2021, 6, 2, "c"),
            event(2019, 5, 7, "a"),
            event(2020, 8, 19, "b"),
        ]);
        let pitchers: Vec<_> = store.events().unwrap().into_iter().map(|e| e.pitcher).collect();
        assert_eq!(pitchers, vec!["a", "b", "c"]);
    }

    #[test]
    fn push_keeps_order_and_duplicates() {
        let mut store = MemoryStore::new(vec![event(2019, 5, 7, "a"), event(2021, 6, 2, "c")]);
        store.push(event(2019, 5, 7, "a2"));
        store.push(event(2020, 1, 1, "b"));
        let pitchers: Vec<_> = store.events().unwrap().into_iter().map(|e| e.pitcher).collect();
        assert_eq!(pitchers, vec!["a", "a2", "b", "c"]);
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn seeded_store_is_not_empty() {
        let store = MemoryStore::seeded();
        assert!(!store.is_empty());
        assert!(store.describe().starts_with("memory"));
    }
}
