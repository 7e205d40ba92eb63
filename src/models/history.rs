//! Historical entry counts.
//!
//! How many crews entered each event in past editions. Used to predict
//! which events run heats and how much they push the rest of the day back.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::EventNumber;

/// Per-event historical entry counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryHistory {
    entries: HashMap<EventNumber, u32>,
}

impl EntryHistory {
    /// Creates an empty history (no event is known to run heats).
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a history from `(event, entries)` pairs.
    pub fn with_entries<I, E>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (E, u32)>,
        E: Into<EventNumber>,
    {
        self.entries
            .extend(entries.into_iter().map(|(e, n)| (e.into(), n)));
        self
    }

    /// Records the entry count for one event.
    pub fn insert(&mut self, event: impl Into<EventNumber>, entries: u32) {
        self.entries.insert(event.into(), entries);
    }

    /// Entry count, if known.
    pub fn entries(&self, event: EventNumber) -> Option<u32> {
        self.entries.get(&event).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let mut h = EntryHistory::new().with_entries([(10u32, 12), (11, 3)]);
        h.insert(12u32, 20);
        assert_eq!(h.entries(EventNumber(10)), Some(12));
        assert_eq!(h.entries(EventNumber(12)), Some(20));
        assert_eq!(h.entries(EventNumber(99)), None);
        assert_eq!(h.len(), 3);
    }

    #[test]
    fn test_serde_as_map() {
        let h = EntryHistory::new().with_entries([(162u32, 9)]);
        let json = serde_json::to_string(&h).unwrap();
        assert_eq!(json, r#"{"162":9}"#);
        let back: EntryHistory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, h);
    }
}
