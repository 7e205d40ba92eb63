//! Event catalog model.
//!
//! The catalog is the regatta program: four race days, each an ordered
//! list of `(number, name)` events. Catalog order within a day is race
//! order, which is what the timing calculator builds on. Events are never
//! created or removed at runtime.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Regatta event number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventNumber(pub u32);

impl fmt::Display for EventNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for EventNumber {
    fn from(n: u32) -> Self {
        Self(n)
    }
}

/// A race day of the four-day regatta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RaceDay {
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl RaceDay {
    /// All race days in program order.
    pub const ALL: [RaceDay; 4] = [
        RaceDay::Thursday,
        RaceDay::Friday,
        RaceDay::Saturday,
        RaceDay::Sunday,
    ];

    /// Whole days after the regatta start date (Thursday = 0).
    pub fn day_offset(self) -> i64 {
        self as i64
    }

    /// Day name.
    pub fn name(self) -> &'static str {
        match self {
            RaceDay::Thursday => "Thursday",
            RaceDay::Friday => "Friday",
            RaceDay::Saturday => "Saturday",
            RaceDay::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for RaceDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A catalog event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Event number (unique across the catalog).
    pub number: EventNumber,
    /// Display name, ending in the boat-class code (e.g. "Men's Open C 4+").
    pub name: String,
}

impl Event {
    /// Creates an event.
    pub fn new(number: impl Into<EventNumber>, name: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            name: name.into(),
        }
    }

    /// Whether this is a lightweight event ("Ltwt" in the name).
    pub fn is_lightweight(&self) -> bool {
        self.name.to_lowercase().contains("ltwt")
    }
}

/// An event located in the catalog.
#[derive(Debug, Clone, Copy)]
pub struct EventEntry<'a> {
    /// The event.
    pub event: &'a Event,
    /// Race day.
    pub day: RaceDay,
    /// Zero-based race-order position within the day.
    pub position: usize,
}

#[derive(Debug, Clone)]
struct CatalogDay {
    day: RaceDay,
    events: Vec<Event>,
}

/// The regatta event program.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<(RaceDay, Vec<Event>)>", into = "Vec<(RaceDay, Vec<Event>)>")]
pub struct EventCatalog {
    days: Vec<CatalogDay>,
    index: HashMap<EventNumber, (usize, usize)>,
}

impl EventCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in four-day program.
    pub fn builtin() -> Self {
        crate::catalog_data::PROGRAM
            .iter()
            .fold(Self::new(), |catalog, (day, events)| {
                catalog.with_day(
                    *day,
                    events
                        .iter()
                        .map(|&(number, name)| Event::new(number, name))
                        .collect(),
                )
            })
    }

    /// Adds (or replaces) a day's ordered event list.
    pub fn with_day(mut self, day: RaceDay, events: Vec<Event>) -> Self {
        self.days.retain(|d| d.day != day);
        self.days.push(CatalogDay { day, events });
        self.days.sort_by_key(|d| d.day);
        self.reindex();
        self
    }

    fn reindex(&mut self) {
        self.index.clear();
        for (day_idx, d) in self.days.iter().enumerate() {
            for (pos, event) in d.events.iter().enumerate() {
                self.index.entry(event.number).or_insert((day_idx, pos));
            }
        }
    }

    /// Looks up an event by number.
    pub fn find(&self, number: EventNumber) -> Option<EventEntry<'_>> {
        let &(day_idx, position) = self.index.get(&number)?;
        let day = &self.days[day_idx];
        Some(EventEntry {
            event: &day.events[position],
            day: day.day,
            position,
        })
    }

    /// Event display name.
    pub fn event_name(&self, number: EventNumber) -> Option<&str> {
        self.find(number).map(|e| e.event.name.as_str())
    }

    /// Events of one day in race order (empty if the day has none).
    pub fn events_on(&self, day: RaceDay) -> &[Event] {
        self.days
            .iter()
            .find(|d| d.day == day)
            .map(|d| d.events.as_slice())
            .unwrap_or(&[])
    }

    /// All events in program order.
    pub fn iter(&self) -> impl Iterator<Item = EventEntry<'_>> {
        self.days.iter().flat_map(|d| {
            d.events
                .iter()
                .enumerate()
                .map(move |(position, event)| EventEntry {
                    event,
                    day: d.day,
                    position,
                })
        })
    }

    /// Events offered for selection, optionally without lightweight events.
    pub fn selectable_events(&self, exclude_lightweight: bool) -> Vec<EventEntry<'_>> {
        self.iter()
            .filter(|e| !(exclude_lightweight && e.event.is_lightweight()))
            .collect()
    }

    /// Total number of events.
    pub fn len(&self) -> usize {
        self.days.iter().map(|d| d.events.len()).sum()
    }

    /// Whether the catalog has no events.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<(RaceDay, Vec<Event>)>> for EventCatalog {
    fn from(days: Vec<(RaceDay, Vec<Event>)>) -> Self {
        days.into_iter()
            .fold(Self::new(), |c, (day, events)| c.with_day(day, events))
    }
}

impl From<EventCatalog> for Vec<(RaceDay, Vec<Event>)> {
    fn from(catalog: EventCatalog) -> Self {
        catalog.days.into_iter().map(|d| (d.day, d.events)).collect()
    }
}
