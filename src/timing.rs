//! Event time calculation.
//!
//! Events on a day race in catalog order, one every `event_spacing_minutes`.
//! An event whose historical entries exceed `boats_per_race` runs several
//! heats, and every extra heat pushes the rest of that day back by one
//! spacing slot:
//!
//! ```text
//! time(e) = start_date + day_offset(e) + session_start
//!         + position(e) * spacing
//!         + sum over earlier events p on the same day of (heats(p) - 1) * spacing
//! heats(p) = ceil(entries(p) / boats_per_race)
//! ```
//!
//! The calculator is a pure function of its inputs. [`TimingCache`] memoizes
//! results under an explicit [`TimingKey`] and drops everything when the key
//! changes.

use chrono::{Duration, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;

use crate::config::RegattaParameters;
use crate::models::{EntryHistory, EventCatalog, EventNumber};

/// Racing session of a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RaceSession {
    /// Heats.
    Morning,
    /// Finals.
    Afternoon,
}

/// Race time with the dock logistics around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceWindow {
    /// Crew meets.
    pub meet: NaiveDateTime,
    /// Boat leaves the dock.
    pub launch: NaiveDateTime,
    /// Race start.
    pub race: NaiveDateTime,
    /// Boat is back on the dock.
    pub land: NaiveDateTime,
}

impl RaceWindow {
    /// Builds the window around a race time.
    pub fn around(race: NaiveDateTime, params: &RegattaParameters) -> Self {
        Self {
            meet: race - minutes(params.meet_minutes_before),
            launch: race - minutes(params.launch_minutes_before),
            race,
            land: race + minutes(params.land_minutes_after),
        }
    }

    /// Whether two launch-to-land windows overlap. Touching windows (one
    /// lands exactly when the other launches) do not.
    pub fn overlaps(&self, other: &RaceWindow) -> bool {
        !(self.land <= other.launch || other.land <= self.launch)
    }

    /// Minutes by which this window's landing runs past `later`'s launch.
    /// Zero when they do not overlap.
    pub fn overlap_minutes(&self, later: &RaceWindow) -> i64 {
        (self.land - later.launch).num_minutes().max(0)
    }
}

/// Heat and final windows of one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSchedule {
    pub event: EventNumber,
    /// Morning heat, when the event is expected to need one.
    pub heat: Option<RaceWindow>,
    /// Afternoon final.
    pub final_race: RaceWindow,
}

/// The parameters an event time depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimingKey {
    pub spacing_minutes: u32,
    pub boats_per_race: u32,
    pub start_date: chrono::NaiveDate,
    pub morning_start: NaiveTime,
    pub afternoon_start: NaiveTime,
}

impl From<&RegattaParameters> for TimingKey {
    fn from(p: &RegattaParameters) -> Self {
        Self {
            spacing_minutes: p.event_spacing_minutes,
            boats_per_race: p.boats_per_race,
            start_date: p.regatta_start_date,
            morning_start: p.morning_start_time,
            afternoon_start: p.afternoon_start_time,
        }
    }
}

fn minutes(m: u32) -> Duration {
    Duration::minutes(i64::from(m))
}

/// Cumulative overflow delay per event, in minutes.
pub type OverflowTable = HashMap<EventNumber, u32>;

/// Computes event times for a catalog.
///
/// Cumulative overflow per event is computed once at construction, or
/// borrowed from a [`TimingCache`].
#[derive(Debug, Clone)]
pub struct EventTimeCalculator<'a> {
    catalog: &'a EventCatalog,
    history: &'a EntryHistory,
    params: &'a RegattaParameters,
    overflow: Cow<'a, OverflowTable>,
}

impl<'a> EventTimeCalculator<'a> {
    /// Creates a calculator and precomputes overflow delays.
    pub fn new(
        catalog: &'a EventCatalog,
        history: &'a EntryHistory,
        params: &'a RegattaParameters,
    ) -> Self {
        let mut calc = Self::with_overflow(catalog, history, params, Cow::Owned(OverflowTable::new()));
        calc.overflow = Cow::Owned(calc.compute_overflow());
        calc
    }

    /// Creates a calculator over an overflow table computed earlier for the
    /// same inputs.
    pub fn with_overflow(
        catalog: &'a EventCatalog,
        history: &'a EntryHistory,
        params: &'a RegattaParameters,
        overflow: Cow<'a, OverflowTable>,
    ) -> Self {
        Self {
            catalog,
            history,
            params,
            overflow,
        }
    }

    /// Takes the overflow table out of the calculator.
    pub fn into_overflow(self) -> OverflowTable {
        self.overflow.into_owned()
    }

    fn compute_overflow(&self) -> OverflowTable {
        let mut overflow = HashMap::with_capacity(self.catalog.len());
        let mut running = 0u32;
        let mut current_day = None;
        for entry in self.catalog.iter() {
            if current_day != Some(entry.day) {
                current_day = Some(entry.day);
                running = 0;
            }
            overflow.insert(entry.event.number, running);
            running = running.saturating_add(self.extra_heat_delay(entry.event.number));
        }
        overflow
    }

    /// Heats an event is expected to need (1 without history).
    pub fn heats_needed(&self, event: EventNumber) -> u32 {
        let capacity = self.params.boats_per_race;
        match self.history.entries(event) {
            Some(entries) if capacity > 0 && entries > 0 => entries.div_ceil(capacity),
            _ => 1,
        }
    }

    /// Delay this event imposes on the rest of its day.
    pub fn extra_heat_delay(&self, event: EventNumber) -> u32 {
        (self.heats_needed(event) - 1).saturating_mul(self.params.event_spacing_minutes)
    }

    /// Whether the event is expected to run a heat at all. Defaults to
    /// `true` without history.
    pub fn has_heat(&self, event: EventNumber) -> bool {
        self.history
            .entries(event)
            .map_or(true, |entries| entries > self.params.boats_per_race)
    }

    /// Delay accumulated from earlier events on the same day, in minutes.
    pub fn overflow_delay(&self, event: EventNumber) -> Option<u32> {
        self.overflow.get(&event).copied()
    }

    /// Start time of an event in a session. `None` for events outside the
    /// catalog.
    pub fn event_time(&self, event: EventNumber, session: RaceSession) -> Option<NaiveDateTime> {
        let entry = self.catalog.find(event)?;
        let start = match session {
            RaceSession::Morning => self.params.morning_start_time,
            RaceSession::Afternoon => self.params.afternoon_start_time,
        };
        let base = self.params.regatta_start_date.and_time(start);
        let ordinal = i64::from(self.params.event_spacing_minutes) * entry.position as i64;
        let overflow = i64::from(self.overflow_delay(event).unwrap_or(0));
        Some(base + Duration::days(entry.day.day_offset()) + Duration::minutes(ordinal + overflow))
    }

    /// Race window in a session.
    pub fn window(&self, event: EventNumber, session: RaceSession) -> Option<RaceWindow> {
        self.event_time(event, session)
            .map(|t| RaceWindow::around(t, self.params))
    }

    /// Heat and final windows.
    pub fn schedule(&self, event: EventNumber) -> Option<EventSchedule> {
        let final_race = self.window(event, RaceSession::Afternoon)?;
        let heat = if self.has_heat(event) {
            self.window(event, RaceSession::Morning)
        } else {
            None
        };
        Some(EventSchedule {
            event,
            heat,
            final_race,
        })
    }

    /// Signed minutes from `a` to `b` in a session.
    pub fn minutes_between(&self, a: EventNumber, b: EventNumber, session: RaceSession) -> Option<i64> {
        let ta = self.event_time(a, session)?;
        let tb = self.event_time(b, session)?;
        Some((tb - ta).num_minutes())
    }

    /// Whether two events start closer than `min_gap_minutes` in a session.
    pub fn conflicts(&self, a: EventNumber, b: EventNumber, session: RaceSession) -> bool {
        self.minutes_between(a, b, session)
            .is_some_and(|m| m.abs() < i64::from(self.params.min_gap_minutes))
    }

    pub fn key(&self) -> TimingKey {
        TimingKey::from(self.params)
    }

    pub fn params(&self) -> &RegattaParameters {
        self.params
    }

    pub fn catalog(&self) -> &EventCatalog {
        self.catalog
    }
}

/// Memoized event times and overflow table, invalidated whenever the
/// timing key changes.
#[derive(Debug, Clone, Default)]
pub struct TimingCache {
    key: Option<TimingKey>,
    times: HashMap<(EventNumber, RaceSession), Option<NaiveDateTime>>,
    overflow: Option<OverflowTable>,
}

impl TimingCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached time, computing it on a miss. A calculator with a different
    /// key clears the cache first.
    pub fn event_time(
        &mut self,
        calc: &EventTimeCalculator<'_>,
        event: EventNumber,
        session: RaceSession,
    ) -> Option<NaiveDateTime> {
        self.check_key(calc.key());
        *self
            .times
            .entry((event, session))
            .or_insert_with(|| calc.event_time(event, session))
    }

    /// Cached time computed from raw inputs. The overflow table is built on
    /// the first miss and reused until the cache is invalidated.
    pub fn event_time_from(
        &mut self,
        catalog: &EventCatalog,
        history: &EntryHistory,
        params: &RegattaParameters,
        event: EventNumber,
        session: RaceSession,
    ) -> Option<NaiveDateTime> {
        self.check_key(TimingKey::from(params));
        if let Some(time) = self.times.get(&(event, session)) {
            return *time;
        }
        let overflow = self
            .overflow
            .get_or_insert_with(|| EventTimeCalculator::new(catalog, history, params).into_overflow());
        let time = EventTimeCalculator::with_overflow(catalog, history, params, Cow::Borrowed(&*overflow))
            .event_time(event, session);
        self.times.insert((event, session), time);
        time
    }

    fn check_key(&mut self, key: TimingKey) {
        if self.key != Some(key) {
            self.invalidate();
            self.key = Some(key);
        }
    }

    /// Drops every cached time and the overflow table.
    pub fn invalidate(&mut self) {
        if !self.times.is_empty() {
            tracing::debug!(cached = self.times.len(), "invalidating event time cache");
        }
        self.times.clear();
        self.overflow = None;
        self.key = None;
    }

    /// Whether an overflow table is held.
    pub fn has_overflow(&self) -> bool {
        self.overflow.is_some()
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Event, RaceDay};
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn day_catalog(n: u32) -> EventCatalog {
        EventCatalog::new().with_day(
            RaceDay::Thursday,
            (1..=n).map(|i| Event::new(i, format!("Men's Open C {i} 1x"))).collect(),
        )
    }

    fn at(day: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 7, day)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_ordinal_spacing_without_history() {
        let catalog = day_catalog(3);
        let history = EntryHistory::new();
        let params = RegattaParameters::default();
        let calc = EventTimeCalculator::new(&catalog, &history, &params);
        assert_eq!(calc.event_time(EventNumber(1), RaceSession::Morning), Some(at(17, 8, 0)));
        assert_eq!(calc.event_time(EventNumber(3), RaceSession::Morning), Some(at(17, 8, 8)));
        assert_eq!(calc.event_time(EventNumber(3), RaceSession::Afternoon), Some(at(17, 13, 8)));
        assert_eq!(calc.event_time(EventNumber(99), RaceSession::Morning), None);
    }

    #[test]
    fn test_day_offset() {
        let catalog = EventCatalog::new()
            .with_day(RaceDay::Thursday, vec![Event::new(1, "Men's Open C 1x")])
            .with_day(RaceDay::Saturday, vec![Event::new(2, "Mixed D 2x")]);
        let history = EntryHistory::new();
        let params = RegattaParameters::default();
        let calc = EventTimeCalculator::new(&catalog, &history, &params);
        assert_eq!(calc.event_time(EventNumber(2), RaceSession::Morning), Some(at(19, 8, 0)));
    }

    #[test]
    fn test_cascading_overflow() {
        // Events at positions 0 and 1 each double the lane capacity.
        let catalog = day_catalog(5);
        let history = EntryHistory::new().with_entries([(1u32, 16), (2, 16), (3, 8)]);
        let params = RegattaParameters::default().with_spacing(4).with_boats_per_race(8);
        let calc = EventTimeCalculator::new(&catalog, &history, &params);

        assert_eq!(calc.heats_needed(EventNumber(1)), 2);
        assert_eq!(calc.heats_needed(EventNumber(3)), 1);
        assert_eq!(calc.overflow_delay(EventNumber(1)), Some(0));
        assert_eq!(calc.overflow_delay(EventNumber(2)), Some(4));
        assert_eq!(calc.overflow_delay(EventNumber(5)), Some(8));
        // 4 * 4 ordinal + 2 * 4 overflow.
        assert_eq!(calc.event_time(EventNumber(5), RaceSession::Morning), Some(at(17, 8, 24)));
    }

    #[test]
    fn test_overflow_resets_each_day() {
        let catalog = day_catalog(2).with_day(RaceDay::Friday, vec![Event::new(10, "Mixed D 2x")]);
        let history = EntryHistory::new().with_entries([(1u32, 30)]);
        let params = RegattaParameters::default();
        let calc = EventTimeCalculator::new(&catalog, &history, &params);
        assert_eq!(calc.overflow_delay(EventNumber(2)), Some(12));
        assert_eq!(calc.overflow_delay(EventNumber(10)), Some(0));
    }

    #[test]
    fn test_has_heat() {
        let catalog = day_catalog(3);
        let history = EntryHistory::new().with_entries([(1u32, 8), (2, 9)]);
        let params = RegattaParameters::default();
        let calc = EventTimeCalculator::new(&catalog, &history, &params);
        assert!(!calc.has_heat(EventNumber(1)));
        assert!(calc.has_heat(EventNumber(2)));
        assert!(calc.has_heat(EventNumber(3)));

        let s = calc.schedule(EventNumber(1)).unwrap();
        assert!(s.heat.is_none());
        assert_eq!(s.final_race.race, at(17, 13, 0));
        assert_eq!(s.final_race.launch, at(17, 12, 30));
        assert_eq!(s.final_race.meet, at(17, 12, 20));
        assert_eq!(s.final_race.land, at(17, 13, 15));
        assert_eq!(calc.schedule(EventNumber(2)).unwrap().heat.unwrap().race, at(17, 8, 4));
    }

    #[test]
    fn test_conflicts_by_min_gap() {
        let catalog = day_catalog(10);
        let history = EntryHistory::new();
        let params = RegattaParameters::default().with_spacing(4).with_min_gap(30);
        let calc = EventTimeCalculator::new(&catalog, &history, &params);
        // 5 slots = 20 minutes apart.
        assert_eq!(calc.minutes_between(EventNumber(1), EventNumber(6), RaceSession::Morning), Some(20));
        assert!(calc.conflicts(EventNumber(1), EventNumber(6), RaceSession::Morning));
        assert!(!calc.conflicts(EventNumber(1), EventNumber(10), RaceSession::Morning));
    }

    #[test]
    fn test_window_overlap() {
        let params = RegattaParameters::default();
        let a = RaceWindow::around(at(17, 8, 0), &params);
        let b = RaceWindow::around(at(17, 8, 30), &params);
        let c = RaceWindow::around(at(17, 8, 45), &params);
        assert!(a.overlaps(&b));
        assert_eq!(a.overlap_minutes(&b), 15);
        // a lands 08:15, c launches 08:15.
        assert!(!a.overlaps(&c));
        assert_eq!(a.overlap_minutes(&c), 0);
    }

    #[test]
    fn test_cache_invalidates_on_parameter_change() {
        let catalog = day_catalog(3);
        let history = EntryHistory::new();
        let p4 = RegattaParameters::default().with_spacing(4);
        let p6 = RegattaParameters::default().with_spacing(6);
        let mut cache = TimingCache::new();

        let calc = EventTimeCalculator::new(&catalog, &history, &p4);
        assert_eq!(cache.event_time(&calc, EventNumber(3), RaceSession::Morning), Some(at(17, 8, 8)));
        assert_eq!(cache.len(), 1);

        let calc = EventTimeCalculator::new(&catalog, &history, &p6);
        assert_eq!(cache.event_time(&calc, EventNumber(3), RaceSession::Morning), Some(at(17, 8, 12)));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_reuses_overflow_table() {
        let catalog = day_catalog(5);
        let history = EntryHistory::new().with_entries([(1u32, 16), (2, 16)]);
        let params = RegattaParameters::default().with_spacing(4).with_boats_per_race(8);
        let calc = EventTimeCalculator::new(&catalog, &history, &params);
        let mut cache = TimingCache::new();
        assert!(!cache.has_overflow());

        for e in 1..=5u32 {
            assert_eq!(
                cache.event_time_from(&catalog, &history, &params, EventNumber(e), RaceSession::Morning),
                calc.event_time(EventNumber(e), RaceSession::Morning)
            );
        }
        assert!(cache.has_overflow());
        assert_eq!(cache.len(), 5);

        cache.invalidate();
        assert!(!cache.has_overflow());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_drops_overflow_on_key_change() {
        let catalog = day_catalog(3);
        let history = EntryHistory::new().with_entries([(1u32, 16)]);
        let p8 = RegattaParameters::default().with_spacing(4).with_boats_per_race(8);
        let p16 = RegattaParameters::default().with_spacing(4).with_boats_per_race(16);
        let mut cache = TimingCache::new();

        // Two heats for event 1 push event 3 back one slot.
        let t = cache.event_time_from(&catalog, &history, &p8, EventNumber(3), RaceSession::Morning);
        assert_eq!(t, Some(at(17, 8, 12)));
        let t = cache.event_time_from(&catalog, &history, &p16, EventNumber(3), RaceSession::Morning);
        assert_eq!(t, Some(at(17, 8, 8)));
    }

    proptest! {
        #[test]
        fn prop_times_monotonic_within_day(
            entries in proptest::collection::vec(0u32..40, 1..25),
            spacing in 1u32..10,
            capacity in 1u32..12,
        ) {
            let n = entries.len() as u32;
            let catalog = day_catalog(n);
            let history = EntryHistory::new()
                .with_entries(entries.iter().enumerate().map(|(i, &e)| (i as u32 + 1, e)));
            let params = RegattaParameters::default()
                .with_spacing(spacing)
                .with_boats_per_race(capacity);
            let calc = EventTimeCalculator::new(&catalog, &history, &params);
            for i in 1..n {
                let a = calc.event_time(EventNumber(i), RaceSession::Morning).unwrap();
                let b = calc.event_time(EventNumber(i + 1), RaceSession::Morning).unwrap();
                prop_assert!(a <= b);
            }
        }
    }
}
