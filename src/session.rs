//! Regatta session context.
//!
//! [`RegattaSession`] owns everything one planner works on: reference data
//! (catalog, entry history), parameters, the roster and fleet, and the
//! lineups and boat assignments built from them. Engines borrow from it;
//! nothing is global.
//!
//! Lineups are created lazily with the seat count their event requires and
//! resized whenever they are touched after a requirement change. Removing an
//! athlete leaves their seats in place; readers resolve ids against the
//! roster and treat misses as empty.

use std::collections::{BTreeMap, BTreeSet};

use crate::analysis::{athlete_schedule, IssuesReport, RegattaView, ScheduleItem};
use crate::assignment::{AutoAssignReport, CrewAssigner};
use crate::config::RegattaParameters;
use crate::equipment::{BoatAssigner, BoatAssignmentReport};
use crate::error::{ConfigError, EventError, LineupEditError};
use crate::models::{
    Athlete, AthleteId, Boat, BoatId, EntryHistory, EventCatalog, EventNumber, Fleet, Lineup,
    Roster,
};
use crate::requirements::EventRequirements;
use crate::timing::{EventTimeCalculator, RaceSession, TimingCache};
use crate::validation::{LineupIssue, LineupValidator};

/// One planner's regatta state.
#[derive(Debug, Clone)]
pub struct RegattaSession {
    catalog: EventCatalog,
    history: EntryHistory,
    params: RegattaParameters,
    roster: Roster,
    fleet: Fleet,
    lineups: BTreeMap<EventNumber, Lineup>,
    boat_assignments: BTreeMap<EventNumber, BoatId>,
    selected_events: BTreeSet<EventNumber>,
    /// Per-event planning status, opaque to the engines.
    pub event_statuses: BTreeMap<String, String>,
    /// Free-form notes.
    pub notes: String,
    timing: TimingCache,
}

impl Default for RegattaSession {
    fn default() -> Self {
        Self::new(
            EventCatalog::builtin(),
            EntryHistory::new(),
            RegattaParameters::default(),
        )
    }
}

impl RegattaSession {
    pub fn new(catalog: EventCatalog, history: EntryHistory, params: RegattaParameters) -> Self {
        Self {
            catalog,
            history,
            params,
            roster: Roster::new(),
            fleet: Fleet::new(),
            lineups: BTreeMap::new(),
            boat_assignments: BTreeMap::new(),
            selected_events: BTreeSet::new(),
            event_statuses: BTreeMap::new(),
            notes: String::new(),
            timing: TimingCache::new(),
        }
    }

    pub fn catalog(&self) -> &EventCatalog {
        &self.catalog
    }

    pub fn history(&self) -> &EntryHistory {
        &self.history
    }

    pub fn params(&self) -> &RegattaParameters {
        &self.params
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn lineups(&self) -> &BTreeMap<EventNumber, Lineup> {
        &self.lineups
    }

    pub fn lineup(&self, event: EventNumber) -> Option<&Lineup> {
        self.lineups.get(&event)
    }

    pub fn boat_assignments(&self) -> &BTreeMap<EventNumber, BoatId> {
        &self.boat_assignments
    }

    pub fn selected_events(&self) -> &BTreeSet<EventNumber> {
        &self.selected_events
    }

    /// Replaces the parameters after validating them. Cached event times
    /// are dropped.
    pub fn set_parameters(&mut self, params: RegattaParameters) -> Result<(), ConfigError> {
        params.validate()?;
        self.params = params;
        self.timing.invalidate();
        tracing::debug!("regatta parameters updated");
        Ok(())
    }

    /// Replaces the historical entry counts. Cached event times are dropped.
    pub fn set_history(&mut self, history: EntryHistory) {
        self.history = history;
        self.timing.invalidate();
    }

    /// Time calculator over the current catalog, history and parameters.
    pub fn calculator(&self) -> EventTimeCalculator<'_> {
        EventTimeCalculator::new(&self.catalog, &self.history, &self.params)
    }

    /// Event start time through the session's cache.
    pub fn event_time(
        &mut self,
        event: EventNumber,
        session: RaceSession,
    ) -> Option<chrono::NaiveDateTime> {
        self.timing
            .event_time_from(&self.catalog, &self.history, &self.params, event, session)
    }

    /// Requirements of a catalog event.
    pub fn requirements(&self, event: EventNumber) -> Result<EventRequirements, EventError> {
        let name = self
            .catalog
            .event_name(event)
            .ok_or(EventError::UnknownEvent(event))?;
        Ok(EventRequirements::parse(name)?)
    }

    // --- Roster and fleet ---

    pub fn add_athlete(&mut self, athlete: Athlete) -> AthleteId {
        self.roster.add(athlete)
    }

    /// Removes an athlete from the roster. Lineup seats holding them are
    /// left as they are and read as empty.
    pub fn remove_athlete(&mut self, id: AthleteId) -> Option<Athlete> {
        self.roster.remove(id)
    }

    /// Empties the roster and drops every lineup and boat assignment.
    pub fn clear_roster(&mut self) {
        self.roster.clear();
        self.lineups.clear();
        self.boat_assignments.clear();
        tracing::info!("roster cleared");
    }

    pub fn add_boat(&mut self, boat: Boat) -> BoatId {
        self.fleet.add(boat)
    }

    /// Removes a boat and any assignment of it.
    pub fn remove_boat(&mut self, id: BoatId) -> Option<Boat> {
        self.boat_assignments.retain(|_, b| *b != id);
        self.fleet.remove(id)
    }

    // --- Event selection ---

    /// Puts an event in play.
    pub fn select_event(&mut self, event: EventNumber) -> Result<(), EventError> {
        if self.catalog.find(event).is_none() {
            return Err(EventError::UnknownEvent(event));
        }
        self.selected_events.insert(event);
        Ok(())
    }

    /// Takes an event out of play, dropping its lineup and boat.
    pub fn deselect_event(&mut self, event: EventNumber) {
        self.selected_events.remove(&event);
        self.lineups.remove(&event);
        self.boat_assignments.remove(&event);
    }

    // --- Lineup editing ---

    /// The event's lineup, created or resized to its seat count.
    pub fn lineup_mut(&mut self, event: EventNumber) -> Result<&mut Lineup, EventError> {
        let requirements = self.requirements(event)?;
        let lineup = self
            .lineups
            .entry(event)
            .or_insert_with(|| Lineup::new(requirements.num_rowers));
        if lineup.seat_count() != requirements.num_rowers as usize {
            lineup.resize(requirements.num_rowers);
        }
        Ok(lineup)
    }

    /// Seats an athlete (or clears the seat with `None`).
    pub fn set_rower(
        &mut self,
        event: EventNumber,
        seat: usize,
        athlete: Option<AthleteId>,
    ) -> Result<(), LineupEditError> {
        if let Some(id) = athlete {
            if self.roster.get(id).is_none() {
                return Err(LineupEditError::UnknownAthlete(id));
            }
        }
        self.lineup_mut(event)?.set_rower(seat, athlete)
    }

    /// Sets (or clears) the coxswain.
    pub fn set_coxswain(
        &mut self,
        event: EventNumber,
        athlete: Option<AthleteId>,
    ) -> Result<(), LineupEditError> {
        if let Some(id) = athlete {
            if self.roster.get(id).is_none() {
                return Err(LineupEditError::UnknownAthlete(id));
            }
        }
        self.lineup_mut(event)?.set_coxswain(athlete)
    }

    /// Empties every seat of an event's lineup.
    pub fn clear_lineup(&mut self, event: EventNumber) {
        if let Some(lineup) = self.lineups.get_mut(&event) {
            lineup.clear();
        }
    }

    /// Roster athletes who could take a rower seat: not already in the
    /// lineup, available on the event day, right gender and rig.
    pub fn available_athletes_for_seat(
        &self,
        event: EventNumber,
    ) -> Result<Vec<&Athlete>, EventError> {
        let entry = self.catalog.find(event).ok_or(EventError::UnknownEvent(event))?;
        let requirements = EventRequirements::parse(&entry.event.name)?;
        let lineup = self.lineups.get(&event);
        Ok(self
            .roster
            .iter()
            .filter(|a| !lineup.is_some_and(|l| l.contains(a.id)))
            .filter(|a| a.is_available_on(entry.day) && a.is_eligible_rower(&requirements))
            .collect())
    }

    /// Cox-capable roster athletes not in the lineup and available that day.
    pub fn available_coxswains(&self, event: EventNumber) -> Result<Vec<&Athlete>, EventError> {
        let entry = self.catalog.find(event).ok_or(EventError::UnknownEvent(event))?;
        let lineup = self.lineups.get(&event);
        Ok(self
            .roster
            .iter()
            .filter(|a| a.can_cox && a.is_available_on(entry.day))
            .filter(|a| !lineup.is_some_and(|l| l.contains(a.id)))
            .collect())
    }

    // --- Engines ---

    /// Rebuilds all lineups from athletes' preferred events.
    ///
    /// Previous lineups are replaced. Assigned events join the selection;
    /// boat assignments for events without a new lineup are dropped.
    pub fn auto_assign_crews(&mut self) -> AutoAssignReport {
        let report = CrewAssigner::new(&self.catalog, &self.roster).assign_preferred_events();
        if self.roster.is_empty() {
            return report;
        }
        self.lineups = report.lineups.clone();
        self.selected_events.extend(report.selected.iter().copied());
        let lineups = &self.lineups;
        self.boat_assignments.retain(|e, _| lineups.contains_key(e));
        report
    }

    /// Rebuilds all boat assignments for crewed events.
    pub fn auto_assign_boats(&mut self) -> BoatAssignmentReport {
        let calc = EventTimeCalculator::new(&self.catalog, &self.history, &self.params);
        let report = BoatAssigner::new(&calc, &self.roster, &self.fleet).assign(&self.lineups);
        self.boat_assignments = report.assignments.clone();
        report
    }

    /// Compatible boats free for the event's window, in fleet order.
    pub fn available_boats(&self, event: EventNumber) -> Result<Vec<&Boat>, EventError> {
        let requirements = self.requirements(event)?;
        let calc = self.calculator();
        let boats = BoatAssigner::new(&calc, &self.roster, &self.fleet)
            .available_boats(event, &requirements, &self.boat_assignments)
            .into_iter()
            .map(|b| b.id)
            .collect::<Vec<_>>();
        Ok(boats.into_iter().filter_map(|id| self.fleet.get(id)).collect())
    }

    /// Assigns a boat by hand. The boat must fit the event; window
    /// conflicts are allowed and show up in the issues report.
    pub fn assign_boat(&mut self, event: EventNumber, boat: BoatId) -> Result<(), LineupEditError> {
        let requirements = self.requirements(event)?;
        let b = self.fleet.get(boat).ok_or(LineupEditError::UnknownBoat(boat))?;
        if !b.is_compatible_with(&requirements) {
            return Err(LineupEditError::IncompatibleBoat {
                boat: b.name.clone(),
                event,
            });
        }
        self.boat_assignments.insert(event, boat);
        Ok(())
    }

    pub fn unassign_boat(&mut self, event: EventNumber) -> Option<BoatId> {
        self.boat_assignments.remove(&event)
    }

    /// Validates one event's lineup against the rest of the regatta.
    pub fn validate_lineup(&self, event: EventNumber) -> Result<Vec<LineupIssue>, EventError> {
        let requirements = self.requirements(event)?;
        let Some(lineup) = self.lineups.get(&event) else {
            return Ok(Vec::new());
        };
        let calc = self.calculator();
        Ok(LineupValidator::new(&calc, &self.roster).validate(
            event,
            lineup,
            &requirements,
            &self.lineups,
        ))
    }

    /// Regatta-wide issues report.
    pub fn issues_report(&self) -> IssuesReport {
        let calc = self.calculator();
        IssuesReport::calculate(&self.view(&calc))
    }

    /// Every race an athlete is in, in race order.
    pub fn athlete_schedule(&self, athlete: AthleteId) -> Vec<ScheduleItem> {
        let calc = self.calculator();
        athlete_schedule(&self.view(&calc), athlete)
    }

    fn view<'s>(&'s self, calc: &'s EventTimeCalculator<'s>) -> RegattaView<'s> {
        RegattaView {
            calc,
            roster: &self.roster,
            fleet: &self.fleet,
            lineups: &self.lineups,
            boat_assignments: &self.boat_assignments,
        }
    }

    /// Replaces the whole planning state. Used by snapshot loading once a
    /// document has been fully resolved.
    pub(crate) fn replace_state(&mut self, state: PlanningState) {
        self.params = state.params;
        self.roster = state.roster;
        self.fleet = state.fleet;
        self.lineups = state.lineups;
        self.boat_assignments = state.boat_assignments;
        self.selected_events = state.selected_events;
        self.event_statuses = state.event_statuses;
        self.notes = state.notes;
        self.timing.invalidate();
    }
}

/// The part of a session a snapshot carries.
#[derive(Debug, Clone, Default)]
pub(crate) struct PlanningState {
    pub params: RegattaParameters,
    pub roster: Roster,
    pub fleet: Fleet,
    pub lineups: BTreeMap<EventNumber, Lineup>,
    pub boat_assignments: BTreeMap<EventNumber, BoatId>,
    pub selected_events: BTreeSet<EventNumber>,
    pub event_statuses: BTreeMap<String, String>,
    pub notes: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Event, Gender, RaceDay};
    use crate::validation::LineupIssueKind;

    fn session() -> RegattaSession {
        let catalog = EventCatalog::new()
            .with_day(
                RaceDay::Thursday,
                vec![
                    Event::new(1u32, "Men's Open C 4+"),
                    Event::new(2u32, "Mixed D 2x"),
                    Event::new(3u32, "Men's Masters 1x"),
                ],
            )
            .with_day(RaceDay::Friday, vec![Event::new(10u32, "Men's Open 8+")]);
        RegattaSession::new(catalog, EntryHistory::new(), RegattaParameters::default())
    }

    #[test]
    fn test_lineup_created_with_required_seats() {
        let mut s = session();
        assert_eq!(s.lineup_mut(EventNumber(1)).unwrap().seat_count(), 4);
        assert_eq!(s.lineup_mut(EventNumber(10)).unwrap().seat_count(), 8);
        assert!(matches!(
            s.lineup_mut(EventNumber(99)),
            Err(EventError::UnknownEvent(EventNumber(99)))
        ));
    }

    #[test]
    fn test_set_rower_checks_roster_and_duplicates() {
        let mut s = session();
        let a = s.add_athlete(Athlete::new("A", Gender::Male, 45));
        s.set_rower(EventNumber(1), 0, Some(a)).unwrap();
        assert_eq!(
            s.set_rower(EventNumber(1), 1, Some(a)),
            Err(LineupEditError::AlreadyInLineup(a))
        );
        let ghost = AthleteId::new();
        assert_eq!(
            s.set_coxswain(EventNumber(1), Some(ghost)),
            Err(LineupEditError::UnknownAthlete(ghost))
        );
        s.set_rower(EventNumber(1), 0, None).unwrap();
        assert!(s.lineup(EventNumber(1)).unwrap().is_empty());
    }

    #[test]
    fn test_lineup_resized_after_catalog_mismatch() {
        let mut s = session();
        let ids: Vec<AthleteId> = (0..6)
            .map(|i| s.add_athlete(Athlete::new(format!("R{i}"), Gender::Male, 45)))
            .collect();
        // A stale six-seat lineup for a four-seat event.
        s.lineups.insert(EventNumber(1), Lineup::from_crew(6, ids.clone(), None));
        let lineup = s.lineup_mut(EventNumber(1)).unwrap();
        assert_eq!(lineup.seat_count(), 4);
        assert_eq!(lineup.filled_count(), 4);
    }

    #[test]
    fn test_removed_athlete_reads_as_empty() {
        let mut s = session();
        let a = s.add_athlete(Athlete::new("Gone", Gender::Male, 45));
        s.set_rower(EventNumber(3), 0, Some(a)).unwrap();
        s.remove_athlete(a);
        let issues = s.validate_lineup(EventNumber(3)).unwrap();
        assert_eq!(issues[0].kind, LineupIssueKind::MissingRowers { count: 1 });
    }

    #[test]
    fn test_deselect_drops_lineup_and_boat() {
        let mut s = session();
        let a = s.add_athlete(Athlete::new("A", Gender::Male, 45));
        let single = s.add_boat(Boat::new("Yorick", "1x", 1, 150, 180));
        s.select_event(EventNumber(3)).unwrap();
        s.set_rower(EventNumber(3), 0, Some(a)).unwrap();
        s.assign_boat(EventNumber(3), single).unwrap();
        s.deselect_event(EventNumber(3));
        assert!(s.selected_events().is_empty());
        assert!(s.lineup(EventNumber(3)).is_none());
        assert!(s.boat_assignments().is_empty());
        assert!(s.select_event(EventNumber(99)).is_err());
    }

    #[test]
    fn test_clear_roster_drops_everything_crewed() {
        let mut s = session();
        let a = s.add_athlete(Athlete::new("A", Gender::Male, 45));
        let single = s.add_boat(Boat::new("Yorick", "1x", 1, 150, 180));
        s.set_rower(EventNumber(3), 0, Some(a)).unwrap();
        s.assign_boat(EventNumber(3), single).unwrap();
        s.clear_roster();
        assert!(s.roster().is_empty());
        assert!(s.lineups().is_empty());
        assert!(s.boat_assignments().is_empty());
        assert_eq!(s.fleet().len(), 1);
    }

    #[test]
    fn test_available_athletes_and_coxswains() {
        let mut s = session();
        let seated = s.add_athlete(Athlete::new("Seated", Gender::Male, 45));
        let woman = s.add_athlete(Athlete::new("Woman", Gender::Female, 45).with_cox(true));
        let away = s.add_athlete(
            Athlete::new("Away", Gender::Male, 45).with_available_days([RaceDay::Sunday]),
        );
        let free = s.add_athlete(Athlete::new("Free", Gender::Male, 45));
        s.set_rower(EventNumber(1), 0, Some(seated)).unwrap();

        let rowers: Vec<AthleteId> = s
            .available_athletes_for_seat(EventNumber(1))
            .unwrap()
            .iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(rowers, vec![free]);
        assert!(!rowers.contains(&away));

        let coxes: Vec<AthleteId> = s
            .available_coxswains(EventNumber(1))
            .unwrap()
            .iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(coxes, vec![woman]);
    }

    #[test]
    fn test_manual_boat_assignment() {
        let mut s = session();
        let single = s.add_boat(Boat::new("Yorick", "1x", 1, 150, 180));
        let eight = s.add_boat(Boat::new("Big Red", "8+", 8, 170, 200));
        assert_eq!(
            s.assign_boat(EventNumber(3), eight),
            Err(LineupEditError::IncompatibleBoat {
                boat: "Big Red".into(),
                event: EventNumber(3),
            })
        );
        assert_eq!(s.available_boats(EventNumber(3)).unwrap().len(), 1);
        s.assign_boat(EventNumber(3), single).unwrap();
        assert_eq!(s.unassign_boat(EventNumber(3)), Some(single));
        assert!(matches!(
            s.assign_boat(EventNumber(3), BoatId::new()),
            Err(LineupEditError::UnknownBoat(_))
        ));
    }

    #[test]
    fn test_auto_assign_crews_and_boats() {
        let mut s = session();
        for i in 0..4 {
            s.add_athlete(
                Athlete::new(format!("M{i}"), Gender::Male, 45)
                    .with_weight(170.0)
                    .with_preferred_events([1u32]),
            );
        }
        s.add_athlete(Athlete::new("Cox", Gender::Female, 40).with_cox(true));
        s.add_boat(Boat::new("Four", "4+", 4, 160, 190));

        let crews = s.auto_assign_crews();
        assert_eq!(crews.assignments_made, 1);
        assert!(s.selected_events().contains(&EventNumber(1)));
        let lineup = s.lineup(EventNumber(1)).unwrap();
        assert_eq!(lineup.filled_count(), 4);
        assert!(lineup.coxswain().is_some());
        assert!(s.validate_lineup(EventNumber(1)).unwrap().is_empty());

        let boats = s.auto_assign_boats();
        assert_eq!(boats.assigned(), 1);
        assert!(boats.issues.is_empty());
        assert_eq!(s.issues_report().issue_count(), 0);
    }

    #[test]
    fn test_auto_assign_with_empty_roster_keeps_lineups() {
        let mut s = session();
        s.lineups.insert(EventNumber(3), Lineup::new(1));
        let report = s.auto_assign_crews();
        assert_eq!(report.issues, vec!["No athletes to assign".to_string()]);
        assert!(s.lineup(EventNumber(3)).is_some());
    }

    #[test]
    fn test_parameter_change_invalidates_times() {
        let mut s = session();
        let before = s.event_time(EventNumber(3), RaceSession::Morning).unwrap();
        s.set_parameters(RegattaParameters::default().with_spacing(10)).unwrap();
        let after = s.event_time(EventNumber(3), RaceSession::Morning).unwrap();
        assert_eq!((after - before).num_minutes(), 12);
        assert!(s.timing.has_overflow());

        s.set_history(EntryHistory::new().with_entries([(1u32, 30)]));
        assert!(!s.timing.has_overflow());
        assert!(s.timing.is_empty());
        // Event 1 runs four heats with 8 lanes, delaying event 3 by 30 minutes.
        let delayed = s.event_time(EventNumber(3), RaceSession::Morning).unwrap();
        assert_eq!((delayed - after).num_minutes(), 30);
        assert!(s
            .set_parameters(RegattaParameters::default().with_boats_per_race(0))
            .is_err());
    }

    #[test]
    fn test_athlete_schedule_through_session() {
        let mut s = session();
        let a = s.add_athlete(Athlete::new("A", Gender::Male, 45));
        s.set_rower(EventNumber(10), 7, Some(a)).unwrap();
        let items = s.athlete_schedule(a);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].seat, "Stroke");
    }
}
