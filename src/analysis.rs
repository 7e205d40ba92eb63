//! Regatta-wide issue analysis.
//!
//! Read-only passes over the lineups and boat assignments of a whole
//! regatta. Where [`LineupValidator`](crate::validation::LineupValidator)
//! looks at one lineup, these reports look across events.
//!
//! # Passes
//!
//! | Pass | Flags |
//! |------|-------|
//! | Athlete conflicts | consecutive races of one athlete closer than `min_gap_minutes` |
//! | Boat conflicts | one boat launching before it lands from its previous event |
//! | Incomplete lineups | empty rower seats, missing coxswain |
//! | Unassigned boats | crewed events without a boat |
//! | Weight | crew average outside the boat's rated range |
//! | Boat vintage | boat older than its "Master X" category allows |
//! | Workload | athletes in 6+ events, per-day counts, unused athletes |
//! | Boat usage | events per boat, unused boats |
//!
//! All times are morning session.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use chrono::Datelike;

use crate::equipment::{crew_average_weight, equipment_needs};
use crate::models::{
    Athlete, AthleteId, BoatId, EventNumber, Fleet, Lineup, RaceDay, Roster, WeightFit,
};
use crate::requirements::EventRequirements;
use crate::timing::{EventSchedule, EventTimeCalculator, RaceSession};

/// Athletes racing at least this many events are flagged as overloaded.
pub const OVERLOAD_EVENTS: usize = 6;

/// Maximum boat age in years per masters category letter.
const VINTAGE_LIMITS: [(char, i32); 7] = [
    ('A', 15),
    ('B', 20),
    ('C', 25),
    ('D', 30),
    ('E', 35),
    ('F', 40),
    ('G', 50),
];

/// A boat assignment whose crew weight is off the rated range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightIssue {
    pub event: EventNumber,
    /// `Warning` or `Bad`.
    pub fit: WeightFit,
    pub message: String,
}

/// An athlete racing [`OVERLOAD_EVENTS`] or more events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workload {
    pub athlete: AthleteId,
    pub name: String,
    /// Events, ascending.
    pub events: Vec<EventNumber>,
}

impl Workload {
    pub fn total(&self) -> usize {
        self.events.len()
    }
}

/// Per-day event counts for an athlete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyLoad {
    pub athlete: AthleteId,
    pub name: String,
    pub per_day: BTreeMap<RaceDay, u32>,
    pub total: u32,
}

impl DailyLoad {
    /// Events on a day (zero when none).
    pub fn on(&self, day: RaceDay) -> u32 {
        self.per_day.get(&day).copied().unwrap_or(0)
    }
}

/// Events served by a boat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoatUsage {
    pub boat: BoatId,
    pub name: String,
    pub events: Vec<EventNumber>,
}

/// Regatta-wide issues and usage summary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssuesReport {
    pub athlete_conflicts: Vec<String>,
    pub boat_conflicts: Vec<String>,
    pub incomplete_lineups: Vec<String>,
    pub unassigned_boats: Vec<String>,
    pub weight_issues: Vec<WeightIssue>,
    pub vintage_issues: Vec<String>,
    pub overloaded: Vec<Workload>,
    /// Athletes with two or more events, busiest first.
    pub daily_breakdown: Vec<DailyLoad>,
    /// Roster names in no lineup, in roster order.
    pub unused_athletes: Vec<String>,
    /// Boats with assignments, in fleet order.
    pub boat_usage: Vec<BoatUsage>,
    /// Fleet names with no assignment, in fleet order.
    pub unused_boats: Vec<String>,
    /// Boats needed per equipment class.
    pub equipment_needs: BTreeMap<String, u32>,
}

/// Read-only view of everything the analysis looks at.
#[derive(Debug, Clone, Copy)]
pub struct RegattaView<'a> {
    pub calc: &'a EventTimeCalculator<'a>,
    pub roster: &'a Roster,
    pub fleet: &'a Fleet,
    pub lineups: &'a BTreeMap<EventNumber, Lineup>,
    pub boat_assignments: &'a BTreeMap<EventNumber, BoatId>,
}

impl IssuesReport {
    /// Runs every pass.
    pub fn calculate(view: &RegattaView<'_>) -> Self {
        let mut report = Self {
            athlete_conflicts: athlete_conflicts(view),
            boat_conflicts: boat_conflicts(view),
            incomplete_lineups: incomplete_lineups(view),
            unassigned_boats: unassigned_boats(view),
            weight_issues: weight_issues(view),
            vintage_issues: vintage_issues(view),
            equipment_needs: equipment_needs(view.lineups, view.calc.catalog())
                .into_iter()
                .map(|(label, n)| (label.to_string(), n))
                .collect(),
            ..Self::default()
        };
        report.fill_workload(view);
        report.fill_boat_usage(view);
        tracing::debug!(issues = report.issue_count(), "regatta issues analysed");
        report
    }

    /// Number of flagged problems (usage summaries excluded).
    pub fn issue_count(&self) -> usize {
        self.athlete_conflicts.len()
            + self.boat_conflicts.len()
            + self.incomplete_lineups.len()
            + self.unassigned_boats.len()
            + self.weight_issues.len()
            + self.vintage_issues.len()
    }

    fn fill_workload(&mut self, view: &RegattaView<'_>) {
        let mut events: HashMap<AthleteId, Vec<EventNumber>> = HashMap::new();
        let mut daily: HashMap<AthleteId, BTreeMap<RaceDay, u32>> = HashMap::new();
        for (&event, lineup) in view.lineups {
            let day = view.calc.catalog().find(event).map(|e| e.day);
            for athlete in occupants(lineup, view.roster) {
                events.entry(athlete.id).or_default().push(event);
                if let Some(day) = day {
                    *daily.entry(athlete.id).or_default().entry(day).or_insert(0) += 1;
                }
            }
        }

        for athlete in view.roster {
            match events.get(&athlete.id) {
                None => self.unused_athletes.push(athlete.name.clone()),
                Some(list) if list.len() >= OVERLOAD_EVENTS => {
                    let mut list = list.clone();
                    list.sort();
                    self.overloaded.push(Workload {
                        athlete: athlete.id,
                        name: athlete.name.clone(),
                        events: list,
                    });
                }
                Some(_) => {}
            }
            if let Some(per_day) = daily.remove(&athlete.id) {
                let total: u32 = per_day.values().sum();
                if total >= 2 {
                    self.daily_breakdown.push(DailyLoad {
                        athlete: athlete.id,
                        name: athlete.name.clone(),
                        per_day,
                        total,
                    });
                }
            }
        }
        self.daily_breakdown.sort_by(|a, b| b.total.cmp(&a.total));
    }

    fn fill_boat_usage(&mut self, view: &RegattaView<'_>) {
        for boat in view.fleet {
            let events: Vec<EventNumber> = view
                .boat_assignments
                .iter()
                .filter(|(_, b)| **b == boat.id)
                .map(|(e, _)| *e)
                .collect();
            if events.is_empty() {
                self.unused_boats.push(boat.name.clone());
            } else {
                self.boat_usage.push(BoatUsage {
                    boat: boat.id,
                    name: boat.name.clone(),
                    events,
                });
            }
        }
    }
}

/// Seated rowers then coxswain, resolved against the roster.
fn occupants<'r>(lineup: &'r Lineup, roster: &'r Roster) -> impl Iterator<Item = &'r Athlete> + 'r {
    lineup.occupants().filter_map(move |id| roster.get(id))
}

fn event_label(view: &RegattaView<'_>, event: EventNumber) -> String {
    view.calc
        .catalog()
        .event_name(event)
        .unwrap_or("Unknown")
        .to_string()
}

fn athlete_conflicts(view: &RegattaView<'_>) -> Vec<String> {
    let mut races: BTreeMap<AthleteId, Vec<(chrono::NaiveDateTime, EventNumber)>> = BTreeMap::new();
    for (&event, lineup) in view.lineups {
        let Some(time) = view.calc.event_time(event, RaceSession::Morning) else {
            continue;
        };
        for athlete in occupants(lineup, view.roster) {
            races.entry(athlete.id).or_default().push((time, event));
        }
    }

    let min_gap = i64::from(view.calc.params().min_gap_minutes);
    let mut conflicts = Vec::new();
    // Roster order keeps the output stable.
    for athlete in view.roster {
        let Some(list) = races.get_mut(&athlete.id) else {
            continue;
        };
        list.sort();
        for pair in list.windows(2) {
            let (t0, e0) = pair[0];
            let (t1, e1) = pair[1];
            let gap = (t1 - t0).num_minutes();
            if gap > 0 && gap < min_gap {
                conflicts.push(format!(
                    "{}: {} min gap between events {} and {}",
                    athlete.name, gap, e0, e1
                ));
            }
        }
    }
    conflicts
}

fn boat_conflicts(view: &RegattaView<'_>) -> Vec<String> {
    let mut conflicts = Vec::new();
    for boat in view.fleet {
        let mut windows: Vec<_> = view
            .boat_assignments
            .iter()
            .filter(|(_, b)| **b == boat.id)
            .filter_map(|(&e, _)| view.calc.window(e, RaceSession::Morning).map(|w| (w, e)))
            .collect();
        windows.sort_by_key(|(w, _)| w.launch);
        for pair in windows.windows(2) {
            let (current, e0) = pair[0];
            let (next, e1) = pair[1];
            if current.land > next.launch {
                conflicts.push(format!(
                    "{}: {} min overlap between events {} and {}",
                    boat.name,
                    current.overlap_minutes(&next),
                    e0,
                    e1
                ));
            }
        }
    }
    conflicts
}

fn incomplete_lineups(view: &RegattaView<'_>) -> Vec<String> {
    let mut incomplete = Vec::new();
    for (&event, lineup) in view.lineups {
        let name = event_label(view, event);
        let Ok(requirements) = EventRequirements::parse(&name) else {
            continue;
        };
        let filled = lineup
            .filled_rowers()
            .filter(|id| view.roster.get(*id).is_some())
            .count();
        if filled == 0 {
            continue;
        }
        let empty = lineup.seat_count() - filled;
        if empty > 0 {
            incomplete.push(format!(
                "Event {} ({}): {} empty rower seat{}",
                event,
                name,
                empty,
                if empty == 1 { "" } else { "s" }
            ));
        }
        let has_cox = lineup.coxswain().and_then(|id| view.roster.get(id)).is_some();
        if requirements.has_cox && !has_cox {
            incomplete.push(format!("Event {} ({}): Missing required coxswain", event, name));
        }
    }
    incomplete
}

fn unassigned_boats(view: &RegattaView<'_>) -> Vec<String> {
    view.lineups
        .iter()
        .filter(|(event, lineup)| {
            lineup.filled_count() > 0 && !view.boat_assignments.contains_key(*event)
        })
        .map(|(&event, _)| format!("Event {}: {}", event, event_label(view, event)))
        .collect()
}

fn weight_issues(view: &RegattaView<'_>) -> Vec<WeightIssue> {
    let mut issues = Vec::new();
    for (&event, &boat_id) in view.boat_assignments {
        let Some(boat) = view.fleet.get(boat_id) else {
            continue;
        };
        let Some(avg) = view
            .lineups
            .get(&event)
            .and_then(|l| crew_average_weight(l, view.roster))
        else {
            continue;
        };
        let fit = boat.weight_check(avg);
        let verdict = match fit {
            WeightFit::Good => continue,
            WeightFit::Warning => "near range limits",
            WeightFit::Bad => "outside range",
        };
        issues.push(WeightIssue {
            event,
            fit,
            message: format!(
                "Event {} ({}): {} - avg weight {:.1}lbs {} {}-{}lbs",
                event,
                event_label(view, event),
                boat.name,
                avg,
                verdict,
                boat.min_weight,
                boat.max_weight
            ),
        });
    }
    issues
}

/// Category letter of a "Master X" event name.
fn masters_letter(event_name: &str) -> Option<char> {
    let mut words = event_name.split_whitespace();
    while let Some(word) = words.next() {
        if word == "Master" {
            let next = words.next()?;
            let mut chars = next.chars();
            return match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_alphabetic() => Some(c.to_ascii_uppercase()),
                _ => None,
            };
        }
    }
    None
}

fn vintage_issues(view: &RegattaView<'_>) -> Vec<String> {
    let current_year = view.calc.params().regatta_start_date.year();
    let mut issues = Vec::new();
    for (&event, &boat_id) in view.boat_assignments {
        let (Some(boat), Some(name)) = (view.fleet.get(boat_id), view.calc.catalog().event_name(event))
        else {
            continue;
        };
        let (Some(letter), Some(year)) = (masters_letter(name), boat.year) else {
            continue;
        };
        let Some(&(_, limit)) = VINTAGE_LIMITS.iter().find(|(c, _)| *c == letter) else {
            continue;
        };
        if current_year.saturating_sub(year) > limit {
            issues.push(format!(
                "Event {} ({}): {} ({}) may be too old for Master {} category",
                event, name, boat.name, year, letter
            ));
        }
    }
    issues
}

/// One race in an athlete's personal schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleItem {
    pub event: EventNumber,
    pub event_name: String,
    pub day: RaceDay,
    /// Seat name, or `"Coxswain"`.
    pub seat: String,
    pub schedule: EventSchedule,
    pub boat: Option<String>,
}

/// Every race an athlete is in, in race order.
pub fn athlete_schedule(view: &RegattaView<'_>, athlete: AthleteId) -> Vec<ScheduleItem> {
    let mut items = Vec::new();
    for (&event, lineup) in view.lineups {
        let Some(entry) = view.calc.catalog().find(event) else {
            continue;
        };
        let seat = if lineup.coxswain() == Some(athlete) {
            "Coxswain".to_string()
        } else if let Some(idx) = lineup.rowers().iter().position(|r| *r == Some(athlete)) {
            EventRequirements::parse(&entry.event.name)
                .map(|r| r.seat_name(idx))
                .unwrap_or_else(|_| format!("Seat {}", idx + 1))
        } else {
            continue;
        };
        let Some(schedule) = view.calc.schedule(event) else {
            continue;
        };
        items.push(ScheduleItem {
            event,
            event_name: entry.event.name.clone(),
            day: entry.day,
            seat,
            schedule,
            boat: view
                .boat_assignments
                .get(&event)
                .and_then(|b| view.fleet.get(*b))
                .map(|b| b.name.clone()),
        });
    }
    items.sort_by_key(|i| i.schedule.heat.map_or(i.schedule.final_race.race, |h| h.race));
    items
}
