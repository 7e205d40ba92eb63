//! Boat compatibility and auto-assignment.
//!
//! Matches fleet boats to crewed events. A boat suits an event when its seat
//! count, cox seat and rig fit; among suitable boats the crew's average
//! weight decides the preference. A boat can only serve events whose
//! launch-to-land windows do not overlap.
//!
//! # Algorithm
//!
//! Greedy over events in launch order. Each event takes the highest-scoring
//! compatible boat that is free for its window:
//!
//! | Weight fit | Score |
//! |------------|-------|
//! | good | 100 |
//! | warning | 50 |
//! | bad | 10 |
//!
//! plus [`REUSE_BONUS`] if the boat already serves another event, which
//! keeps the number of distinct boats down. Ties go to the boat listed first
//! in the fleet. No backtracking.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::models::{Boat, BoatId, EventCatalog, EventNumber, Fleet, Lineup, Roster, WeightFit};
use crate::requirements::EventRequirements;
use crate::timing::{EventTimeCalculator, RaceSession, RaceWindow};

pub const GOOD_FIT_SCORE: u32 = 100;
pub const WARNING_FIT_SCORE: u32 = 50;
pub const BAD_FIT_SCORE: u32 = 10;
/// Bonus for a boat already assigned elsewhere in the regatta.
pub const REUSE_BONUS: u32 = 20;

/// Score for a weight fit.
pub fn fit_score(fit: WeightFit) -> u32 {
    match fit {
        WeightFit::Good => GOOD_FIT_SCORE,
        WeightFit::Warning => WARNING_FIT_SCORE,
        WeightFit::Bad => BAD_FIT_SCORE,
    }
}

/// Average weight of the rowers on the roster (coxswain excluded).
/// `None` when no seated rower resolves.
pub fn crew_average_weight(lineup: &Lineup, roster: &Roster) -> Option<f64> {
    let weights: Vec<f64> = lineup
        .filled_rowers()
        .filter_map(|id| roster.get(id))
        .map(|a| a.weight)
        .collect();
    if weights.is_empty() {
        None
    } else {
        Some(weights.iter().sum::<f64>() / weights.len() as f64)
    }
}

/// Kind of advisory boat issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoatIssueKind {
    /// No fleet boat fits the event at all.
    NoCompatibleBoat,
    /// Every compatible boat is out during the event's window.
    AllBoatsBooked,
    /// Assigned boat is near its weight limits.
    WeightWarning,
    /// Assigned boat is well outside its weight range.
    WeightBad,
}

/// An advisory issue raised during boat assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoatIssue {
    pub event: EventNumber,
    pub kind: BoatIssueKind,
    pub message: String,
}

impl fmt::Display for BoatIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Outcome of a fleet-wide auto-assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoatAssignmentReport {
    /// Event to boat, replacing all previous assignments.
    pub assignments: BTreeMap<EventNumber, BoatId>,
    /// Distinct boats in use.
    pub boats_used: usize,
    pub issues: Vec<BoatIssue>,
}

impl BoatAssignmentReport {
    pub fn assigned(&self) -> usize {
        self.assignments.len()
    }
}

struct PendingEvent {
    event: EventNumber,
    requirements: EventRequirements,
    avg_weight: f64,
    window: RaceWindow,
}

/// Boat matching over a fleet.
#[derive(Debug, Clone, Copy)]
pub struct BoatAssigner<'a> {
    calc: &'a EventTimeCalculator<'a>,
    roster: &'a Roster,
    fleet: &'a Fleet,
}

impl<'a> BoatAssigner<'a> {
    pub fn new(calc: &'a EventTimeCalculator<'a>, roster: &'a Roster, fleet: &'a Fleet) -> Self {
        Self {
            calc,
            roster,
            fleet,
        }
    }

    /// Dock window used for boat bookings (morning session).
    pub fn window(&self, event: EventNumber) -> Option<RaceWindow> {
        self.calc.window(event, RaceSession::Morning)
    }

    /// Whether two events would double-book one boat.
    pub fn boats_conflict(&self, a: EventNumber, b: EventNumber) -> bool {
        match (self.window(a), self.window(b)) {
            (Some(wa), Some(wb)) => wa.overlaps(&wb),
            _ => false,
        }
    }

    /// Boats compatible with the event.
    pub fn compatible_boats(&self, requirements: &EventRequirements) -> Vec<&'a Boat> {
        self.fleet
            .iter()
            .filter(|b| b.is_compatible_with(requirements))
            .collect()
    }

    fn is_free(
        &self,
        boat: BoatId,
        window: &RaceWindow,
        event: EventNumber,
        assignments: &BTreeMap<EventNumber, BoatId>,
    ) -> bool {
        assignments
            .iter()
            .filter(|(other, b)| **b == boat && **other != event)
            .all(|(other, _)| self.window(*other).map_or(true, |w| !window.overlaps(&w)))
    }

    /// Compatible boats not booked by another event in an overlapping
    /// window, in fleet order.
    pub fn available_boats(
        &self,
        event: EventNumber,
        requirements: &EventRequirements,
        assignments: &BTreeMap<EventNumber, BoatId>,
    ) -> Vec<&'a Boat> {
        let Some(window) = self.window(event) else {
            return Vec::new();
        };
        self.compatible_boats(requirements)
            .into_iter()
            .filter(|b| self.is_free(b.id, &window, event, assignments))
            .collect()
    }

    fn pending_events(&self, lineups: &BTreeMap<EventNumber, Lineup>) -> Vec<PendingEvent> {
        let catalog: &EventCatalog = self.calc.catalog();
        let mut pending = Vec::new();
        for (&event, lineup) in lineups {
            let Some(avg_weight) = crew_average_weight(lineup, self.roster) else {
                continue;
            };
            let Some(name) = catalog.event_name(event) else {
                tracing::warn!(event = %event, "lineup for event outside the catalog");
                continue;
            };
            let requirements = match EventRequirements::parse(name) {
                Ok(r) => r,
                Err(e) => {
                    tracing::warn!(event = %event, error = %e, "skipping event in boat assignment");
                    continue;
                }
            };
            let Some(window) = self.window(event) else {
                continue;
            };
            pending.push(PendingEvent {
                event,
                requirements,
                avg_weight,
                window,
            });
        }
        pending.sort_by_key(|p| p.window.launch);
        pending
    }

    /// Clears and rebuilds boat assignments for every crewed event.
    pub fn assign(&self, lineups: &BTreeMap<EventNumber, Lineup>) -> BoatAssignmentReport {
        let mut report = BoatAssignmentReport::default();
        let mut in_use: BTreeSet<BoatId> = BTreeSet::new();

        for p in self.pending_events(lineups) {
            let compatible = self.compatible_boats(&p.requirements);
            if compatible.is_empty() {
                report.issues.push(BoatIssue {
                    event: p.event,
                    kind: BoatIssueKind::NoCompatibleBoat,
                    message: format!("No compatible boats found for Event {}", p.event),
                });
                continue;
            }

            let mut best: Option<(u32, &Boat)> = None;
            for boat in compatible {
                if !self.is_free(boat.id, &p.window, p.event, &report.assignments) {
                    continue;
                }
                let mut score = fit_score(boat.weight_check(p.avg_weight));
                if in_use.contains(&boat.id) {
                    score += REUSE_BONUS;
                }
                if best.map_or(true, |(s, _)| score > s) {
                    best = Some((score, boat));
                }
            }

            let Some((score, boat)) = best else {
                report.issues.push(BoatIssue {
                    event: p.event,
                    kind: BoatIssueKind::AllBoatsBooked,
                    message: format!(
                        "No available boats for Event {} (all compatible boats have conflicts)",
                        p.event
                    ),
                });
                continue;
            };

            report.assignments.insert(p.event, boat.id);
            in_use.insert(boat.id);
            tracing::debug!(event = %p.event, boat = %boat.name, score, "boat assigned");

            match boat.weight_check(p.avg_weight) {
                WeightFit::Good => {}
                WeightFit::Warning => report.issues.push(BoatIssue {
                    event: p.event,
                    kind: BoatIssueKind::WeightWarning,
                    message: format!(
                        "Event {}: Weight {:.1}lbs near limits for {} ({}-{}lbs)",
                        p.event, p.avg_weight, boat.name, boat.min_weight, boat.max_weight
                    ),
                }),
                WeightFit::Bad => report.issues.push(BoatIssue {
                    event: p.event,
                    kind: BoatIssueKind::WeightBad,
                    message: format!(
                        "Event {}: Weight {:.1}lbs significantly outside {} range ({}-{}lbs)",
                        p.event, p.avg_weight, boat.name, boat.min_weight, boat.max_weight
                    ),
                }),
            }
        }

        report.boats_used = in_use.len();
        for issue in &report.issues {
            tracing::warn!(event = %issue.event, kind = ?issue.kind, "{}", issue.message);
        }
        tracing::info!(
            assigned = report.assigned(),
            boats_used = report.boats_used,
            issues = report.issues.len(),
            "auto-assigned boats"
        );
        report
    }
}

/// Equipment label for a boat class, e.g. `"4+ (Coxed Four)"`.
pub fn equipment_label(requirements: &EventRequirements) -> Option<&'static str> {
    let label = match (requirements.is_sculling, requirements.num_rowers, requirements.has_cox) {
        (true, 1, _) => "1x (Single Scull)",
        (true, 2, _) => "2x (Double Scull)",
        (true, 4, _) => "4x (Quad Scull)",
        (false, 2, true) => "2+ (Coxed Pair)",
        (false, 2, false) => "2- (Pair)",
        (false, 4, true) => "4+ (Coxed Four)",
        (false, 4, false) => "4- (Four)",
        (false, 8, _) => "8+ (Eight)",
        _ => return None,
    };
    Some(label)
}

/// Boats needed per equipment class: one per lineup with a seated rower.
pub fn equipment_needs(
    lineups: &BTreeMap<EventNumber, Lineup>,
    catalog: &EventCatalog,
) -> BTreeMap<&'static str, u32> {
    let mut needs = BTreeMap::new();
    for (&event, lineup) in lineups {
        if lineup.filled_count() == 0 {
            continue;
        }
        let Some(requirements) = catalog
            .event_name(event)
            .and_then(|name| EventRequirements::parse(name).ok())
        else {
            continue;
        };
        if let Some(label) = equipment_label(&requirements) {
            *needs.entry(label).or_insert(0) += 1;
        }
    }
    needs
}
