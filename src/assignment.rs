//! Crew assignment.
//!
//! Fills an event's rowing seats and coxswain seat from a pool of interested
//! athletes. The engine prefers a partial crew over no crew: as long as one
//! eligible athlete exists it returns a lineup, annotated with how full it is.
//!
//! # Algorithm
//!
//! 1. Keep pool athletes who pass gender, rig and day checks.
//! 2. Fill `min(eligible, seats)` rower seats:
//!    - Mixed events take men and women evenly, then backfill from either.
//!    - Events with age tokens take the crew whose mean age is the smallest
//!      value still at or above the category minimum.
//!    - Otherwise the first eligible athletes in pool order.
//! 3. If the boat is coxed, take a coxswain from the pool, then from the
//!    roster, and finally by moving a cox-capable rower out of their seat.
//!
//! Greedy and local: events are filled independently and nothing is
//! revisited.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::EventError;
use crate::models::{Athlete, EventCatalog, EventNumber, Gender, Lineup, RaceDay, Roster};
use crate::requirements::{EventRequirements, GenderRequirement};

/// Largest number of crew combinations enumerated exactly by the age search.
/// Beyond this the search switches to tracking reachable age sums.
pub const MAX_AGE_COMBINATIONS: u128 = 250_000;

/// Where the coxswain came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoxSource {
    /// An interested athlete not rowing in the event.
    InterestedPool,
    /// Anyone else on the roster.
    Roster,
    /// A rower moved out of their seat.
    BorrowedFromCrew,
}

/// A (possibly partial) crew for one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewAssignment {
    pub event: EventNumber,
    pub lineup: Lineup,
    /// Seats the event requires.
    pub num_rowers: u32,
    /// Set when a coxswain was placed.
    pub cox_source: Option<CoxSource>,
}

impl CrewAssignment {
    pub fn rowers_filled(&self) -> usize {
        self.lineup.filled_count()
    }

    /// Every rower seat is filled (the cox seat is not considered).
    pub fn is_full(&self) -> bool {
        self.rowers_filled() == self.num_rowers as usize
    }

    /// Summary such as `"Assigned 3 rowers + coxswain (partial: 3/4)"`.
    pub fn message(&self) -> String {
        let filled = self.rowers_filled();
        let cox = if self.lineup.coxswain().is_some() {
            " + coxswain"
        } else {
            ""
        };
        let partial = if filled < self.num_rowers as usize {
            format!(" (partial: {}/{})", filled, self.num_rowers)
        } else {
            String::new()
        };
        format!("Assigned {} rowers{}{}", filled, cox, partial)
    }
}

/// Result of assigning one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CrewOutcome {
    /// A crew was placed.
    Assigned(CrewAssignment),
    /// Nobody in the pool could row the event.
    EligibilityGap { event: EventNumber, reason: String },
}

impl CrewOutcome {
    pub fn is_assigned(&self) -> bool {
        matches!(self, CrewOutcome::Assigned(_))
    }

    pub fn message(&self) -> String {
        match self {
            CrewOutcome::Assigned(a) => a.message(),
            CrewOutcome::EligibilityGap { reason, .. } => reason.clone(),
        }
    }
}

/// Result of auto-assigning every athlete's preferred events.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AutoAssignReport {
    /// Fresh lineups, replacing all previous ones.
    pub lineups: BTreeMap<EventNumber, Lineup>,
    /// Events that received a crew.
    pub selected: BTreeSet<EventNumber>,
    pub assignments_made: usize,
    /// One line per event that could not be assigned, e.g.
    /// `"Event 162: No eligible athletes available"`.
    pub issues: Vec<String>,
}

/// Crew assignment engine over a catalog and roster.
#[derive(Debug, Clone, Copy)]
pub struct CrewAssigner<'a> {
    catalog: &'a EventCatalog,
    roster: &'a Roster,
}

impl<'a> CrewAssigner<'a> {
    pub fn new(catalog: &'a EventCatalog, roster: &'a Roster) -> Self {
        Self { catalog, roster }
    }

    /// Pool athletes who may row the event on its day, in pool order.
    pub fn eligible_rowers<'p>(
        requirements: &EventRequirements,
        day: RaceDay,
        pool: &[&'p Athlete],
    ) -> Vec<&'p Athlete> {
        pool.iter()
            .copied()
            .filter(|a| a.is_eligible_rower(requirements) && a.is_available_on(day))
            .unique_by(|a| a.id)
            .collect()
    }

    /// Assigns a crew for one event from `interested`.
    ///
    /// # Errors
    /// [`EventError`] if the event is not in the catalog or its name does
    /// not parse. Lack of athletes is an [`CrewOutcome::EligibilityGap`],
    /// not an error.
    pub fn assign_event<'p>(
        &self,
        event: EventNumber,
        interested: &[&'p Athlete],
    ) -> Result<CrewOutcome, EventError>
    where
        'a: 'p,
    {
        let entry = self
            .catalog
            .find(event)
            .ok_or(EventError::UnknownEvent(event))?;
        let requirements = EventRequirements::parse(&entry.event.name)?;

        let eligible = Self::eligible_rowers(&requirements, entry.day, interested);
        if eligible.is_empty() {
            return Ok(CrewOutcome::EligibilityGap {
                event,
                reason: "No eligible athletes available".into(),
            });
        }

        let to_assign = eligible.len().min(requirements.num_rowers as usize);
        let mut crew = match requirements.gender_req {
            GenderRequirement::Mixed => {
                balanced_crew(&eligible, requirements.num_rowers as usize, to_assign)
            }
            _ => match requirements.minimum_age() {
                Some(min_age) => youngest_qualifying_crew(&eligible, to_assign, min_age)
                    .unwrap_or_else(|| eligible[..to_assign].to_vec()),
                None => eligible[..to_assign].to_vec(),
            },
        };

        let mut cox_source = None;
        let mut coxswain = None;
        if requirements.has_cox {
            if let Some((cox, source)) = self.pick_coxswain(entry.day, interested, &mut crew) {
                coxswain = Some(cox.id);
                cox_source = Some(source);
            }
        }

        let lineup = Lineup::from_crew(
            requirements.num_rowers,
            crew.iter().map(|a| a.id),
            coxswain,
        );
        let assignment = CrewAssignment {
            event,
            lineup,
            num_rowers: requirements.num_rowers,
            cox_source,
        };
        tracing::debug!(
            event = %event,
            filled = assignment.rowers_filled(),
            seats = requirements.num_rowers,
            cox = ?cox_source,
            "crew assigned"
        );
        Ok(CrewOutcome::Assigned(assignment))
    }

    fn pick_coxswain<'p>(
        &self,
        day: RaceDay,
        interested: &[&'p Athlete],
        crew: &mut Vec<&'p Athlete>,
    ) -> Option<(&'p Athlete, CoxSource)>
    where
        'a: 'p,
    {
        let free = |a: &&Athlete| {
            a.can_cox && a.is_available_on(day) && !crew.iter().any(|c| c.id == a.id)
        };
        if let Some(cox) = interested.iter().copied().find(|a| free(a)) {
            return Some((cox, CoxSource::InterestedPool));
        }
        if let Some(cox) = self.roster.iter().find(|a| free(a)) {
            return Some((cox, CoxSource::Roster));
        }
        let idx = crew.iter().position(|a| a.can_cox)?;
        Some((crew.remove(idx), CoxSource::BorrowedFromCrew))
    }

    /// Clears all lineups and assigns every event some athlete prefers.
    ///
    /// Events that fail (unknown, unparseable, no eligible athletes) are
    /// reported in `issues` and do not stop the batch.
    pub fn assign_preferred_events(&self) -> AutoAssignReport {
        let mut report = AutoAssignReport::default();
        if self.roster.is_empty() {
            report.issues.push("No athletes to assign".into());
            return report;
        }

        let mut interest: BTreeMap<EventNumber, Vec<&Athlete>> = BTreeMap::new();
        for athlete in self.roster {
            for &event in &athlete.preferred_events {
                let pool = interest.entry(event).or_default();
                if !pool.iter().any(|a| a.id == athlete.id) {
                    pool.push(athlete);
                }
            }
        }

        for (event, pool) in interest {
            match self.assign_event(event, &pool) {
                Ok(CrewOutcome::Assigned(assignment)) => {
                    report.assignments_made += 1;
                    report.selected.insert(event);
                    report.lineups.insert(event, assignment.lineup);
                }
                Ok(gap @ CrewOutcome::EligibilityGap { .. }) => {
                    report.issues.push(format!("Event {}: {}", event, gap.message()));
                }
                Err(e) => {
                    tracing::warn!(event = %event, error = %e, "skipping event during auto-assignment");
                    report.issues.push(format!("Event {}: {}", event, e));
                }
            }
        }

        tracing::info!(
            assigned = report.assignments_made,
            issues = report.issues.len(),
            "auto-assigned preferred events"
        );
        report
    }
}

/// Even gender split for mixed events, backfilled from either gender.
fn balanced_crew<'p>(eligible: &[&'p Athlete], seats: usize, to_assign: usize) -> Vec<&'p Athlete> {
    let (men, women): (Vec<&Athlete>, Vec<&Athlete>) = eligible
        .iter()
        .copied()
        .partition(|a| a.gender == Gender::Male);
    let per_gender = seats / 2;
    let men_take = men.len().min(per_gender).min(to_assign / 2);
    let women_take = women.len().min(per_gender).min(to_assign - men_take);

    let mut crew: Vec<&Athlete> = men[..men_take].iter().chain(&women[..women_take]).copied().collect();
    let remaining = to_assign - crew.len();
    let backfill: Vec<&Athlete> = eligible
        .iter()
        .copied()
        .filter(|a| !crew.iter().any(|c| c.id == a.id))
        .take(remaining)
        .collect();
    crew.extend(backfill);
    crew
}

/// Number of `k`-subsets of `n` items, saturating.
fn combination_count(n: usize, k: usize) -> u128 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    (0..k).fold(1u128, |acc, i| {
        acc.saturating_mul((n - i) as u128) / (i as u128 + 1)
    })
}

/// Crew of `size` whose mean age is the smallest value not below `min_age`.
///
/// Enumerates combinations while there are at most [`MAX_AGE_COMBINATIONS`]
/// of them; beyond that it searches the reachable age sums instead, which
/// finds the same minimum. Ties keep the earliest crew found. Returns
/// athletes in pool order, or `None` when no crew qualifies.
pub fn youngest_qualifying_crew<'p>(
    pool: &[&'p Athlete],
    size: usize,
    min_age: u32,
) -> Option<Vec<&'p Athlete>> {
    if size == 0 || size > pool.len() {
        return None;
    }
    let ages: Vec<u64> = pool.iter().map(|a| u64::from(a.age())).collect();
    let threshold = u64::from(min_age) * size as u64;

    let chosen = if combination_count(pool.len(), size) <= MAX_AGE_COMBINATIONS {
        exhaustive_search(&ages, size, threshold)?
    } else {
        tracing::debug!(
            pool = pool.len(),
            size,
            "age search over combination limit, searching age sums"
        );
        age_sum_search(&ages, size, threshold)?
    };

    Some(chosen.into_iter().map(|i| pool[i]).collect())
}

/// Smallest qualifying sum by enumerating every `size`-subset.
fn exhaustive_search(ages: &[u64], size: usize, threshold: u64) -> Option<Vec<usize>> {
    let mut best: Option<(u64, Vec<usize>)> = None;
    for combo in (0..ages.len()).combinations(size) {
        let sum: u64 = combo.iter().map(|&i| ages[i]).sum();
        if sum >= threshold && best.as_ref().map_or(true, |(b, _)| sum < *b) {
            best = Some((sum, combo));
        }
    }
    best.map(|(_, combo)| combo)
}

/// Smallest qualifying sum by tracking, per crew size, one crew for every
/// reachable age sum.
fn age_sum_search(ages: &[u64], size: usize, threshold: u64) -> Option<Vec<usize>> {
    let mut reachable: Vec<BTreeMap<u64, Vec<usize>>> = vec![BTreeMap::new(); size + 1];
    reachable[0].insert(0, Vec::new());
    for (i, &age) in ages.iter().enumerate() {
        for count in (1..=size.min(i + 1)).rev() {
            let extended: Vec<(u64, Vec<usize>)> = reachable[count - 1]
                .iter()
                .map(|(sum, crew)| {
                    let mut crew = crew.clone();
                    crew.push(i);
                    (sum + age, crew)
                })
                .collect();
            for (sum, crew) in extended {
                reachable[count].entry(sum).or_insert(crew);
            }
        }
    }
    reachable[size]
        .range(threshold..)
        .next()
        .map(|(_, crew)| crew.clone())
}
