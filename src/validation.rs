//! Lineup validation.
//!
//! Checks a lineup against its event and the rest of the regatta. Detects:
//! - Empty rower seats and a missing coxswain
//! - Unequal men and women in mixed events
//! - Too few port or starboard rowers in sweep boats
//! - Crew average age below the event's category minimum
//! - Athletes racing another event too close in time
//!
//! Validation never fails. It returns zero or more advisory issues.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::models::{Athlete, AthleteId, EventNumber, Gender, Lineup, Roster};
use crate::requirements::{EventRequirements, GenderRequirement};
use crate::timing::{EventTimeCalculator, RaceSession};

/// An advisory lineup issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineupIssue {
    /// Issue category.
    pub kind: LineupIssueKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of lineup issues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineupIssueKind {
    /// Rower seats left empty.
    MissingRowers { count: usize },
    /// Coxed boat without a coxswain.
    MissingCoxswain,
    /// Mixed crew with unequal men and women.
    GenderImbalance { men: usize, women: usize },
    /// Not enough rowers for one sweep side.
    SideImbalance { port: bool },
    /// Crew average age below the category minimum.
    UnderAge { minimum: u32 },
    /// Athlete races other events within the minimum gap.
    TimeConflict {
        athlete: AthleteId,
        event: EventNumber,
        others: Vec<EventNumber>,
    },
}

impl LineupIssue {
    fn new(kind: LineupIssueKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for LineupIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates lineups against event requirements and the regatta schedule.
#[derive(Debug, Clone, Copy)]
pub struct LineupValidator<'a> {
    calc: &'a EventTimeCalculator<'a>,
    roster: &'a Roster,
}

impl<'a> LineupValidator<'a> {
    pub fn new(calc: &'a EventTimeCalculator<'a>, roster: &'a Roster) -> Self {
        Self { calc, roster }
    }

    /// Validates one lineup.
    ///
    /// Checks:
    /// 1. Every rower seat is filled and a required coxswain is present
    /// 2. Mixed crews have equal men and women (coxswain excluded)
    /// 3. Sweep crews of two or more cover `seats / 2` on each side
    /// 4. Mean rower age meets the category minimum
    /// 5. No occupant races another lineup within `min_gap_minutes`
    ///
    /// Seats holding ids no longer on the roster count as empty.
    pub fn validate(
        &self,
        event: EventNumber,
        lineup: &Lineup,
        requirements: &EventRequirements,
        all_lineups: &BTreeMap<EventNumber, Lineup>,
    ) -> Vec<LineupIssue> {
        let mut issues = Vec::new();
        let rowers: Vec<&Athlete> = lineup
            .filled_rowers()
            .filter_map(|id| self.roster.get(id))
            .collect();
        let cox = lineup.coxswain().and_then(|id| self.roster.get(id));

        // Completeness
        let required = requirements.num_rowers as usize;
        if rowers.len() < required {
            let count = required - rowers.len();
            issues.push(LineupIssue::new(
                LineupIssueKind::MissingRowers { count },
                format!("Need {} more rowers", count),
            ));
        }
        if requirements.has_cox && cox.is_none() {
            issues.push(LineupIssue::new(
                LineupIssueKind::MissingCoxswain,
                "Need a coxswain",
            ));
        }

        // Gender balance
        if requirements.gender_req == GenderRequirement::Mixed && !rowers.is_empty() {
            let men = rowers.iter().filter(|a| a.gender == Gender::Male).count();
            let women = rowers.len() - men;
            if men != women {
                issues.push(LineupIssue::new(
                    LineupIssueKind::GenderImbalance { men, women },
                    format!(
                        "Mixed event needs equal men and women (currently {}M, {}F)",
                        men, women
                    ),
                ));
            }
        }

        // Sweep sides: dual-side rowers count toward both.
        if requirements.is_sweep() && rowers.len() > 1 {
            let needed = required / 2;
            let port = rowers.iter().filter(|a| a.can_port).count();
            let starboard = rowers.iter().filter(|a| a.can_starboard).count();
            if port < needed {
                issues.push(LineupIssue::new(
                    LineupIssueKind::SideImbalance { port: true },
                    "Not enough port-side rowers available",
                ));
            }
            if starboard < needed {
                issues.push(LineupIssue::new(
                    LineupIssueKind::SideImbalance { port: false },
                    "Not enough starboard-side rowers available",
                ));
            }
        }

        // Age
        if let Some(minimum) = requirements.minimum_age().filter(|_| !rowers.is_empty()) {
            let avg = rowers.iter().map(|a| f64::from(a.age())).sum::<f64>() / rowers.len() as f64;
            if avg < f64::from(minimum) {
                issues.push(LineupIssue::new(
                    LineupIssueKind::UnderAge { minimum },
                    format!(
                        "Average age {:.1} is below minimum {} for this category",
                        avg, minimum
                    ),
                ));
            }
        }

        // Time conflicts
        for athlete in rowers.iter().copied().chain(cox) {
            let others: Vec<EventNumber> = all_lineups
                .iter()
                .filter(|(other, l)| {
                    **other != event
                        && l.contains(athlete.id)
                        && self.calc.conflicts(event, **other, RaceSession::Morning)
                })
                .map(|(other, _)| *other)
                .collect();
            if others.is_empty() {
                continue;
            }
            let names: Vec<String> = others
                .iter()
                .filter_map(|e| {
                    self.calc
                        .catalog()
                        .event_name(*e)
                        .map(|name| format!("Event {}: {}", e, name))
                })
                .collect();
            issues.push(LineupIssue::new(
                LineupIssueKind::TimeConflict {
                    athlete: athlete.id,
                    event,
                    others,
                },
                format!("{} has time conflicts with: {}", athlete.name, names.join(", ")),
            ));
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RegattaParameters;
    use crate::models::{EntryHistory, Event, EventCatalog, RaceDay};

    fn catalog() -> EventCatalog {
        // Spacing 4: 1 @ 08:00, 2 @ 08:04, 3 @ 08:08, ..., 6 @ 08:20, 10 @ 08:36
        EventCatalog::new().with_day(
            RaceDay::Thursday,
            (1..=10u32)
                .map(|i| {
                    let name = match i {
                        1 => "Men's Open C 4+".to_string(),
                        2 => "Mixed D 2x".to_string(),
                        3 => "Men's Masters 2-".to_string(),
                        _ => format!("Men's Masters {i} 1x"),
                    };
                    Event::new(i, name)
                })
                .collect(),
        )
    }

    struct Fixture {
        catalog: EventCatalog,
        history: EntryHistory,
        params: RegattaParameters,
    }

    fn fixture() -> Fixture {
        Fixture {
            catalog: catalog(),
            history: EntryHistory::new(),
            params: RegattaParameters::default().with_spacing(4).with_min_gap(30),
        }
    }

    fn kinds(issues: &[LineupIssue]) -> Vec<&LineupIssueKind> {
        issues.iter().map(|i| &i.kind).collect()
    }

    #[test]
    fn test_complete_lineup_has_no_issues() {
        let f = fixture();
        let calc = EventTimeCalculator::new(&f.catalog, &f.history, &f.params);
        let roster: Roster = (0..5).map(|i| Athlete::new(format!("R{i}"), Gender::Male, 45)).collect();
        let ids: Vec<AthleteId> = roster.iter().map(|a| a.id).collect();
        let lineup = Lineup::from_crew(4, ids[..4].iter().copied(), Some(ids[4]));
        let req = EventRequirements::parse("Men's Open C 4+").unwrap();
        let v = LineupValidator::new(&calc, &roster);
        assert!(v.validate(EventNumber(1), &lineup, &req, &BTreeMap::new()).is_empty());
    }

    #[test]
    fn test_missing_rowers_and_cox() {
        let f = fixture();
        let calc = EventTimeCalculator::new(&f.catalog, &f.history, &f.params);
        let roster: Roster = [Athlete::new("Solo", Gender::Male, 45)].into_iter().collect();
        let id = roster.iter().next().unwrap().id;
        let lineup = Lineup::from_crew(4, [id], None);
        let req = EventRequirements::parse("Men's Open C 4+").unwrap();
        let issues = LineupValidator::new(&calc, &roster).validate(EventNumber(1), &lineup, &req, &BTreeMap::new());
        assert_eq!(issues[0].message, "Need 3 more rowers");
        assert_eq!(issues[1].message, "Need a coxswain");
        assert_eq!(issues.len(), 2);
    }

    #[test]
    fn test_stale_ids_count_as_empty() {
        let f = fixture();
        let calc = EventTimeCalculator::new(&f.catalog, &f.history, &f.params);
        let roster = Roster::new();
        let lineup = Lineup::from_crew(2, [AthleteId::new(), AthleteId::new()], None);
        let req = EventRequirements::parse("Men's Masters 2-").unwrap();
        let issues = LineupValidator::new(&calc, &roster).validate(EventNumber(3), &lineup, &req, &BTreeMap::new());
        assert_eq!(kinds(&issues), vec![&LineupIssueKind::MissingRowers { count: 2 }]);
    }

    #[test]
    fn test_mixed_gender_imbalance() {
        let f = fixture();
        let calc = EventTimeCalculator::new(&f.catalog, &f.history, &f.params);
        let roster: Roster = [
            Athlete::new("M1", Gender::Male, 52),
            Athlete::new("M2", Gender::Male, 52),
        ]
        .into_iter()
        .collect();
        let ids: Vec<AthleteId> = roster.iter().map(|a| a.id).collect();
        let lineup = Lineup::from_crew(2, ids, None);
        let req = EventRequirements::parse("Mixed D 2x").unwrap();
        let issues = LineupValidator::new(&calc, &roster).validate(EventNumber(2), &lineup, &req, &BTreeMap::new());
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].message,
            "Mixed event needs equal men and women (currently 2M, 0F)"
        );
    }

    #[test]
    fn test_sweep_side_coverage() {
        let f = fixture();
        let calc = EventTimeCalculator::new(&f.catalog, &f.history, &f.params);
        let roster: Roster = [
            Athlete::new("P1", Gender::Male, 45).with_sides(true, false),
            Athlete::new("P2", Gender::Male, 45).with_sides(true, false),
            Athlete::new("B1", Gender::Male, 45),
            Athlete::new("P3", Gender::Male, 45).with_sides(true, false),
            Athlete::new("Cox", Gender::Female, 45).with_cox(true),
        ]
        .into_iter()
        .collect();
        let ids: Vec<AthleteId> = roster.iter().map(|a| a.id).collect();
        let lineup = Lineup::from_crew(4, ids[..4].iter().copied(), Some(ids[4]));
        let req = EventRequirements::parse("Men's Open C 4+").unwrap();
        let issues = LineupValidator::new(&calc, &roster).validate(EventNumber(1), &lineup, &req, &BTreeMap::new());
        // Starboard: only B1.
        assert_eq!(kinds(&issues), vec![&LineupIssueKind::SideImbalance { port: false }]);
        assert_eq!(issues[0].message, "Not enough starboard-side rowers available");
    }

    #[test]
    fn test_underage_crew() {
        let f = fixture();
        let calc = EventTimeCalculator::new(&f.catalog, &f.history, &f.params);
        let roster: Roster = [
            Athlete::new("Y", Gender::Male, 27),
            Athlete::new("O", Gender::Female, 70),
        ]
        .into_iter()
        .collect();
        let ids: Vec<AthleteId> = roster.iter().map(|a| a.id).collect();
        let lineup = Lineup::from_crew(2, ids, None);
        let req = EventRequirements::parse("Mixed D 2x").unwrap();
        let issues = LineupValidator::new(&calc, &roster).validate(EventNumber(2), &lineup, &req, &BTreeMap::new());
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].message,
            "Average age 48.5 is below minimum 50 for this category"
        );
    }

    #[test]
    fn test_time_conflict_names_both_events() {
        let f = fixture();
        let calc = EventTimeCalculator::new(&f.catalog, &f.history, &f.params);
        let roster: Roster = [Athlete::new("Pat", Gender::Male, 45)].into_iter().collect();
        let pat = roster.iter().next().unwrap().id;
        let req = EventRequirements::parse("Men's Masters 5 1x").unwrap();

        // Event 5 @ 08:16, event 10 @ 08:36: 20 minutes apart.
        let near = Lineup::from_crew(1, [pat], None);
        let all = BTreeMap::from([(EventNumber(5), near.clone()), (EventNumber(10), near.clone())]);
        let issues = LineupValidator::new(&calc, &roster).validate(EventNumber(5), &near, &req, &all);
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].kind,
            LineupIssueKind::TimeConflict {
                athlete: pat,
                event: EventNumber(5),
                others: vec![EventNumber(10)],
            }
        );
        assert_eq!(
            issues[0].message,
            "Pat has time conflicts with: Event 10: Men's Masters 10 1x"
        );
    }

    #[test]
    fn test_no_conflict_beyond_min_gap() {
        let f = fixture();
        let calc = EventTimeCalculator::new(&f.catalog, &f.history, &f.params);
        let roster: Roster = [Athlete::new("Pat", Gender::Male, 45)].into_iter().collect();
        let pat = roster.iter().next().unwrap().id;
        let req = EventRequirements::parse("Men's Masters 1x").unwrap();
        let l = Lineup::from_crew(1, [pat], None);
        // Event 1 @ 08:00 and event 10 @ 08:36.
        let all = BTreeMap::from([(EventNumber(1), l.clone()), (EventNumber(10), l.clone())]);
        let issues = LineupValidator::new(&calc, &roster).validate(EventNumber(10), &l, &req, &all);
        assert!(issues.is_empty());
    }
}
