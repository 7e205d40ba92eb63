//! Session snapshots.
//!
//! A snapshot is one JSON document holding parameters, roster, fleet,
//! lineups, boat assignments, the selected events and the planner's
//! annotations. Lineup seats and boat assignments are stored as references
//! that carry the surrogate id when known plus the identity triple
//! (name, gender, age) or pair (name, boat type), so documents written
//! before ids existed still load.
//!
//! Loading is all-or-nothing for document-level problems (bad JSON,
//! unknown version, bad event key, invalid parameters). A reference that
//! cannot be placed is not an error: the slot loads empty and the
//! [`LoadReport`] records why.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::config::RegattaParameters;
use crate::error::LoadFormatError;
use crate::models::{
    Athlete, AthleteId, AthleteKey, Boat, BoatId, BoatKey, EventNumber, Fleet, Gender, Lineup,
    Roster,
};
use crate::requirements::EventRequirements;
use crate::session::{PlanningState, RegattaSession};

/// Version written by [`save_json`].
pub const SNAPSHOT_VERSION: &str = "1.1";
/// Versions [`load_json`] understands.
pub const SUPPORTED_VERSIONS: [&str; 2] = ["1.0", "1.1"];

/// Reference to a rostered athlete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthleteRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AthleteId>,
    pub name: String,
    pub gender: Gender,
    pub age: u32,
}

impl AthleteRef {
    pub fn key(&self) -> AthleteKey {
        AthleteKey {
            name: self.name.clone(),
            gender: self.gender,
            age: self.age,
        }
    }
}

impl From<&Athlete> for AthleteRef {
    fn from(a: &Athlete) -> Self {
        Self {
            id: Some(a.id),
            name: a.name.clone(),
            gender: a.gender,
            age: a.age(),
        }
    }
}

/// Reference to a fleet boat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoatRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<BoatId>,
    pub name: String,
    pub boat_type: String,
}

impl BoatRef {
    pub fn key(&self) -> BoatKey {
        BoatKey {
            name: self.name.clone(),
            boat_type: self.boat_type.clone(),
        }
    }
}

impl From<&Boat> for BoatRef {
    fn from(b: &Boat) -> Self {
        Self {
            id: Some(b.id),
            name: b.name.clone(),
            boat_type: b.boat_type.clone(),
        }
    }
}

/// A lineup as stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineupRecord {
    #[serde(default)]
    pub athletes: Vec<Option<AthleteRef>>,
    #[serde(default)]
    pub coxswain: Option<AthleteRef>,
}

/// The persisted document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotDocument {
    pub version: String,
    #[serde(default)]
    pub saved_at: Option<String>,
    #[serde(default)]
    pub parameters: RegattaParameters,
    #[serde(default)]
    pub athletes: Vec<Athlete>,
    /// Keyed by event number as a string.
    #[serde(default)]
    pub lineups: BTreeMap<String, LineupRecord>,
    #[serde(default)]
    pub boats: Vec<Boat>,
    #[serde(default)]
    pub boat_assignments: BTreeMap<String, BoatRef>,
    /// Absent in older documents; then every lineup event counts as selected.
    #[serde(default)]
    pub selected_events: Option<Vec<EventNumber>>,
    #[serde(default)]
    pub event_statuses: BTreeMap<String, String>,
    #[serde(default)]
    pub notes: String,
}

/// Where an unresolved reference was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceSlot {
    Seat(usize),
    Coxswain,
    Boat,
}

/// Why a stored reference was not loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissReason {
    /// Matched no athlete or boat.
    #[default]
    NoMatch,
    /// The athlete already holds an earlier slot in the same lineup.
    Repeated,
    /// Stored past the event's seat count.
    BeyondSeats { seats: u32 },
}

/// A stored reference that was not loaded. The slot was loaded empty, or
/// dropped when it lay past the event's seats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityResolutionMiss {
    pub event: EventNumber,
    pub slot: ReferenceSlot,
    /// Display form of the reference, e.g. `"Ann (F, 44)"`.
    pub reference: String,
    #[serde(default)]
    pub reason: MissReason,
}

impl fmt::Display for IdentityResolutionMiss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = match self.slot {
            ReferenceSlot::Seat(i) => format!("seat {}", i + 1),
            ReferenceSlot::Coxswain => "coxswain".to_string(),
            ReferenceSlot::Boat => "boat".to_string(),
        };
        match self.reason {
            MissReason::NoMatch => {
                write!(f, "Event {} {}: no match for {}", self.event, slot, self.reference)
            }
            MissReason::Repeated => write!(
                f,
                "Event {} {}: {} already seated in this lineup",
                self.event, slot, self.reference
            ),
            MissReason::BeyondSeats { seats } => write!(
                f,
                "Event {} {}: {} dropped, the event has {} seats",
                self.event, slot, self.reference, seats
            ),
        }
    }
}

/// Summary of a successful load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadReport {
    pub version: String,
    pub saved_at: Option<String>,
    pub athletes: usize,
    pub boats: usize,
    pub lineups: usize,
    pub selected_events: usize,
    pub misses: Vec<IdentityResolutionMiss>,
}

impl LoadReport {
    /// One-line summary.
    pub fn message(&self) -> String {
        format!(
            "Loaded {} athletes, {} boats, {} lineups, and {} selected events",
            self.athletes, self.boats, self.lineups, self.selected_events
        )
    }
}

/// Builds the document for a session.
pub fn to_document(session: &RegattaSession) -> SnapshotDocument {
    let roster = session.roster();
    let resolve = |id: AthleteId| roster.get(id).map(AthleteRef::from);
    let lineups = session
        .lineups()
        .iter()
        .map(|(event, lineup)| {
            let record = LineupRecord {
                athletes: lineup.rowers().iter().map(|r| r.and_then(resolve)).collect(),
                coxswain: lineup.coxswain().and_then(resolve),
            };
            (event.to_string(), record)
        })
        .collect();
    let boat_assignments = session
        .boat_assignments()
        .iter()
        .filter_map(|(event, id)| {
            session
                .fleet()
                .get(*id)
                .map(|b| (event.to_string(), BoatRef::from(b)))
        })
        .collect();

    SnapshotDocument {
        version: SNAPSHOT_VERSION.to_string(),
        saved_at: Some(chrono::Local::now().to_rfc3339()),
        parameters: session.params().clone(),
        athletes: roster.iter().cloned().collect(),
        lineups,
        boats: session.fleet().iter().cloned().collect(),
        boat_assignments,
        selected_events: Some(session.selected_events().iter().copied().collect()),
        event_statuses: session.event_statuses.clone(),
        notes: session.notes.clone(),
    }
}

/// Serializes a session as pretty-printed JSON.
pub fn save_json(session: &RegattaSession) -> Result<String, serde_json::Error> {
    let doc = to_document(session);
    tracing::debug!(
        athletes = doc.athletes.len(),
        lineups = doc.lineups.len(),
        "saving snapshot"
    );
    serde_json::to_string_pretty(&doc)
}

/// Replaces the session's planning state with a JSON snapshot.
///
/// The catalog and entry history are kept. On error the session is left
/// untouched.
pub fn load_json(session: &mut RegattaSession, json: &str) -> Result<LoadReport, LoadFormatError> {
    let doc: SnapshotDocument = serde_json::from_str(json)?;
    restore(session, doc)
}

/// Replaces the session's planning state with a parsed document.
pub fn restore(
    session: &mut RegattaSession,
    doc: SnapshotDocument,
) -> Result<LoadReport, LoadFormatError> {
    if !SUPPORTED_VERSIONS.contains(&doc.version.as_str()) {
        return Err(LoadFormatError::UnsupportedVersion(doc.version));
    }
    doc.parameters
        .validate()
        .map_err(|e| LoadFormatError::InvalidParameters(e.to_string()))?;

    let roster: Roster = doc.athletes.into_iter().collect();
    let fleet: Fleet = doc.boats.into_iter().collect();
    let mut misses = Vec::new();

    let mut lineups = BTreeMap::new();
    for (key, record) in &doc.lineups {
        let event = parse_event_key(key)?;
        let seats = session
            .catalog()
            .event_name(event)
            .and_then(|name| EventRequirements::parse(name).ok())
            .map_or(record.athletes.len() as u32, |req| req.num_rowers);

        let mut slots: Vec<Option<AthleteId>> = Vec::with_capacity(seats as usize);
        for (seat, r) in record.athletes.iter().enumerate() {
            let Some(r) = r else {
                slots.push(None);
                continue;
            };
            let slot = ReferenceSlot::Seat(seat);
            if seat >= seats as usize {
                let reason = MissReason::BeyondSeats { seats };
                record_miss(&mut misses, event, slot, r.key().to_string(), reason);
                continue;
            }
            match resolve_athlete(&roster, r, event, slot, &mut misses) {
                Some(id) if slots.contains(&Some(id)) => {
                    record_miss(&mut misses, event, slot, r.key().to_string(), MissReason::Repeated);
                    slots.push(None);
                }
                found => slots.push(found),
            }
        }
        let coxswain = match record.coxswain.as_ref() {
            Some(r) => match resolve_athlete(&roster, r, event, ReferenceSlot::Coxswain, &mut misses) {
                Some(id) if slots.contains(&Some(id)) => {
                    let reference = r.key().to_string();
                    record_miss(&mut misses, event, ReferenceSlot::Coxswain, reference, MissReason::Repeated);
                    None
                }
                found => found,
            },
            None => None,
        };

        let lineup = Lineup::from_slots(seats, slots).with_coxswain(coxswain);
        lineups.insert(event, lineup);
    }

    let mut boat_assignments = BTreeMap::new();
    for (key, r) in &doc.boat_assignments {
        let event = parse_event_key(key)?;
        let found = r
            .id
            .and_then(|id| fleet.get(id))
            .or_else(|| fleet.find_by_key(&r.key()));
        match found {
            Some(boat) => {
                boat_assignments.insert(event, boat.id);
            }
            None => record_miss(
                &mut misses,
                event,
                ReferenceSlot::Boat,
                format!("{} ({})", r.name, r.boat_type),
                MissReason::NoMatch,
            ),
        }
    }

    let selected_events: BTreeSet<EventNumber> = match doc.selected_events {
        Some(list) => list.into_iter().collect(),
        None => lineups.keys().copied().collect(),
    };

    let report = LoadReport {
        version: doc.version,
        saved_at: doc.saved_at,
        athletes: roster.len(),
        boats: fleet.len(),
        lineups: lineups.len(),
        selected_events: selected_events.len(),
        misses,
    };

    session.replace_state(PlanningState {
        params: doc.parameters,
        roster,
        fleet,
        lineups,
        boat_assignments,
        selected_events,
        event_statuses: doc.event_statuses,
        notes: doc.notes,
    });
    tracing::info!(
        athletes = report.athletes,
        boats = report.boats,
        lineups = report.lineups,
        misses = report.misses.len(),
        "snapshot loaded"
    );
    Ok(report)
}

fn parse_event_key(key: &str) -> Result<EventNumber, LoadFormatError> {
    key.trim()
        .parse::<u32>()
        .map(EventNumber)
        .map_err(|_| LoadFormatError::InvalidEventKey(key.to_string()))
}

/// By id first, then by identity triple.
fn resolve_athlete(
    roster: &Roster,
    r: &AthleteRef,
    event: EventNumber,
    slot: ReferenceSlot,
    misses: &mut Vec<IdentityResolutionMiss>,
) -> Option<AthleteId> {
    let found = r
        .id
        .and_then(|id| roster.get(id))
        .or_else(|| roster.find_by_key(&r.key()))
        .map(|a| a.id);
    if found.is_none() {
        record_miss(misses, event, slot, r.key().to_string(), MissReason::NoMatch);
    }
    found
}

fn record_miss(
    misses: &mut Vec<IdentityResolutionMiss>,
    event: EventNumber,
    slot: ReferenceSlot,
    reference: String,
    reason: MissReason,
) {
    let miss = IdentityResolutionMiss {
        event,
        slot,
        reference,
        reason,
    };
    tracing::warn!(event = %event, "{}", miss);
    misses.push(miss);
}
