//! Athlete model.
//!
//! An athlete is a rower and/or coxswain on the club roster. Each athlete
//! carries a surrogate [`AthleteId`] assigned at creation; the
//! `(name, gender, age)` triple is kept as [`AthleteKey`] for display and
//! for matching records written before ids existed.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use uuid::Uuid;

use super::{AgeCategory, EventNumber, RaceDay};
use crate::requirements::EventRequirements;

/// Stable athlete identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AthleteId(Uuid);

impl AthleteId {
    /// Generates a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wraps an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AthleteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AthleteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Athlete gender. Serialized as `"M"` / `"F"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M", alias = "Male")]
    Male,
    #[serde(rename = "F", alias = "Female")]
    Female,
}

impl Gender {
    /// Single-letter code.
    pub fn code(self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The `(name, gender, age)` identity triple.
///
/// Two distinct athletes may share a key; lookups by key return the first
/// roster match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AthleteKey {
    pub name: String,
    pub gender: Gender,
    pub age: u32,
}

impl fmt::Display for AthleteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.gender, self.age)
    }
}

/// A rostered athlete.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Athlete {
    /// Surrogate identifier.
    pub id: AthleteId,
    /// Display name.
    pub name: String,
    /// Gender.
    pub gender: Gender,
    age: u32,
    age_category: AgeCategory,
    /// Body weight in pounds.
    pub weight: f64,
    /// Can row on the port side.
    pub can_port: bool,
    /// Can row on the starboard side.
    pub can_starboard: bool,
    /// Can scull.
    pub can_scull: bool,
    /// Can cox.
    pub can_cox: bool,
    /// Events the athlete wants to race, in preference order.
    pub preferred_events: Vec<EventNumber>,
    /// Race days the athlete can attend.
    pub available_days: BTreeSet<RaceDay>,
}

impl Athlete {
    /// Creates an athlete who can row both sides and scull, cannot cox,
    /// and is available all four days.
    pub fn new(name: impl Into<String>, gender: Gender, age: u32) -> Self {
        Self {
            id: AthleteId::new(),
            name: name.into(),
            gender,
            age,
            age_category: AgeCategory::for_age(age),
            weight: 0.0,
            can_port: true,
            can_starboard: true,
            can_scull: true,
            can_cox: false,
            preferred_events: Vec::new(),
            available_days: RaceDay::ALL.into_iter().collect(),
        }
    }

    /// Replaces the generated id (used when restoring persisted records).
    pub fn with_id(mut self, id: AthleteId) -> Self {
        self.id = id;
        self
    }

    /// Sets the body weight in pounds.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Sets sweep side capability.
    pub fn with_sides(mut self, port: bool, starboard: bool) -> Self {
        self.can_port = port;
        self.can_starboard = starboard;
        self
    }

    /// Sets sculling capability.
    pub fn with_scull(mut self, can_scull: bool) -> Self {
        self.can_scull = can_scull;
        self
    }

    /// Sets coxing capability.
    pub fn with_cox(mut self, can_cox: bool) -> Self {
        self.can_cox = can_cox;
        self
    }

    /// Sets the preferred events.
    pub fn with_preferred_events<I, E>(mut self, events: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<EventNumber>,
    {
        self.preferred_events = events.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the available race days.
    pub fn with_available_days(mut self, days: impl IntoIterator<Item = RaceDay>) -> Self {
        self.available_days = days.into_iter().collect();
        self
    }

    /// Age in years.
    #[inline]
    pub fn age(&self) -> u32 {
        self.age
    }

    /// Masters category derived from the age.
    #[inline]
    pub fn age_category(&self) -> AgeCategory {
        self.age_category
    }

    /// Changes the age and re-derives the category.
    pub fn set_age(&mut self, age: u32) {
        self.age = age;
        self.age_category = AgeCategory::for_age(age);
    }

    /// Identity triple.
    pub fn key(&self) -> AthleteKey {
        AthleteKey {
            name: self.name.clone(),
            gender: self.gender,
            age: self.age,
        }
    }

    /// Whether this athlete matches an identity triple.
    pub fn matches_key(&self, key: &AthleteKey) -> bool {
        self.name == key.name && self.gender == key.gender && self.age == key.age
    }

    /// Whether the athlete attends on `day`.
    pub fn is_available_on(&self, day: RaceDay) -> bool {
        self.available_days.contains(&day)
    }

    /// Whether the athlete can row at least one sweep side.
    pub fn can_sweep(&self) -> bool {
        self.can_port || self.can_starboard
    }

    /// Whether the athlete can row the event's rig.
    pub fn can_row_rig(&self, requirements: &EventRequirements) -> bool {
        if requirements.is_sculling {
            self.can_scull
        } else {
            self.can_sweep()
        }
    }

    /// Gender and rig eligibility for a rower seat.
    ///
    /// Mixed events admit either gender. Age categories are not checked;
    /// crew age is judged on the crew average instead.
    pub fn is_eligible_rower(&self, requirements: &EventRequirements) -> bool {
        requirements.gender_req.admits(self.gender) && self.can_row_rig(requirements)
    }

    /// Full individual fit: gender, rig, and own age category within the
    /// categories the event names.
    pub fn fits_event(&self, requirements: &EventRequirements) -> bool {
        if !self.is_eligible_rower(requirements) {
            return false;
        }
        let categories = requirements.eligible_categories();
        categories.is_empty() || categories.contains(&self.age_category)
    }
}

impl<'de> Deserialize<'de> for Athlete {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            #[serde(default)]
            id: AthleteId,
            name: String,
            gender: Gender,
            age: u32,
            #[serde(default)]
            weight: f64,
            #[serde(default = "yes")]
            can_port: bool,
            #[serde(default = "yes")]
            can_starboard: bool,
            #[serde(default = "yes")]
            can_scull: bool,
            #[serde(default)]
            can_cox: bool,
            #[serde(default)]
            preferred_events: Vec<EventNumber>,
            #[serde(default = "all_days")]
            available_days: BTreeSet<RaceDay>,
        }

        fn yes() -> bool {
            true
        }

        fn all_days() -> BTreeSet<RaceDay> {
            RaceDay::ALL.into_iter().collect()
        }

        let raw = Raw::deserialize(deserializer)?;
        let mut athlete = Athlete::new(raw.name, raw.gender, raw.age)
            .with_id(raw.id)
            .with_weight(raw.weight)
            .with_sides(raw.can_port, raw.can_starboard)
            .with_scull(raw.can_scull)
            .with_cox(raw.can_cox)
            .with_available_days(raw.available_days);
        athlete.preferred_events = raw.preferred_events;
        Ok(athlete)
    }
}
