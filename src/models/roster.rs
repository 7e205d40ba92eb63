//! Roster and fleet collections.
//!
//! Ordered collections keyed by surrogate id. Order is insertion order and
//! matters: crew and boat selection break ties by roster/fleet position.

use serde::{Deserialize, Serialize};

use super::{Athlete, AthleteId, AthleteKey, Boat, BoatId, BoatKey};

/// The athlete roster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    athletes: Vec<Athlete>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an athlete, returning its id.
    pub fn add(&mut self, athlete: Athlete) -> AthleteId {
        let id = athlete.id;
        self.athletes.push(athlete);
        id
    }

    /// Looks up an athlete by id. Stale ids resolve to `None`.
    pub fn get(&self, id: AthleteId) -> Option<&Athlete> {
        self.athletes.iter().find(|a| a.id == id)
    }

    pub fn get_mut(&mut self, id: AthleteId) -> Option<&mut Athlete> {
        self.athletes.iter_mut().find(|a| a.id == id)
    }

    /// First athlete matching an identity triple.
    pub fn find_by_key(&self, key: &AthleteKey) -> Option<&Athlete> {
        self.athletes.iter().find(|a| a.matches_key(key))
    }

    /// Removes an athlete. Lineup references are left in place.
    pub fn remove(&mut self, id: AthleteId) -> Option<Athlete> {
        let idx = self.athletes.iter().position(|a| a.id == id)?;
        Some(self.athletes.remove(idx))
    }

    pub fn clear(&mut self) {
        self.athletes.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Athlete> {
        self.athletes.iter()
    }

    pub fn len(&self) -> usize {
        self.athletes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.athletes.is_empty()
    }
}

impl FromIterator<Athlete> for Roster {
    fn from_iter<T: IntoIterator<Item = Athlete>>(iter: T) -> Self {
        Self {
            athletes: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Athlete;
    type IntoIter = std::slice::Iter<'a, Athlete>;

    fn into_iter(self) -> Self::IntoIter {
        self.athletes.iter()
    }
}

/// The boat fleet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fleet {
    boats: Vec<Boat>,
}

impl Fleet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a boat, returning its id.
    pub fn add(&mut self, boat: Boat) -> BoatId {
        let id = boat.id;
        self.boats.push(boat);
        id
    }

    pub fn get(&self, id: BoatId) -> Option<&Boat> {
        self.boats.iter().find(|b| b.id == id)
    }

    pub fn get_mut(&mut self, id: BoatId) -> Option<&mut Boat> {
        self.boats.iter_mut().find(|b| b.id == id)
    }

    /// First boat matching an identity pair.
    pub fn find_by_key(&self, key: &BoatKey) -> Option<&Boat> {
        self.boats.iter().find(|b| b.matches_key(key))
    }

    pub fn remove(&mut self, id: BoatId) -> Option<Boat> {
        let idx = self.boats.iter().position(|b| b.id == id)?;
        Some(self.boats.remove(idx))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Boat> {
        self.boats.iter()
    }

    pub fn len(&self) -> usize {
        self.boats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boats.is_empty()
    }
}

impl FromIterator<Boat> for Fleet {
    fn from_iter<T: IntoIterator<Item = Boat>>(iter: T) -> Self {
        Self {
            boats: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Fleet {
    type Item = &'a Boat;
    type IntoIter = std::slice::Iter<'a, Boat>;

    fn into_iter(self) -> Self::IntoIter {
        self.boats.iter()
    }
}
