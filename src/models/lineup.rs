//! Event lineup model.
//!
//! A lineup holds one slot per rowing seat plus an optional coxswain slot.
//! Slots hold athlete ids rather than athletes, so deleting an athlete from
//! the roster leaves a stale id that resolves to an empty seat.

use serde::{Deserialize, Serialize};

use super::AthleteId;
use crate::error::LineupEditError;

/// Seats and coxswain for one event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lineup {
    rowers: Vec<Option<AthleteId>>,
    coxswain: Option<AthleteId>,
}

impl Lineup {
    /// Creates an empty lineup with `num_rowers` seats.
    pub fn new(num_rowers: u32) -> Self {
        Self {
            rowers: vec![None; num_rowers as usize],
            coxswain: None,
        }
    }

    /// Creates a lineup from a crew in seat order, padded or truncated to
    /// `num_rowers` seats. A coxswain who also rows is dropped.
    pub fn from_crew(
        num_rowers: u32,
        crew: impl IntoIterator<Item = AthleteId>,
        coxswain: Option<AthleteId>,
    ) -> Self {
        Self::from_slots(num_rowers, crew.into_iter().map(Some)).with_coxswain(coxswain)
    }

    /// Sets the coxswain, dropping one who already rows in this lineup.
    pub fn with_coxswain(mut self, coxswain: Option<AthleteId>) -> Self {
        self.coxswain = coxswain.filter(|id| !self.rowers.contains(&Some(*id)));
        self
    }

    /// Creates a lineup from explicit slots (empty seats included).
    ///
    /// An athlete listed twice keeps the first seat; later ones are left
    /// empty.
    pub fn from_slots(num_rowers: u32, slots: impl IntoIterator<Item = Option<AthleteId>>) -> Self {
        let mut rowers: Vec<Option<AthleteId>> = Vec::new();
        for slot in slots {
            let repeated = slot.is_some_and(|id| rowers.contains(&Some(id)));
            rowers.push(if repeated { None } else { slot });
        }
        let mut lineup = Self {
            rowers,
            coxswain: None,
        };
        lineup.resize(num_rowers);
        lineup
    }

    /// Rower slots in seat order (bow first).
    pub fn rowers(&self) -> &[Option<AthleteId>] {
        &self.rowers
    }

    pub fn coxswain(&self) -> Option<AthleteId> {
        self.coxswain
    }

    /// Number of rower seats.
    pub fn seat_count(&self) -> usize {
        self.rowers.len()
    }

    /// Occupied rower seats, in seat order.
    pub fn filled_rowers(&self) -> impl Iterator<Item = AthleteId> + '_ {
        self.rowers.iter().flatten().copied()
    }

    pub fn filled_count(&self) -> usize {
        self.rowers.iter().filter(|s| s.is_some()).count()
    }

    /// Everyone in the boat: rowers then coxswain.
    pub fn occupants(&self) -> impl Iterator<Item = AthleteId> + '_ {
        self.filled_rowers().chain(self.coxswain)
    }

    /// Whether `id` holds any seat (rower or cox).
    pub fn contains(&self, id: AthleteId) -> bool {
        self.occupants().any(|a| a == id)
    }

    /// Whether no seat is occupied.
    pub fn is_empty(&self) -> bool {
        self.coxswain.is_none() && self.filled_count() == 0
    }

    /// Puts an athlete into (or, with `None`, clears) a rower seat.
    ///
    /// Fails if the athlete already holds another seat in this lineup.
    pub fn set_rower(&mut self, seat: usize, athlete: Option<AthleteId>) -> Result<(), LineupEditError> {
        let seats = self.rowers.len();
        if seat >= seats {
            return Err(LineupEditError::SeatOutOfRange { seat, seats });
        }
        if let Some(id) = athlete {
            let elsewhere = self.coxswain == Some(id)
                || self
                    .rowers
                    .iter()
                    .enumerate()
                    .any(|(i, s)| i != seat && *s == Some(id));
            if elsewhere {
                return Err(LineupEditError::AlreadyInLineup(id));
            }
        }
        self.rowers[seat] = athlete;
        Ok(())
    }

    /// Sets (or clears) the coxswain.
    ///
    /// Fails if the athlete already rows in this lineup.
    pub fn set_coxswain(&mut self, athlete: Option<AthleteId>) -> Result<(), LineupEditError> {
        if let Some(id) = athlete {
            if self.rowers.contains(&Some(id)) {
                return Err(LineupEditError::AlreadyInLineup(id));
            }
        }
        self.coxswain = athlete;
        Ok(())
    }

    /// Empties every seat, keeping the seat count.
    pub fn clear(&mut self) {
        self.rowers.iter_mut().for_each(|s| *s = None);
        self.coxswain = None;
    }

    /// Pads with empty seats or truncates to `num_rowers` seats.
    pub fn resize(&mut self, num_rowers: u32) {
        self.rowers.resize(num_rowers as usize, None);
    }

    /// Removes an athlete from every seat. Returns whether anything changed.
    pub fn remove_athlete(&mut self, id: AthleteId) -> bool {
        let mut removed = false;
        for slot in self.rowers.iter_mut().filter(|s| **s == Some(id)) {
            *slot = None;
            removed = true;
        }
        if self.coxswain == Some(id) {
            self.coxswain = None;
            removed = true;
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_empty_seats() {
        let l = Lineup::new(4);
        assert_eq!(l.seat_count(), 4);
        assert_eq!(l.filled_count(), 0);
        assert!(l.is_empty());
    }

    #[test]
    fn test_from_crew_pads_and_truncates() {
        let ids: Vec<AthleteId> = (0..3).map(|_| AthleteId::new()).collect();
        let padded = Lineup::from_crew(4, ids.clone(), None);
        assert_eq!(padded.rowers(), &[Some(ids[0]), Some(ids[1]), Some(ids[2]), None]);

        let truncated = Lineup::from_crew(2, ids.clone(), Some(ids[2]));
        assert_eq!(truncated.rowers(), &[Some(ids[0]), Some(ids[1])]);
        assert_eq!(truncated.coxswain(), Some(ids[2]));
    }

    #[test]
    fn test_constructors_keep_first_seat_of_repeated_athlete() {
        let a = AthleteId::new();
        let b = AthleteId::new();
        let l = Lineup::from_slots(4, [Some(a), Some(a), None, Some(b)]);
        assert_eq!(l.rowers(), &[Some(a), None, None, Some(b)]);

        let l = Lineup::from_crew(2, [a, a, b], Some(a));
        assert_eq!(l.rowers(), &[Some(a), None]);
        assert_eq!(l.coxswain(), None);
    }

    #[test]
    fn test_duplicate_seat_rejected() {
        let a = AthleteId::new();
        let mut l = Lineup::new(2);
        l.set_rower(0, Some(a)).unwrap();
        assert_eq!(l.set_rower(1, Some(a)), Err(LineupEditError::AlreadyInLineup(a)));
        assert_eq!(l.set_coxswain(Some(a)), Err(LineupEditError::AlreadyInLineup(a)));
        // Same seat again is fine.
        l.set_rower(0, Some(a)).unwrap();
    }

    #[test]
    fn test_cox_cannot_also_row() {
        let a = AthleteId::new();
        let mut l = Lineup::new(4);
        l.set_coxswain(Some(a)).unwrap();
        assert!(l.set_rower(3, Some(a)).is_err());
        assert!(l.contains(a));
    }

    #[test]
    fn test_seat_out_of_range() {
        let mut l = Lineup::new(1);
        assert_eq!(
            l.set_rower(1, Some(AthleteId::new())),
            Err(LineupEditError::SeatOutOfRange { seat: 1, seats: 1 })
        );
    }

    #[test]
    fn test_remove_athlete_and_clear() {
        let a = AthleteId::new();
        let b = AthleteId::new();
        let mut l = Lineup::from_crew(2, [a, b], None);
        assert!(l.remove_athlete(a));
        assert!(!l.remove_athlete(a));
        assert_eq!(l.rowers(), &[None, Some(b)]);
        l.clear();
        assert!(l.is_empty());
        assert_eq!(l.seat_count(), 2);
    }

    #[test]
    fn test_occupants_include_cox() {
        let a = AthleteId::new();
        let c = AthleteId::new();
        let l = Lineup::from_crew(4, [a], Some(c));
        assert_eq!(l.occupants().collect::<Vec<_>>(), vec![a, c]);
    }
}
