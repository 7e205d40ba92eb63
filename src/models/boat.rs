//! Boat model.
//!
//! A boat's type string follows the boat-class grammar (`"8+"`, `"1x"`,
//! `"4-"`). A slash marks a flexible rig that can be set up either way
//! (`"4-/4x"`, `"2-/2x"`). Rig and cox flags are derived from the type
//! string on demand, so editing `boat_type` never leaves them stale.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::requirements::EventRequirements;

/// Pounds outside the weight range still tolerated as a warning.
pub const WEIGHT_TOLERANCE_LBS: f64 = 20.0;

/// Stable boat identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoatId(Uuid);

impl BoatId {
    /// Generates a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wraps an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for BoatId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BoatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The `(name, boat_type)` identity pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoatKey {
    pub name: String,
    pub boat_type: String,
}

/// How a boat is rigged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoatRig {
    /// Fixed sweep rig.
    Sweep,
    /// Fixed sculling rig.
    Sculling,
    /// Can be rigged for sweep or sculling.
    Flexible,
    /// The type string names neither rig.
    Unspecified,
}

impl BoatRig {
    /// Derives the rig from a boat type string.
    pub fn from_type(boat_type: &str) -> Self {
        if boat_type.contains('/') {
            return BoatRig::Flexible;
        }
        let sculling = boat_type.contains('x');
        let sweep = boat_type.contains('-') || (boat_type.contains('+') && !sculling);
        match (sculling, sweep) {
            (true, _) => BoatRig::Sculling,
            (false, true) => BoatRig::Sweep,
            (false, false) => BoatRig::Unspecified,
        }
    }
}

/// How well a crew's average weight suits a boat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightFit {
    /// Within the rated range.
    Good,
    /// Outside the range by at most [`WEIGHT_TOLERANCE_LBS`].
    Warning,
    /// Further outside the range.
    Bad,
}

impl fmt::Display for WeightFit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WeightFit::Good => "good",
            WeightFit::Warning => "warning",
            WeightFit::Bad => "bad",
        })
    }
}

/// A boat in the club fleet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boat {
    /// Surrogate identifier.
    #[serde(default)]
    pub id: BoatId,
    /// Boat name.
    pub name: String,
    /// Type string, e.g. `"8+"` or `"4-/4x"`.
    pub boat_type: String,
    /// Rowing seats (coxswain excluded).
    pub num_seats: u32,
    /// Lightest rated crew average, pounds.
    pub min_weight: u32,
    /// Heaviest rated crew average, pounds.
    pub max_weight: u32,
    /// Builder.
    #[serde(default)]
    pub manufacturer: Option<String>,
    /// Build year.
    #[serde(default)]
    pub year: Option<i32>,
    /// Usage category ("Racing", "Training", ...).
    #[serde(default = "default_category")]
    pub category: String,
}

fn default_category() -> String {
    "Racing".to_string()
}

impl Boat {
    /// Creates a racing boat with no manufacturer or year.
    pub fn new(
        name: impl Into<String>,
        boat_type: impl Into<String>,
        num_seats: u32,
        min_weight: u32,
        max_weight: u32,
    ) -> Self {
        Self {
            id: BoatId::new(),
            name: name.into(),
            boat_type: boat_type.into(),
            num_seats,
            min_weight,
            max_weight,
            manufacturer: None,
            year: None,
            category: default_category(),
        }
    }

    /// Replaces the generated id.
    pub fn with_id(mut self, id: BoatId) -> Self {
        self.id = id;
        self
    }

    /// Sets the manufacturer.
    pub fn with_manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = Some(manufacturer.into());
        self
    }

    /// Sets the build year.
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Sets the usage category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Identity pair.
    pub fn key(&self) -> BoatKey {
        BoatKey {
            name: self.name.clone(),
            boat_type: self.boat_type.clone(),
        }
    }

    /// Whether this boat matches an identity pair.
    pub fn matches_key(&self, key: &BoatKey) -> bool {
        self.name == key.name && self.boat_type == key.boat_type
    }

    pub fn rig(&self) -> BoatRig {
        BoatRig::from_type(&self.boat_type)
    }

    /// Fixed sculling rig.
    pub fn is_sculling(&self) -> bool {
        self.rig() == BoatRig::Sculling
    }

    /// Fixed sweep rig.
    pub fn is_sweep(&self) -> bool {
        self.rig() == BoatRig::Sweep
    }

    pub fn can_be_sculling(&self) -> bool {
        matches!(self.rig(), BoatRig::Sculling | BoatRig::Flexible)
    }

    pub fn can_be_sweep(&self) -> bool {
        matches!(self.rig(), BoatRig::Sweep | BoatRig::Flexible)
    }

    /// Has a coxswain seat.
    pub fn has_cox(&self) -> bool {
        self.boat_type.contains('+')
    }

    /// Classifies a crew average weight against the rated range.
    pub fn weight_check(&self, average_weight: f64) -> WeightFit {
        let min = f64::from(self.min_weight);
        let max = f64::from(self.max_weight);
        if (min..=max).contains(&average_weight) {
            WeightFit::Good
        } else if average_weight < min - WEIGHT_TOLERANCE_LBS
            || average_weight > max + WEIGHT_TOLERANCE_LBS
        {
            WeightFit::Bad
        } else {
            WeightFit::Warning
        }
    }

    /// Seat count, cox seat and rig all suit the event.
    pub fn is_compatible_with(&self, requirements: &EventRequirements) -> bool {
        if requirements.num_rowers != self.num_seats || requirements.has_cox != self.has_cox() {
            return false;
        }
        if requirements.is_sculling {
            self.can_be_sculling()
        } else {
            self.can_be_sweep()
        }
    }

    /// Name with manufacturer and year, e.g. `"Big Red (Hudson 2019)"`.
    pub fn describe(&self) -> String {
        match (&self.manufacturer, self.year) {
            (Some(m), Some(y)) => format!("{} ({} {})", self.name, m, y),
            (Some(m), None) => format!("{} ({})", self.name, m),
            (None, Some(y)) => format!("{} ({})", self.name, y),
            (None, None) => self.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rig_derivation() {
        assert_eq!(BoatRig::from_type("8+"), BoatRig::Sweep);
        assert_eq!(BoatRig::from_type("4-"), BoatRig::Sweep);
        assert_eq!(BoatRig::from_type("1x"), BoatRig::Sculling);
        assert_eq!(BoatRig::from_type("4x+"), BoatRig::Sculling);
        assert_eq!(BoatRig::from_type("4-/4x"), BoatRig::Flexible);
        assert_eq!(BoatRig::from_type("4"), BoatRig::Unspecified);
    }

    #[test]
    fn test_flexible_flags() {
        let b = Boat::new("Henley", "4-/4x", 4, 115, 145);
        assert!(b.can_be_sculling() && b.can_be_sweep());
        assert!(!b.is_sculling() && !b.is_sweep());
        assert!(!b.has_cox());

        let coxed = Boat::new("Flex", "4+/4x+", 4, 150, 180);
        assert!(coxed.has_cox());
    }

    #[test]
    fn test_weight_check() {
        let b = Boat::new("La Oaxaca", "8+", 8, 150, 180);
        assert_eq!(b.weight_check(150.0), WeightFit::Good);
        assert_eq!(b.weight_check(180.0), WeightFit::Good);
        assert_eq!(b.weight_check(200.0), WeightFit::Warning);
        assert_eq!(b.weight_check(205.0), WeightFit::Bad);
        assert_eq!(b.weight_check(130.0), WeightFit::Warning);
        assert_eq!(b.weight_check(129.5), WeightFit::Bad);
    }

    #[test]
    fn test_compatibility() {
        let four_plus = EventRequirements::parse("Men's Open C 4+").unwrap();
        let quad = EventRequirements::parse("Women's Masters E 4x").unwrap();
        let four_minus = EventRequirements::parse("Men's Masters B 4-").unwrap();

        let coxed = Boat::new("MaeAnn", "4+", 4, 115, 145);
        let flex = Boat::new("Henley", "4-/4x", 4, 115, 145);
        let eight = Boat::new("Big Red", "8+", 8, 190, 230);

        assert!(coxed.is_compatible_with(&four_plus));
        assert!(!coxed.is_compatible_with(&quad));
        assert!(flex.is_compatible_with(&quad));
        assert!(flex.is_compatible_with(&four_minus));
        assert!(!flex.is_compatible_with(&four_plus));
        assert!(!eight.is_compatible_with(&four_plus));
    }

    #[test]
    fn test_describe() {
        let b = Boat::new("Big Red", "8+", 8, 190, 230)
            .with_manufacturer("Hudson")
            .with_year(2019);
        assert_eq!(b.describe(), "Big Red (Hudson 2019)");
        assert_eq!(Boat::new("Yorick", "1x", 1, 150, 180).describe(), "Yorick");
    }
}
