//! Event requirements derived from event names.
//!
//! Event names carry everything structural about a race:
//!
//! ```text
//! Men's Open C 4+
//! ^^^^^      ^ ^^
//! gender     | boat class (seats, cox, rig)
//!            age category tokens
//! ```
//!
//! The boat class is the last whitespace-separated token. Age tokens are
//! single categories (`C`) or ranges (`D-E`) found anywhere in the name.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::ParseError;
use crate::models::{AgeCategory, Gender};

fn age_token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b([A-K]{1,2}(?:-[A-K]{1,2})?)\b").expect("age token pattern is valid")
    })
}

/// A boat-class code such as `"4+"`, `"2x"` or `"8+"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoatClass {
    pub code: String,
    pub seats: u32,
    pub has_cox: bool,
    pub is_sculling: bool,
}

impl BoatClass {
    /// Reads a boat-class code. The seat count is the first run of digits;
    /// a code without digits reads as one seat.
    pub fn from_code(code: &str) -> Self {
        Self {
            code: code.to_string(),
            seats: first_integer(code).unwrap_or(1),
            has_cox: code.contains('+'),
            is_sculling: code.contains('x'),
        }
    }

    /// Strict variant used for event names: the code must contain a seat
    /// count.
    pub fn parse(code: &str) -> Option<Self> {
        first_integer(code).map(|_| Self::from_code(code))
    }
}

fn first_integer(s: &str) -> Option<u32> {
    let start = s.find(|c: char| c.is_ascii_digit())?;
    let digits: String = s[start..].chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// Who may fill the rowing seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenderRequirement {
    #[serde(rename = "M")]
    Men,
    #[serde(rename = "F")]
    Women,
    Mixed,
}

impl GenderRequirement {
    /// Whether an athlete of `gender` may take a rowing seat.
    pub fn admits(self, gender: Gender) -> bool {
        match self {
            GenderRequirement::Men => gender == Gender::Male,
            GenderRequirement::Women => gender == Gender::Female,
            GenderRequirement::Mixed => true,
        }
    }
}

impl fmt::Display for GenderRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GenderRequirement::Men => "M",
            GenderRequirement::Women => "F",
            GenderRequirement::Mixed => "Mixed",
        })
    }
}

/// Structural requirements of an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRequirements {
    /// Rowing seats.
    pub num_rowers: u32,
    /// Whether a coxswain is required.
    pub has_cox: bool,
    /// Sculling (otherwise sweep).
    pub is_sculling: bool,
    /// Gender rule for rowers.
    pub gender_req: GenderRequirement,
    /// Raw age tokens in name order, e.g. `["D-E"]`.
    pub age_categories: Vec<String>,
    /// Boat-class code, e.g. `"4+"`.
    pub boat_class: String,
}

impl EventRequirements {
    /// Parses an event display name.
    ///
    /// # Errors
    /// [`ParseError`] when the name is empty or its last token carries no
    /// seat count.
    ///
    /// # Example
    /// ```
    /// use regatta_lineup::requirements::{EventRequirements, GenderRequirement};
    ///
    /// let req = EventRequirements::parse("Men's Open C 4+").unwrap();
    /// assert_eq!(req.num_rowers, 4);
    /// assert!(req.has_cox);
    /// assert!(!req.is_sculling);
    /// assert_eq!(req.gender_req, GenderRequirement::Men);
    /// assert_eq!(req.age_categories, vec!["C".to_string()]);
    /// ```
    pub fn parse(event_name: &str) -> Result<Self, ParseError> {
        let last = event_name
            .split_whitespace()
            .next_back()
            .ok_or(ParseError::EmptyName)?;
        let class = BoatClass::parse(last).ok_or_else(|| ParseError::MissingBoatClass {
            event_name: event_name.to_string(),
        })?;

        let gender_req = if event_name.contains("Mixed") {
            GenderRequirement::Mixed
        } else if event_name.contains("Men's") {
            GenderRequirement::Men
        } else {
            GenderRequirement::Women
        };

        let age_categories = age_token_regex()
            .captures_iter(event_name)
            .map(|c| c[1].to_string())
            .collect();

        Ok(Self {
            num_rowers: class.seats,
            has_cox: class.has_cox,
            is_sculling: class.is_sculling,
            gender_req,
            age_categories,
            boat_class: class.code,
        })
    }

    #[inline]
    pub fn is_sweep(&self) -> bool {
        !self.is_sculling
    }

    /// Minimum crew-average age: the lowest lower bound among the
    /// categories that start each age token. `None` when no token names a
    /// known category.
    pub fn minimum_age(&self) -> Option<u32> {
        self.age_categories
            .iter()
            .filter_map(|token| {
                let start = token.split('-').next().unwrap_or(token);
                AgeCategory::from_code(start)
            })
            .map(AgeCategory::min_age)
            .min()
    }

    /// Every category covered by the age tokens, deduplicated, youngest
    /// first.
    pub fn eligible_categories(&self) -> Vec<AgeCategory> {
        let mut cats: Vec<AgeCategory> = self
            .age_categories
            .iter()
            .flat_map(|t| AgeCategory::expand_token(t))
            .collect();
        cats.sort();
        cats.dedup();
        cats
    }

    /// Display name for a rower seat (zero-based).
    ///
    /// Sweep pairs, fours and eights use Bow/2/.../Stroke; everything else
    /// is "Seat n".
    pub fn seat_name(&self, seat: usize) -> String {
        const EIGHT: [&str; 8] = ["Bow", "2", "3", "4", "5", "6", "7", "Stroke"];
        const FOUR: [&str; 4] = ["Bow", "2", "3", "Stroke"];
        const PAIR: [&str; 2] = ["Bow", "Stroke"];

        let names: &[&str] = match (self.is_sculling, self.num_rowers) {
            (false, 8) => &EIGHT,
            (false, 4) => &FOUR,
            (false, 2) => &PAIR,
            _ => &[],
        };
        names
            .get(seat)
            .map(|s| s.to_string())
            .unwrap_or_else(|| format!("Seat {}", seat + 1))
    }

    /// Names of all rower seats, bow first.
    pub fn seat_names(&self) -> Vec<String> {
        (0..self.num_rowers as usize).map(|i| self.seat_name(i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coxed_four() {
        let req = EventRequirements::parse("Men's Open C 4+").unwrap();
        assert_eq!(req.num_rowers, 4);
        assert!(req.has_cox);
        assert!(!req.is_sculling);
        assert!(req.is_sweep());
        assert_eq!(req.gender_req, GenderRequirement::Men);
        assert_eq!(req.age_categories, vec!["C"]);
        assert_eq!(req.boat_class, "4+");
    }

    #[test]
    fn test_parse_gender_rules() {
        assert_eq!(
            EventRequirements::parse("Mixed B 4+").unwrap().gender_req,
            GenderRequirement::Mixed
        );
        assert_eq!(
            EventRequirements::parse("Women's Masters E 1x").unwrap().gender_req,
            GenderRequirement::Women
        );
        // Neither "Mixed" nor "Men's" reads as women.
        assert_eq!(
            EventRequirements::parse("PR3 Open Inclusive 2x").unwrap().gender_req,
            GenderRequirement::Women
        );
    }

    #[test]
    fn test_parse_age_ranges() {
        let req = EventRequirements::parse("Women's Masters D-E 2x").unwrap();
        assert_eq!(req.age_categories, vec!["D-E"]);
        assert_eq!(req.minimum_age(), Some(50));
        assert_eq!(
            req.eligible_categories(),
            vec![AgeCategory::D, AgeCategory::E]
        );
        assert!(req.is_sculling);
        assert!(!req.has_cox);
    }

    #[test]
    fn test_minimum_age_takes_lowest_start() {
        let req = EventRequirements::parse("Mixed AA-A 8+").unwrap();
        assert_eq!(req.minimum_age(), Some(21));
        let none = EventRequirements::parse("Men's Masters 8+").unwrap();
        assert!(none.age_categories.is_empty());
        assert_eq!(none.minimum_age(), None);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(EventRequirements::parse("   "), Err(ParseError::EmptyName));
        assert_eq!(
            EventRequirements::parse("Men's Open"),
            Err(ParseError::MissingBoatClass {
                event_name: "Men's Open".into()
            })
        );
    }

    #[test]
    fn test_boat_class_lenient_default() {
        let c = BoatClass::from_code("x");
        assert_eq!(c.seats, 1);
        assert!(c.is_sculling);
        assert!(BoatClass::parse("x").is_none());
        assert_eq!(BoatClass::from_code("12+").seats, 12);
    }

    #[test]
    fn test_seat_names() {
        let eight = EventRequirements::parse("Men's Open C 8+").unwrap();
        assert_eq!(eight.seat_name(0), "Bow");
        assert_eq!(eight.seat_name(7), "Stroke");
        assert_eq!(eight.seat_name(3), "4");

        let quad = EventRequirements::parse("Women's Masters E 4x").unwrap();
        assert_eq!(quad.seat_names(), vec!["Seat 1", "Seat 2", "Seat 3", "Seat 4"]);

        let pair = EventRequirements::parse("Men's Masters B 2-").unwrap();
        assert_eq!(pair.seat_names(), vec!["Bow", "Stroke"]);
    }

    #[test]
    fn test_gender_admits() {
        assert!(GenderRequirement::Mixed.admits(Gender::Female));
        assert!(GenderRequirement::Men.admits(Gender::Male));
        assert!(!GenderRequirement::Men.admits(Gender::Female));
    }
}
