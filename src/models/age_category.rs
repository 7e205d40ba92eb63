//! Masters age categories.
//!
//! Categories are letter-coded age brackets from a fixed, ordered table.
//! An athlete's category is the first bracket whose inclusive range
//! contains their age; ages outside every bracket fall into the oldest
//! category.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A masters age category (AA, A..K).
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgeCategory {
    AA,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
}

impl AgeCategory {
    /// All categories in table order (youngest first).
    pub const ALL: [AgeCategory; 12] = [
        AgeCategory::AA,
        AgeCategory::A,
        AgeCategory::B,
        AgeCategory::C,
        AgeCategory::D,
        AgeCategory::E,
        AgeCategory::F,
        AgeCategory::G,
        AgeCategory::H,
        AgeCategory::I,
        AgeCategory::J,
        AgeCategory::K,
    ];

    /// Inclusive `(min, max)` age bounds.
    pub fn age_range(self) -> (u32, u32) {
        match self {
            AgeCategory::AA => (21, 26),
            AgeCategory::A => (27, 35),
            AgeCategory::B => (36, 42),
            AgeCategory::C => (43, 49),
            AgeCategory::D => (50, 54),
            AgeCategory::E => (55, 59),
            AgeCategory::F => (60, 64),
            AgeCategory::G => (65, 69),
            AgeCategory::H => (70, 74),
            AgeCategory::I => (75, 79),
            AgeCategory::J => (80, 84),
            AgeCategory::K => (85, 100),
        }
    }

    /// Lower age bound of the bracket.
    #[inline]
    pub fn min_age(self) -> u32 {
        self.age_range().0
    }

    /// Category for an age. Earliest matching bracket wins; defaults to `K`.
    pub fn for_age(age: u32) -> Self {
        Self::ALL
            .iter()
            .copied()
            .find(|c| {
                let (lo, hi) = c.age_range();
                (lo..=hi).contains(&age)
            })
            .unwrap_or(AgeCategory::K)
    }

    /// Parses a letter code such as `"AA"` or `"D"`.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.code() == code)
    }

    /// Letter code.
    pub fn code(self) -> &'static str {
        match self {
            AgeCategory::AA => "AA",
            AgeCategory::A => "A",
            AgeCategory::B => "B",
            AgeCategory::C => "C",
            AgeCategory::D => "D",
            AgeCategory::E => "E",
            AgeCategory::F => "F",
            AgeCategory::G => "G",
            AgeCategory::H => "H",
            AgeCategory::I => "I",
            AgeCategory::J => "J",
            AgeCategory::K => "K",
        }
    }

    /// Expands an age token (`"C"` or a range like `"D-E"`) to the
    /// categories it covers.
    ///
    /// An unknown range start is read as the youngest category and an
    /// unknown range end as the oldest. An unknown single code covers nothing.
    pub fn expand_token(token: &str) -> Vec<AgeCategory> {
        match token.split_once('-') {
            Some((start, end)) => {
                let start_idx = Self::from_code(start).map_or(0, |c| c as usize);
                let end_idx = Self::from_code(end).map_or(Self::ALL.len() - 1, |c| c as usize);
                if start_idx > end_idx {
                    return Vec::new();
                }
                Self::ALL[start_idx..=end_idx].to_vec()
            }
            None => Self::from_code(token).into_iter().collect(),
        }
    }
}

impl fmt::Display for AgeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_age_brackets() {
        assert_eq!(AgeCategory::for_age(21), AgeCategory::AA);
        assert_eq!(AgeCategory::for_age(35), AgeCategory::A);
        assert_eq!(AgeCategory::for_age(40), AgeCategory::B);
        assert_eq!(AgeCategory::for_age(43), AgeCategory::C);
        assert_eq!(AgeCategory::for_age(72), AgeCategory::H);
    }

    #[test]
    fn test_for_age_defaults_to_oldest() {
        assert_eq!(AgeCategory::for_age(18), AgeCategory::K);
        assert_eq!(AgeCategory::for_age(101), AgeCategory::K);
    }

    #[test]
    fn test_codes_round_trip() {
        for c in AgeCategory::ALL {
            assert_eq!(AgeCategory::from_code(c.code()), Some(c));
        }
        assert_eq!(AgeCategory::from_code("Z"), None);
    }

    #[test]
    fn test_expand_token() {
        assert_eq!(AgeCategory::expand_token("C"), vec![AgeCategory::C]);
        assert_eq!(
            AgeCategory::expand_token("D-F"),
            vec![AgeCategory::D, AgeCategory::E, AgeCategory::F]
        );
        assert_eq!(
            AgeCategory::expand_token("AA-A"),
            vec![AgeCategory::AA, AgeCategory::A]
        );
        assert_eq!(AgeCategory::expand_token("J-Z").len(), 2); // J, K
        assert!(AgeCategory::expand_token("PR").is_empty());
    }

    #[test]
    fn test_table_is_ordered() {
        for pair in AgeCategory::ALL.windows(2) {
            assert!(pair[0].age_range().1 < pair[1].age_range().0);
        }
    }
}
