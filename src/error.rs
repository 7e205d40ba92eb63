//! Error types.
//!
//! Hard failures are limited to turning an event name into requirements,
//! addressing events or seats that do not exist, and reading external
//! documents (snapshots, parameter files). Everything else reports advisory
//! results instead of errors: crew and boat assignment return result states,
//! and the validator returns issue lists.

use crate::models::{AthleteId, BoatId, EventNumber};

/// An event name does not follow the `<words> <boat class>` grammar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("event name is empty")]
    EmptyName,

    #[error("event name '{event_name}' has no boat-class suffix")]
    MissingBoatClass { event_name: String },
}

/// An event number could not be resolved to usable requirements.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EventError {
    #[error("event {0} is not in the catalog")]
    UnknownEvent(EventNumber),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// A manual lineup or boat edit was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LineupEditError {
    #[error(transparent)]
    Event(#[from] EventError),

    #[error("seat {seat} is out of range for a {seats}-seat lineup")]
    SeatOutOfRange { seat: usize, seats: usize },

    #[error("athlete {0} already holds a seat in this lineup")]
    AlreadyInLineup(AthleteId),

    #[error("athlete {0} is not on the roster")]
    UnknownAthlete(AthleteId),

    #[error("boat {0} is not in the fleet")]
    UnknownBoat(BoatId),

    #[error("boat '{boat}' does not fit event {event}")]
    IncompatibleBoat { boat: String, event: EventNumber },
}

/// A persisted snapshot could not be loaded.
///
/// Loading is atomic: when this is returned, no session state was touched.
#[derive(Debug, thiserror::Error)]
pub enum LoadFormatError {
    #[error("malformed snapshot document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported snapshot version '{0}'")]
    UnsupportedVersion(String),

    #[error("lineup key '{0}' is not an event number")]
    InvalidEventKey(String),

    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Regatta parameters could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read parameters file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse parameters: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid parameter: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_messages() {
        let e = ParseError::MissingBoatClass {
            event_name: "Men's Open".into(),
        };
        assert_eq!(e.to_string(), "event name 'Men's Open' has no boat-class suffix");
        assert_eq!(ParseError::EmptyName.to_string(), "event name is empty");
    }

    #[test]
    fn test_event_error_wraps_parse_error() {
        let e: EventError = ParseError::EmptyName.into();
        assert_eq!(e.to_string(), "event name is empty");
        assert_eq!(
            EventError::UnknownEvent(EventNumber(9)).to_string(),
            "event 9 is not in the catalog"
        );
        let edit: LineupEditError = e.into();
        assert!(matches!(edit, LineupEditError::Event(EventError::Parse(_))));
    }

    #[test]
    fn test_load_error_from_json() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let e: LoadFormatError = err.into();
        assert!(e.to_string().starts_with("malformed snapshot document"));
    }
}
