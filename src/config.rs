//! Regatta parameters.
//!
//! Spacing, gaps, session start times and dock logistics offsets. Every
//! field has a default, so a parameters file only needs the values that
//! differ. Files are TOML:
//!
//! ```toml
//! event_spacing_minutes = 5
//! regatta_start_date = "2025-07-16"
//! morning_start_time = "07:30:00"
//! ```

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Tunable regatta parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegattaParameters {
    /// Minutes between consecutive events.
    pub event_spacing_minutes: u32,
    /// Minimum minutes between two races of the same athlete.
    pub min_gap_minutes: u32,
    /// Date of the first race day (Thursday).
    pub regatta_start_date: NaiveDate,
    /// First race of the morning (heat) session.
    #[serde(alias = "regatta_start_time")]
    pub morning_start_time: NaiveTime,
    /// First race of the afternoon (final) session.
    pub afternoon_start_time: NaiveTime,
    /// Hide lightweight events from selection.
    pub exclude_lightweight: bool,
    /// Crew meets this long before the race.
    pub meet_minutes_before: u32,
    /// Boat leaves the dock this long before the race.
    pub launch_minutes_before: u32,
    /// Boat is back on the dock this long after the race.
    pub land_minutes_after: u32,
    /// Lanes per race; more entries than this means heats.
    pub boats_per_race: u32,
}

impl Default for RegattaParameters {
    fn default() -> Self {
        Self {
            event_spacing_minutes: 4,
            min_gap_minutes: 30,
            regatta_start_date: NaiveDate::from_ymd_opt(2024, 7, 17).unwrap_or_default(),
            morning_start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default(),
            afternoon_start_time: NaiveTime::from_hms_opt(13, 0, 0).unwrap_or_default(),
            exclude_lightweight: true,
            meet_minutes_before: 40,
            launch_minutes_before: 30,
            land_minutes_after: 15,
            boats_per_race: 8,
        }
    }
}

impl RegattaParameters {
    /// Sets event spacing.
    pub fn with_spacing(mut self, minutes: u32) -> Self {
        self.event_spacing_minutes = minutes;
        self
    }

    /// Sets the minimum gap between an athlete's races.
    pub fn with_min_gap(mut self, minutes: u32) -> Self {
        self.min_gap_minutes = minutes;
        self
    }

    /// Sets lanes per race.
    pub fn with_boats_per_race(mut self, boats: u32) -> Self {
        self.boats_per_race = boats;
        self
    }

    /// Sets the first race day.
    pub fn with_start_date(mut self, date: NaiveDate) -> Self {
        self.regatta_start_date = date;
        self
    }

    /// Sets both session start times.
    pub fn with_session_starts(mut self, morning: NaiveTime, afternoon: NaiveTime) -> Self {
        self.morning_start_time = morning;
        self.afternoon_start_time = afternoon;
        self
    }

    /// Checks values the timing engine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.event_spacing_minutes == 0 {
            return Err(ConfigError::Invalid(
                "event_spacing_minutes must be positive".into(),
            ));
        }
        if self.boats_per_race == 0 {
            return Err(ConfigError::Invalid("boats_per_race must be positive".into()));
        }
        Ok(())
    }

    /// Parses and validates TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let params: RegattaParameters = toml::from_str(content)?;
        params.validate()?;
        Ok(params)
    }

    /// Loads and validates a TOML parameters file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let params = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded regatta parameters");
        Ok(params)
    }

    /// Renders as TOML.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let p = RegattaParameters::default();
        assert_eq!(p.event_spacing_minutes, 4);
        assert_eq!(p.min_gap_minutes, 30);
        assert_eq!(p.regatta_start_date, NaiveDate::from_ymd_opt(2024, 7, 17).unwrap());
        assert_eq!(p.morning_start_time, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
        assert_eq!(p.afternoon_start_time, NaiveTime::from_hms_opt(13, 0, 0).unwrap());
        assert!(p.exclude_lightweight);
        assert_eq!(p.boats_per_race, 8);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let p = RegattaParameters::from_toml_str(
            r#"
            event_spacing_minutes = 5
            regatta_start_time = "07:30:00"
            "#,
        )
        .unwrap();
        assert_eq!(p.event_spacing_minutes, 5);
        assert_eq!(p.morning_start_time, NaiveTime::from_hms_opt(7, 30, 0).unwrap());
        assert_eq!(p.min_gap_minutes, 30);
    }

    #[test]
    fn test_rejects_zero_capacity() {
        let err = RegattaParameters::from_toml_str("boats_per_race = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        let err = RegattaParameters::from_toml_str("event_spacing_minutes = \"x\"").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_toml_roundtrip() {
        let p = RegattaParameters::default().with_spacing(6).with_min_gap(45);
        let text = p.to_toml_string().unwrap();
        assert_eq!(RegattaParameters::from_toml_str(&text).unwrap(), p);
    }

    #[test]
    fn test_load_missing_file() {
        let err = RegattaParameters::load("/nonexistent/regatta.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
