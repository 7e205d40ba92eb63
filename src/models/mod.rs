//! Regatta domain models.
//!
//! Plain data types for the club side of a regatta: who can row, which
//! boats exist, which events are on the program, and who sits where.
//!
//! # Domain Mappings
//!
//! | Type | Regatta concept |
//! |------|-----------------|
//! | `Athlete` | Rower and/or coxswain on the club roster |
//! | `Boat` | Shell in the club fleet |
//! | `Event` | Numbered race on the four-day program |
//! | `Lineup` | Seats and coxswain for one event |
//! | `EntryHistory` | Past entry counts, predicting heats |

mod age_category;
mod athlete;
mod boat;
mod event;
mod history;
mod lineup;
mod roster;

pub use age_category::AgeCategory;
pub use athlete::{Athlete, AthleteId, AthleteKey, Gender};
pub use boat::{Boat, BoatId, BoatKey, BoatRig, WeightFit, WEIGHT_TOLERANCE_LBS};
pub use event::{Event, EventCatalog, EventEntry, EventNumber, RaceDay};
pub use history::EntryHistory;
pub use lineup::Lineup;
pub use roster::{Fleet, Roster};
