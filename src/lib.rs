//! Crew lineup planning for masters rowing regattas.
//!
//! Turns a roster of athletes, a fleet of boats and a regatta program into
//! crewed, boated and timed entries, and reports what is still wrong with
//! them. Every engine is a pure function of borrowed inputs; the
//! [`session::RegattaSession`] context owns the state between calls.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Athlete`, `Boat`, `Event`, `EventCatalog`,
//!   `Lineup`, `EntryHistory`, `AgeCategory`
//! - **`requirements`**: Event name parsing (`"Men's Open C 4+"` to seats, cox,
//!   rig, gender and age tokens)
//! - **`timing`**: Race times with cascading heat-overflow delay, dock windows
//! - **`assignment`**: Crew assignment (gender balance, age search, coxswain)
//! - **`equipment`**: Boat compatibility and greedy fleet assignment
//! - **`validation`**: Per-lineup advisory checks
//! - **`analysis`**: Regatta-wide issue and workload reports
//! - **`session`**: Explicit planning context
//! - **`snapshot`**: Versioned JSON save/load with identity re-resolution
//! - **`config`**: Regatta parameters, TOML loading
//!
//! # Example
//!
//! ```
//! use regatta_lineup::models::{Athlete, Boat, Event, EventCatalog, EntryHistory, Gender, RaceDay};
//! use regatta_lineup::config::RegattaParameters;
//! use regatta_lineup::session::RegattaSession;
//!
//! let catalog = EventCatalog::new()
//!     .with_day(RaceDay::Thursday, vec![Event::new(1u32, "Women's Masters 2x")]);
//! let mut session = RegattaSession::new(catalog, EntryHistory::new(), RegattaParameters::default());
//! session.add_athlete(Athlete::new("Ann", Gender::Female, 44).with_preferred_events([1u32]));
//! session.add_athlete(Athlete::new("Bea", Gender::Female, 47).with_preferred_events([1u32]));
//! session.add_boat(Boat::new("Double Trouble", "2x", 2, 130, 170));
//!
//! let crews = session.auto_assign_crews();
//! assert_eq!(crews.assignments_made, 1);
//! let boats = session.auto_assign_boats();
//! assert_eq!(boats.assigned(), 1);
//! ```

mod catalog_data;

pub mod analysis;
pub mod assignment;
pub mod config;
pub mod equipment;
pub mod error;
pub mod models;
pub mod requirements;
pub mod session;
pub mod snapshot;
pub mod timing;
pub mod validation;

pub use error::{ConfigError, EventError, LineupEditError, LoadFormatError, ParseError};
pub use session::RegattaSession;
