//! Normalized Timetable Model
//!
//! The in-memory representation every feature module consumes, decoupled
//! from the backend wire shape in [`crate::records`].
//!
//! # Invariants
//!
//! Every [`NormalizedTimetable`] produced by [`normalize`] guarantees:
//!
//! - each slot starts strictly before it ends
//! - person identifiers are unique within a slot
//! - no two slots share (department, workplace, weekday, start time)
//! - disabled slots are kept, but excluded from active-schedule queries
//!
//! # Example
//!
//! ```rust
//! use timetable::model::{normalize, Weekday};
//! use timetable::records::{PersonRecord, TimeslotRecord};
//!
//! let records = vec![
//!     TimeslotRecord::new("Department 1", "Arzt", "V1", "MON", "08:00", "12:00")
//!         .with_person(PersonRecord::new("ABCD", "Max", "Mustermann", 4.0, 4.0)),
//!     TimeslotRecord::new("Department 1", "Arzt", "V1", "TUE", "08:00", "12:00"),
//! ];
//!
//! let timetable = normalize(records).unwrap();
//! assert_eq!(timetable.len(), 2);
//! assert_eq!(timetable.total_hours("ABCD").working, 4.0);
//! assert_eq!(timetable.slots().next().unwrap().weekday, Weekday::Mon);
//! ```

mod error;
mod normalize;
mod person;
mod timeslot;
mod timetable;
mod weekday;

pub use error::{ConsistencyError, ParseError};
pub use normalize::normalize;
pub use person::{NormalizedPerson, PersonId};
pub use timeslot::{NormalizedTimeslot, SlotKey};
pub use timetable::{Conflict, HoursTotal, NormalizedTimetable, SlotFilter, SlotSelection};
pub use weekday::{parse_time_of_day, Weekday};
