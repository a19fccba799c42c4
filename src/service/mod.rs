//! Abstract Timetable Data Service
//!
//! Fetches raw records through a [`TimetableSource`](crate::source::TimetableSource),
//! normalizes them and caches the resulting model per
//! [`Scope`](crate::source::Scope).
//!
//! ```rust
//! use std::sync::Arc;
//! use timetable::model::Weekday;
//! use timetable::records::TimeslotRecord;
//! use timetable::service::{TimetableService, TimetableState};
//! use timetable::source::{MemorySource, Scope};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), timetable::service::TimetableError> {
//! let source = MemorySource::new(vec![TimeslotRecord::new(
//!     "Department 1", "Arzt", "V1", "MON", "08:00", "12:00",
//! )]);
//! let service = TimetableService::new(Arc::new(source));
//! let scope = Scope::all();
//!
//! assert_eq!(service.get_timetable(&scope), TimetableState::NotLoaded);
//! service.load_timetable(&scope).await?;
//! assert_eq!(service.find_by_weekday(&scope, Weekday::Mon).len(), 1);
//!
//! service.refresh(&scope);
//! assert!(!service.get_timetable(&scope).is_ready());
//! # Ok(())
//! # }
//! ```

pub mod api;
mod error;
mod shared;
mod state;
mod traits;

pub use error::{RegistryError, TimetableError, TimetableResult};
pub use shared::TimetableService;
pub use state::TimetableState;
pub use traits::TimetableDataService;

#[cfg(test)]
mod tests;
