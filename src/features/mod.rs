//! Specialized Data Services
//!
//! Each service binds the shared [`TimetableService`](crate::service::TimetableService)
//! to a fixed scope and adds the queries one part of the application needs.
//! They hold no data of their own; two services over the same scope read the
//! same cached model.

pub mod absency;
pub mod planner;
pub mod viewer;

pub use absency::{
    group_dates_to_ranges, AbsenceImpact, AbsencyDataService, AffectedSlot, DateRange,
    RosterEntry,
};
pub use planner::{PlannerDataService, StaffingGap, DEFAULT_STAFFING_THRESHOLD};
pub use viewer::{
    GridCell, SlotGroup, TimetableGrid, ViewerDataService, WeekdayColumn, WorkplaceRow,
};
