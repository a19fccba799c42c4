//! Cache state as seen by non-fetching readers

use crate::model::NormalizedTimetable;
use std::sync::Arc;

/// Result of [`TimetableService::get_timetable`](super::TimetableService::get_timetable)
///
/// `Loading` and `NotLoaded` both mean "no model yet"; an empty timetable is
/// always `Ready`.
#[derive(Debug, Clone, PartialEq)]
pub enum TimetableState {
    Ready(Arc<NormalizedTimetable>),
    /// A fetch for the current generation is running
    Loading,
    NotLoaded,
}

impl TimetableState {
    pub fn is_ready(&self) -> bool {
        matches!(self, TimetableState::Ready(_))
    }

    pub fn ready(&self) -> Option<&Arc<NormalizedTimetable>> {
        match self {
            TimetableState::Ready(timetable) => Some(timetable),
            _ => None,
        }
    }

    pub fn into_ready(self) -> Option<Arc<NormalizedTimetable>> {
        match self {
            TimetableState::Ready(timetable) => Some(timetable),
            _ => None,
        }
    }
}
