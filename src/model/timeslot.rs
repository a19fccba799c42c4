//! Normalized timeslots and their composite key

use super::person::NormalizedPerson;
use super::weekday::Weekday;
use chrono::NaiveTime;
use serde::Serialize;
use std::fmt;

/// Composite identity of a timeslot: (department, workplace, weekday, start)
///
/// Field order gives the derived `Ord` the timetable ordering: weekday
/// ordinal, then start time, with department and workplace as tie-breakers.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SlotKey {
    pub weekday: Weekday,
    pub start: NaiveTime,
    pub department: String,
    pub workplace: String,
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} {} {}",
            self.department,
            self.workplace,
            self.weekday,
            self.start.format("%H:%M")
        )
    }
}

/// A timeslot after parsing and validation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedTimeslot {
    pub department: String,
    pub workplace: String,
    pub name: String,
    pub weekday: Weekday,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub disabled: bool,
    /// In backend order; identifiers are unique within the slot
    pub persons: Vec<NormalizedPerson>,
}

impl NormalizedTimeslot {
    pub fn key(&self) -> SlotKey {
        SlotKey {
            weekday: self.weekday,
            start: self.start,
            department: self.department.clone(),
            workplace: self.workplace.clone(),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.disabled
    }

    pub fn person(&self, id: &str) -> Option<&NormalizedPerson> {
        self.persons.iter().find(|p| p.id.as_str() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.person(id).is_some()
    }

    /// Length of the slot window in hours
    pub fn duration_hours(&self) -> f64 {
        (self.end - self.start).num_minutes() as f64 / 60.0
    }

    /// Sum of contracted hours of everyone assigned
    pub fn working_hours(&self) -> f64 {
        self.persons.iter().map(|p| p.working_hours).sum()
    }

    /// Sum of scheduled hours of everyone assigned
    pub fn actual_hours(&self) -> f64 {
        self.persons.iter().map(|p| p.actual_hours).sum()
    }

    /// Same weekday and the half-open windows `[start, end)` intersect
    pub fn overlaps(&self, other: &NormalizedTimeslot) -> bool {
        self.weekday == other.weekday && self.start < other.end && other.start < self.end
    }
}
