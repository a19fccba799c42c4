//! Absency data service
//!
//! Person-centric view used when recording absences: the roster of people
//! in the timetable, grouping of absence dates into ranges, and the slots an
//! absence would leave uncovered.

use crate::model::{HoursTotal, NormalizedPerson, PersonId, SlotKey, Weekday};
use crate::service::{TimetableDataService, TimetableService};
use crate::source::Scope;
use chrono::NaiveDate;
use serde::Serialize;

/// A person as offered for selection, with display name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterEntry {
    pub id: PersonId,
    pub fullname: String,
    pub email: String,
}

impl From<&NormalizedPerson> for RosterEntry {
    fn from(person: &NormalizedPerson) -> Self {
        Self {
            id: person.id.clone(),
            fullname: person.fullname(),
            email: person.email.clone(),
        }
    }
}

/// Inclusive range of calendar dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Collapse dates into ranges of consecutive days
///
/// Input order and duplicates don't matter; ranges come out sorted.
///
/// ```rust
/// use chrono::NaiveDate;
/// use timetable::features::absency::group_dates_to_ranges;
///
/// let d = |day| NaiveDate::from_ymd_opt(2022, 1, day).unwrap();
/// let ranges = group_dates_to_ranges(&[d(1), d(2), d(4), d(5)]);
/// assert_eq!(ranges.len(), 2);
/// assert_eq!((ranges[0].start, ranges[0].end), (d(1), d(2)));
/// ```
pub fn group_dates_to_ranges(dates: &[NaiveDate]) -> Vec<DateRange> {
    let mut sorted = dates.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    let mut ranges: Vec<DateRange> = Vec::new();
    for date in sorted {
        match ranges.last_mut() {
            Some(range) if range.end.succ_opt() == Some(date) => range.end = date,
            _ => ranges.push(DateRange::single(date)),
        }
    }
    ranges
}

/// A slot the absent person would miss on a given date
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AffectedSlot {
    pub date: NaiveDate,
    pub key: SlotKey,
    pub name: String,
    pub working_hours: f64,
    pub actual_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AbsenceImpact {
    pub person: PersonId,
    pub ranges: Vec<DateRange>,
    pub affected: Vec<AffectedSlot>,
    /// Sum over `affected`
    pub hours: HoursTotal,
}

#[derive(Debug, Clone)]
pub struct AbsencyDataService {
    shared: TimetableService,
    scope: Scope,
}

impl AbsencyDataService {
    pub fn new(shared: TimetableService, scope: Scope) -> Self {
        Self { shared, scope }
    }

    /// Every person in the current model, ordered by identifier
    pub fn roster(&self) -> Vec<RosterEntry> {
        self.shared
            .roster(&self.scope)
            .iter()
            .map(RosterEntry::from)
            .collect()
    }

    pub fn find_person(&self, id: &str) -> Option<RosterEntry> {
        self.roster()
            .into_iter()
            .find(|entry| entry.id.as_str() == id)
    }

    /// Active slots the person holds on each absence date
    pub fn absence_impact(&self, person: PersonId, dates: &[NaiveDate]) -> AbsenceImpact {
        let ranges = group_dates_to_ranges(dates);

        let mut affected = Vec::new();
        for range in &ranges {
            for date in range.start.iter_days().take_while(|date| *date <= range.end) {
                for slot in &self.find_by_weekday(Weekday::from_date(date)) {
                    if let Some(assigned) = slot.person(person.as_str()) {
                        affected.push(AffectedSlot {
                            date,
                            key: slot.key(),
                            name: slot.name.clone(),
                            working_hours: assigned.working_hours,
                            actual_hours: assigned.actual_hours,
                        });
                    }
                }
            }
        }

        let hours = affected
            .iter()
            .map(|slot| HoursTotal::new(slot.working_hours, slot.actual_hours))
            .sum();

        AbsenceImpact {
            person,
            ranges,
            affected,
            hours,
        }
    }
}

impl TimetableDataService for AbsencyDataService {
    fn shared(&self) -> &TimetableService {
        &self.shared
    }

    fn scope(&self) -> &Scope {
        &self.scope
    }
}
