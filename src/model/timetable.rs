//! The normalized timetable and its read-only queries

use super::person::{NormalizedPerson, PersonId};
use super::timeslot::{NormalizedTimeslot, SlotKey};
use super::weekday::Weekday;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::iter::Sum;
use std::ops::Add;
use std::sync::Arc;

/// Immutable, internally consistent view of one fetch cycle
///
/// Slots are keyed by [`SlotKey`]; iteration order is weekday ordinal, then
/// start time. The model is never patched: a new fetch builds a new one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedTimetable {
    #[serde(serialize_with = "serialize_slots")]
    slots: BTreeMap<SlotKey, NormalizedTimeslot>,
    /// Keys in the order the backend delivered the records
    #[serde(skip)]
    backend_order: Vec<SlotKey>,
    loaded_at: DateTime<Utc>,
}

fn serialize_slots<S>(
    slots: &BTreeMap<SlotKey, NormalizedTimeslot>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_seq(slots.values())
}

/// Working and actual hours summed over a set of slots
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct HoursTotal {
    pub working: f64,
    pub actual: f64,
}

impl HoursTotal {
    pub fn new(working: f64, actual: f64) -> Self {
        Self { working, actual }
    }

    pub fn of(person: &NormalizedPerson) -> Self {
        Self::new(person.working_hours, person.actual_hours)
    }
}

impl Add for HoursTotal {
    type Output = HoursTotal;

    fn add(self, rhs: Self) -> Self::Output {
        HoursTotal::new(self.working + rhs.working, self.actual + rhs.actual)
    }
}

impl Sum for HoursTotal {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(HoursTotal::default(), Add::add)
    }
}

/// A person booked into two active slots whose windows overlap
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conflict {
    pub person: PersonId,
    pub first: SlotKey,
    pub second: SlotKey,
}

impl NormalizedTimetable {
    pub(crate) fn from_slots(
        slots: BTreeMap<SlotKey, NormalizedTimeslot>,
        backend_order: Vec<SlotKey>,
    ) -> Self {
        Self {
            slots,
            backend_order,
            loaded_at: Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn get(&self, key: &SlotKey) -> Option<&NormalizedTimeslot> {
        self.slots.get(key)
    }

    /// All slots, disabled included, in timetable order
    pub fn slots(&self) -> impl Iterator<Item = &NormalizedTimeslot> + '_ {
        self.slots.values()
    }

    /// All slots, disabled included, in the order the backend sent them
    pub fn slots_in_backend_order(&self) -> impl Iterator<Item = &NormalizedTimeslot> + '_ {
        self.backend_order
            .iter()
            .filter_map(|key| self.slots.get(key))
    }

    pub fn active_slots(&self) -> impl Iterator<Item = &NormalizedTimeslot> + '_ {
        self.slots.values().filter(|slot| slot.is_active())
    }

    /// Sum of hours for `id` across every slot that contains them
    pub fn total_hours(&self, id: &str) -> HoursTotal {
        self.slots
            .values()
            .filter_map(|slot| slot.person(id))
            .map(HoursTotal::of)
            .sum()
    }

    /// Every distinct person, first occurrence in timetable order wins
    pub fn roster(&self) -> Vec<NormalizedPerson> {
        let mut persons: BTreeMap<&PersonId, &NormalizedPerson> = BTreeMap::new();
        for person in self.slots.values().flat_map(|slot| slot.persons.iter()) {
            persons.entry(&person.id).or_insert(person);
        }
        persons.into_values().cloned().collect()
    }

    /// Overlapping active slots on the same weekday that share a person
    pub fn conflicts(&self) -> Vec<Conflict> {
        let active: Vec<&NormalizedTimeslot> = self.active_slots().collect();
        let mut conflicts = Vec::new();

        for (i, first) in active.iter().enumerate() {
            // Slots are ordered by weekday then start, so once a later slot
            // starts after `first` ends on the same day nothing else overlaps
            for second in active[i + 1..]
                .iter()
                .take_while(|s| s.weekday == first.weekday && s.start < first.end)
            {
                for person in &first.persons {
                    if second.contains(person.id.as_str()) {
                        conflicts.push(Conflict {
                            person: person.id.clone(),
                            first: first.key(),
                            second: second.key(),
                        });
                    }
                }
            }
        }
        conflicts
    }
}

/// Which slots a [`SlotSelection`] yields
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotFilter {
    /// Slots containing the person, disabled ones included
    Person(String),
    Weekday {
        weekday: Weekday,
        include_disabled: bool,
    },
}

impl SlotFilter {
    pub fn matches(&self, slot: &NormalizedTimeslot) -> bool {
        match self {
            SlotFilter::Person(id) => slot.contains(id),
            SlotFilter::Weekday {
                weekday,
                include_disabled,
            } => slot.weekday == *weekday && (*include_disabled || slot.is_active()),
        }
    }
}

/// Lazy, restartable view over the slots of one timetable snapshot
///
/// Holding the snapshot keeps the view stable even if the cache is refreshed
/// in the meantime. A selection over no snapshot is simply empty.
#[derive(Debug, Clone)]
pub struct SlotSelection {
    timetable: Option<Arc<NormalizedTimetable>>,
    filter: SlotFilter,
}

impl SlotSelection {
    pub fn new(timetable: Option<Arc<NormalizedTimetable>>, filter: SlotFilter) -> Self {
        Self { timetable, filter }
    }

    pub fn filter(&self) -> &SlotFilter {
        &self.filter
    }

    /// Ordered by weekday ordinal, then start time
    pub fn iter(&self) -> impl Iterator<Item = &NormalizedTimeslot> + '_ {
        self.timetable
            .iter()
            .flat_map(|timetable| timetable.slots())
            .filter(move |slot| self.filter.matches(slot))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    pub fn to_vec(&self) -> Vec<NormalizedTimeslot> {
        self.iter().cloned().collect()
    }
}

impl<'a> IntoIterator for &'a SlotSelection {
    type Item = &'a NormalizedTimeslot;
    type IntoIter = Box<dyn Iterator<Item = &'a NormalizedTimeslot> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
