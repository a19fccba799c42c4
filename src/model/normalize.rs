//! Normalization of raw backend records
//!
//! A single pass over the batch: parse the weekday, time and person fields,
//! default `disabled`, index the composite key and check every invariant as
//! each record is indexed. The first violation aborts the whole batch.

use super::error::{ConsistencyError, ParseError};
use super::person::NormalizedPerson;
use super::timeslot::{NormalizedTimeslot, SlotKey};
use super::timetable::NormalizedTimetable;
use super::weekday::{parse_time_of_day, Weekday};
use crate::records::TimeslotRecord;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Build a timetable from a batch of raw records
///
/// On success the model holds exactly one slot per input record.
pub fn normalize(records: Vec<TimeslotRecord>) -> Result<NormalizedTimetable, ConsistencyError> {
    let mut slots: BTreeMap<SlotKey, NormalizedTimeslot> = BTreeMap::new();
    // Composite key -> index of the record that claimed it
    let mut key_index: HashMap<SlotKey, usize> = HashMap::with_capacity(records.len());
    let mut backend_order: Vec<SlotKey> = Vec::with_capacity(records.len());

    for (index, record) in records.into_iter().enumerate() {
        let slot = normalize_record(index, record)?;
        let key = slot.key();

        match slots.entry(key.clone()) {
            Entry::Occupied(_) => {
                let first = key_index.get(&key).copied().unwrap_or(index);
                return Err(ConsistencyError::DuplicateSlot {
                    key,
                    first,
                    second: index,
                });
            }
            Entry::Vacant(vacant) => {
                key_index.insert(key.clone(), index);
                backend_order.push(key);
                vacant.insert(slot);
            }
        }
    }

    log::trace!("Normalized {} timeslots", slots.len());
    Ok(NormalizedTimetable::from_slots(slots, backend_order))
}

fn normalize_record(
    index: usize,
    record: TimeslotRecord,
) -> Result<NormalizedTimeslot, ConsistencyError> {
    let parse_err = |source: ParseError| ConsistencyError::Parse { index, source };

    let weekday = Weekday::parse_id(&record.weekday_id).map_err(parse_err)?;
    let start = parse_time_of_day("start_time", &record.start_time).map_err(parse_err)?;
    let end = parse_time_of_day("end_time", &record.end_time).map_err(parse_err)?;

    let mut slot = NormalizedTimeslot {
        department: record.department_name,
        workplace: record.workplace_name,
        name: record.name,
        weekday,
        start,
        end,
        disabled: record.disabled.unwrap_or(false),
        persons: Vec::with_capacity(record.persons.len()),
    };

    if start >= end {
        return Err(ConsistencyError::InvalidTimeRange {
            index,
            key: slot.key(),
            end,
        });
    }

    let mut seen = HashSet::with_capacity(record.persons.len());
    for person_record in record.persons {
        let person = NormalizedPerson::from_record(person_record).map_err(parse_err)?;
        if !seen.insert(person.id.clone()) {
            return Err(ConsistencyError::DuplicatePerson {
                index,
                key: slot.key(),
                person: person.id,
            });
        }
        slot.persons.push(person);
    }

    Ok(slot)
}
