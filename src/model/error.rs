//! Normalization error types

use super::person::PersonId;
use super::timeslot::SlotKey;
use chrono::NaiveTime;
use thiserror::Error;

/// A raw field that is not in the expected vocabulary or format
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("unknown weekday identifier '{value}' (expected one of MON..SUN)")]
    InvalidWeekday { value: String },

    #[error("invalid {field} '{value}' (expected HH:MM or HH:MM:SS)")]
    InvalidTime { field: &'static str, value: String },

    #[error("invalid person identifier '{value}' (expected 4 alphanumeric characters)")]
    InvalidPersonId { value: String },

    #[error("invalid {field} {value} for person '{person}' (must be a non-negative number)")]
    InvalidHours {
        person: String,
        field: &'static str,
        value: f64,
    },
}

/// A batch of raw records that cannot form a consistent timetable
///
/// Parse failures are a specific case of consistency failure: either way the
/// whole batch is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConsistencyError {
    #[error("record {index}: {source}")]
    Parse {
        index: usize,
        #[source]
        source: ParseError,
    },

    #[error("duplicate timeslot {key} (records {first} and {second})")]
    DuplicateSlot {
        key: SlotKey,
        first: usize,
        second: usize,
    },

    #[error("record {index}: timeslot {key} does not end after it starts (ends {end})")]
    InvalidTimeRange {
        index: usize,
        key: SlotKey,
        end: NaiveTime,
    },

    #[error("record {index}: person '{person}' listed more than once in timeslot {key}")]
    DuplicatePerson {
        index: usize,
        key: SlotKey,
        person: PersonId,
    },
}

impl ConsistencyError {
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}
