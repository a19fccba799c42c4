//! Weekday vocabulary and time-of-day parsing

use super::error::ParseError;
use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Grid column of Monday in the timetable display; columns 1-2 hold labels
const FIRST_WEEKDAY_GRID_COLUMN: u8 = 3;

/// Day of the week, ordered Monday first
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    Display,
    IntoStaticStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    /// Parse a wire weekday identifier ("MON", "Tue", ...)
    pub fn parse_id(value: &str) -> Result<Self, ParseError> {
        Weekday::from_str(value).map_err(|_| ParseError::InvalidWeekday {
            value: value.to_string(),
        })
    }

    /// 0 = Monday .. 6 = Sunday
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Weekday::iter().nth(ordinal as usize)
    }

    /// Column of this weekday in the display grid (Monday = 3)
    pub fn grid_column(self) -> u8 {
        self.ordinal() + FIRST_WEEKDAY_GRID_COLUMN
    }

    pub fn from_date(date: NaiveDate) -> Self {
        match date.weekday() {
            chrono::Weekday::Mon => Weekday::Mon,
            chrono::Weekday::Tue => Weekday::Tue,
            chrono::Weekday::Wed => Weekday::Wed,
            chrono::Weekday::Thu => Weekday::Thu,
            chrono::Weekday::Fri => Weekday::Fri,
            chrono::Weekday::Sat => Weekday::Sat,
            chrono::Weekday::Sun => Weekday::Sun,
        }
    }

    /// All seven days, Monday first
    pub fn all() -> impl Iterator<Item = Weekday> {
        Weekday::iter()
    }

    pub fn as_id(self) -> &'static str {
        self.into()
    }
}

/// Parse a wire time ("08:00" or "08:00:00") into a time of day
pub fn parse_time_of_day(field: &'static str, value: &str) -> Result<NaiveTime, ParseError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| ParseError::InvalidTime {
            field,
            value: value.to_string(),
        })
}
