//! Persons assigned to timeslots

use super::error::ParseError;
use crate::records::PersonRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const PERSON_ID_LEN: usize = 4;

/// Validated four character person identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PersonId(String);

impl PersonId {
    pub fn parse(value: &str) -> Result<Self, ParseError> {
        let valid = value.len() == PERSON_ID_LEN && value.chars().all(|c| c.is_ascii_alphanumeric());
        if valid {
            Ok(Self(value.to_string()))
        } else {
            Err(ParseError::InvalidPersonId {
                value: value.to_string(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for PersonId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PersonId {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PersonId> for String {
    fn from(id: PersonId) -> Self {
        id.0
    }
}

impl AsRef<str> for PersonId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for PersonId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A person within one normalized timeslot, keyed by `id`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedPerson {
    pub id: PersonId,
    /// Display only; not guaranteed unique
    pub email: String,
    pub firstname: String,
    pub lastname: String,
    pub working_hours: f64,
    pub actual_hours: f64,
}

impl NormalizedPerson {
    pub fn from_record(record: PersonRecord) -> Result<Self, ParseError> {
        let id = PersonId::parse(&record.id)?;
        let working_hours = validate_hours(&record.id, "working_hours", record.working_hours)?;
        let actual_hours = validate_hours(&record.id, "actual_hours", record.actual_hours)?;

        Ok(Self {
            id,
            email: record.email,
            firstname: record.firstname,
            lastname: record.lastname,
            working_hours,
            actual_hours,
        })
    }

    /// "Firstname Lastname (ID)"
    pub fn fullname(&self) -> String {
        format!("{} {} ({})", self.firstname, self.lastname, self.id)
    }
}

fn validate_hours(person: &str, field: &'static str, value: f64) -> Result<f64, ParseError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ParseError::InvalidHours {
            person: person.to_string(),
            field,
            value,
        })
    }
}
