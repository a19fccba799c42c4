//! Backend Record Types
//!
//! Wire-level shape of a timeslot and its persons exactly as the external
//! data source delivers them. These types carry no validation; the
//! `model` module turns a batch of them into a consistent timetable.
//!
//! ```rust
//! use timetable::records::TimeslotRecord;
//!
//! let json = r#"{
//!     "department_name": "Department 1",
//!     "workplace_name": "Arzt",
//!     "name": "V1",
//!     "weekday_id": "MON",
//!     "start_time": "08:00",
//!     "end_time": "12:00",
//!     "persons": []
//! }"#;
//! let record: TimeslotRecord = serde_json::from_str(json).unwrap();
//! assert_eq!(record.workplace_name, "Arzt");
//! assert!(record.disabled.is_none());
//! ```

use serde::{Deserialize, Serialize};

/// A timeslot as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeslotRecord {
    pub department_name: String,
    pub workplace_name: String,
    /// Slot name (e.g. "V1"); several weekdays usually share one name
    pub name: String,
    /// Three letter weekday identifier ("MON".."SUN")
    pub weekday_id: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    #[serde(default)]
    pub persons: Vec<PersonRecord>,
}

/// A person as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub email: String,
    pub firstname: String,
    pub lastname: String,
    /// Four character identifier
    pub id: String,
    /// Contracted hours
    pub working_hours: f64,
    /// Hours actually scheduled
    pub actual_hours: f64,
}

impl TimeslotRecord {
    /// Create a record with no persons assigned
    pub fn new(
        department_name: impl Into<String>,
        workplace_name: impl Into<String>,
        name: impl Into<String>,
        weekday_id: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            department_name: department_name.into(),
            workplace_name: workplace_name.into(),
            name: name.into(),
            weekday_id: weekday_id.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
            disabled: None,
            persons: Vec::new(),
        }
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = Some(disabled);
        self
    }

    pub fn with_person(mut self, person: PersonRecord) -> Self {
        self.persons.push(person);
        self
    }
}

impl PersonRecord {
    pub fn new(
        id: impl Into<String>,
        firstname: impl Into<String>,
        lastname: impl Into<String>,
        working_hours: f64,
        actual_hours: f64,
    ) -> Self {
        let firstname = firstname.into();
        let lastname = lastname.into();
        Self {
            email: format!(
                "{}.{}@example.com",
                firstname.to_lowercase(),
                lastname.to_lowercase()
            ),
            firstname,
            lastname,
            id: id.into(),
            working_hours,
            actual_hours,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }
}
