//! Fetch scope

use crate::records::TimeslotRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Filter under which a timetable is fetched and cached
///
/// The default scope means "everything available". A workplace is only
/// meaningful together with its department, but a workplace-only scope is
/// accepted and matches that workplace in every department.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Scope {
    pub department: Option<String>,
    pub workplace: Option<String>,
}

impl Scope {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn department(department: impl Into<String>) -> Self {
        Self {
            department: Some(department.into()),
            workplace: None,
        }
    }

    pub fn with_workplace(mut self, workplace: impl Into<String>) -> Self {
        self.workplace = Some(workplace.into());
        self
    }

    pub fn is_everything(&self) -> bool {
        self.department.is_none() && self.workplace.is_none()
    }

    /// Whether a raw record falls within this scope
    pub fn matches(&self, record: &TimeslotRecord) -> bool {
        let department_ok = self
            .department
            .as_deref()
            .is_none_or(|d| d == record.department_name);
        let workplace_ok = self
            .workplace
            .as_deref()
            .is_none_or(|w| w == record.workplace_name);
        department_ok && workplace_ok
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.department, &self.workplace) {
            (None, None) => write!(f, "all departments"),
            (Some(d), None) => write!(f, "department '{}'", d),
            (Some(d), Some(w)) => write!(f, "department '{}', workplace '{}'", d, w),
            (None, Some(w)) => write!(f, "workplace '{}'", w),
        }
    }
}
