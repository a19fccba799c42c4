//! Service error types

use crate::core::error_handling::ContextualError;
use crate::model::ConsistencyError;
use crate::source::{Scope, SourceError};
use thiserror::Error;

/// Result type alias for timetable service operations
pub type TimetableResult<T> = std::result::Result<T, TimetableError>;

/// Failure of a load or reload
///
/// `Clone` because one result is handed to every caller awaiting the same
/// in-flight fetch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimetableError {
    /// The source could not be reached or reported a failure
    #[error("Failed to fetch timetable for {scope}: {source}")]
    Fetch {
        scope: Scope,
        #[source]
        source: SourceError,
    },

    /// The fetched records do not form a consistent timetable
    #[error("Inconsistent timetable data for {scope}: {source}")]
    DataConsistency {
        scope: Scope,
        #[source]
        source: ConsistencyError,
    },
}

impl TimetableError {
    pub fn scope(&self) -> &Scope {
        match self {
            TimetableError::Fetch { scope, .. } | TimetableError::DataConsistency { scope, .. } => {
                scope
            }
        }
    }

    /// Whether a single field failed to parse
    pub fn is_parse_error(&self) -> bool {
        matches!(self, TimetableError::DataConsistency { source, .. } if source.is_parse_error())
    }
}

impl ContextualError for TimetableError {
    fn is_user_actionable(&self) -> bool {
        matches!(
            self,
            TimetableError::DataConsistency { .. }
                | TimetableError::Fetch {
                    source: SourceError::Io { .. } | SourceError::Decode { .. },
                    ..
                }
        )
    }

    fn user_message(&self) -> Option<String> {
        match self {
            TimetableError::DataConsistency { source, .. } => Some(source.to_string()),
            TimetableError::Fetch {
                source: source @ (SourceError::Io { .. } | SourceError::Decode { .. }),
                ..
            } => Some(source.to_string()),
            TimetableError::Fetch { .. } => None,
        }
    }
}

/// Misuse of the process-wide service registry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("A timetable service is already installed")]
    AlreadyInstalled,

    #[error("No timetable service installed")]
    NotInstalled,
}

impl ContextualError for RegistryError {
    fn is_user_actionable(&self) -> bool {
        false
    }

    fn user_message(&self) -> Option<String> {
        None
    }
}
