//! In-memory timetable source

use super::{Scope, SourceResult, TimetableSource};
use crate::records::TimeslotRecord;
use std::sync::{PoisonError, RwLock};

/// Serves a fixed batch of records, narrowed to the requested scope
///
/// The batch can be swapped with [`MemorySource::replace`]; the next fetch
/// sees the new data.
#[derive(Debug, Default)]
pub struct MemorySource {
    records: RwLock<Vec<TimeslotRecord>>,
}

impl MemorySource {
    pub fn new(records: Vec<TimeslotRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    pub fn replace(&self, records: Vec<TimeslotRecord>) {
        *self.records.write().unwrap_or_else(PoisonError::into_inner) = records;
    }
}

#[async_trait::async_trait]
impl TimetableSource for MemorySource {
    fn name(&self) -> &str {
        "memory"
    }

    async fn fetch(&self, scope: &Scope) -> SourceResult<Vec<TimeslotRecord>> {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        Ok(records
            .iter()
            .filter(|record| scope.matches(record))
            .cloned()
            .collect())
    }
}
