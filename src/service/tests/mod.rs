//! Service tests and shared test doubles


use crate::core::retry::RetryPolicy;
use crate::records::{PersonRecord, TimeslotRecord};
use crate::source::{Scope, SourceError, SourceResult, TimetableSource};
use crate::service::TimetableService;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

/// Source whose answers are scripted by the test
///
/// Records are captured when the fetch starts; a gated source then waits for
/// a permit before answering, so tests can hold a fetch in flight.
pub(super) struct ScriptedSource {
    records: Mutex<Vec<TimeslotRecord>>,
    failures: AtomicUsize,
    calls: AtomicUsize,
    gate: Option<Semaphore>,
}

impl ScriptedSource {
    pub fn new(records: Vec<TimeslotRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            failures: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
            gate: None,
        }
    }

    pub fn gated(records: Vec<TimeslotRecord>) -> Self {
        Self {
            gate: Some(Semaphore::new(0)),
            ..Self::new(records)
        }
    }

    pub fn replace(&self, records: Vec<TimeslotRecord>) {
        *self.records.lock().unwrap() = records;
    }

    pub fn fail_next(&self, count: usize) {
        self.failures.store(count, Ordering::SeqCst);
    }

    pub fn release(&self, permits: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(permits);
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl TimetableSource for ScriptedSource {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn fetch(&self, scope: &Scope) -> SourceResult<Vec<TimeslotRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let records: Vec<TimeslotRecord> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|record| scope.matches(record))
            .cloned()
            .collect();

        if let Some(gate) = &self.gate {
            gate.acquire()
                .await
                .map_err(|_| SourceError::unavailable("gate closed"))?
                .forget();
        }

        let failing = self
            .failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(SourceError::unavailable("backend returned 503"));
        }
        Ok(records)
    }
}

pub(super) fn week_records() -> Vec<TimeslotRecord> {
    vec![
        TimeslotRecord::new("Department 1", "Arzt", "V1", "MON", "08:00", "12:00")
            .with_person(PersonRecord::new("ABCD", "Max", "Mustermann", 4.0, 4.0)),
        TimeslotRecord::new("Department 1", "Arzt", "V1", "TUE", "08:00", "12:00")
            .with_person(PersonRecord::new("ABCD", "Max", "Mustermann", 4.0, 3.0)),
        TimeslotRecord::new("Department 1", "Arzt", "V2", "MON", "13:00", "16:00")
            .with_disabled(true),
        TimeslotRecord::new("Department 2", "Test", "V1", "WED", "07:45", "11:45")
            .with_person(PersonRecord::new("EFGH", "Erika", "Musterfrau", 4.0, 4.0)),
    ]
}

pub(super) fn service_for(source: &Arc<ScriptedSource>) -> TimetableService {
    TimetableService::with_retry(source.clone(), RetryPolicy::none())
}
