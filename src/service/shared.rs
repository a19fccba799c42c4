//! Shared timetable cache
//!
//! One [`TimetableService`] owns the cache for every scope. Clones share the
//! same state, so feature services built from a clone observe the same
//! models and the same in-flight fetches.
//!
//! Each scope carries a refresh generation. A fetch remembers the generation
//! it was started for; when it completes, its model only becomes current if
//! no refresh happened in the meantime. Otherwise it is recorded as the last
//! good model and callers that were waiting on it load again.

use super::error::{TimetableError, TimetableResult};
use super::state::TimetableState;
use crate::core::retry::{retry_async, RetryPolicy};
use crate::model::{
    normalize, Conflict, HoursTotal, NormalizedPerson, NormalizedTimetable, SlotFilter,
    SlotSelection, Weekday,
};
use crate::source::{Scope, TimetableSource};
use futures::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type FetchFuture = Shared<BoxFuture<'static, TimetableResult<Arc<NormalizedTimetable>>>>;

struct InFlight {
    generation: u64,
    future: FetchFuture,
}

#[derive(Default)]
struct ScopeEntry {
    generation: u64,
    current: Option<Arc<NormalizedTimetable>>,
    last_good: Option<(u64, Arc<NormalizedTimetable>)>,
    in_flight: Option<InFlight>,
}

struct Inner {
    source: Arc<dyn TimetableSource>,
    retry: RetryPolicy,
    entries: Mutex<HashMap<Scope, ScopeEntry>>,
    fetches: AtomicU64,
}

/// Fetches, normalizes and caches timetables per [`Scope`]
///
/// Concurrent loads of the same scope share one fetch. Loads of different
/// scopes run independently.
#[derive(Clone)]
pub struct TimetableService {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for TimetableService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimetableService")
            .field("source", &self.inner.source.name())
            .field("retry", &self.inner.retry)
            .field("fetches", &self.fetch_count())
            .finish()
    }
}

impl TimetableService {
    pub fn new(source: Arc<dyn TimetableSource>) -> Self {
        Self::with_retry(source, RetryPolicy::default())
    }

    pub fn with_retry(source: Arc<dyn TimetableSource>, retry: RetryPolicy) -> Self {
        Self {
            inner: Arc::new(Inner {
                source,
                retry,
                entries: Mutex::new(HashMap::new()),
                fetches: AtomicU64::new(0),
            }),
        }
    }

    pub fn source_name(&self) -> &str {
        self.inner.source.name()
    }

    /// Whether two handles share the same cache
    pub fn same_cache(&self, other: &TimetableService) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Return the cached model for `scope`, fetching it first if needed
    ///
    /// Joins an in-flight fetch of the same generation instead of starting a
    /// second one. If a refresh supersedes the fetch being awaited, the load
    /// continues with the newer generation so the caller never receives a
    /// stale model. Errors leave the cache as it was.
    pub async fn load_timetable(&self, scope: &Scope) -> TimetableResult<Arc<NormalizedTimetable>> {
        loop {
            let (generation, future) = {
                let mut entries = self.inner.lock_entries();
                let entry = entries.entry(scope.clone()).or_default();

                if let Some(current) = &entry.current {
                    return Ok(Arc::clone(current));
                }

                let generation = entry.generation;
                let future = match &entry.in_flight {
                    Some(in_flight) if in_flight.generation == generation => {
                        log::debug!(
                            "Joining in-flight timetable fetch for {} (generation {})",
                            scope,
                            generation
                        );
                        in_flight.future.clone()
                    }
                    _ => {
                        let future = self.start_fetch(scope.clone(), generation);
                        entry.in_flight = Some(InFlight {
                            generation,
                            future: future.clone(),
                        });
                        future
                    }
                };
                (generation, future)
            };

            let result = future.await;

            if self.inner.generation(scope) == generation {
                return result;
            }
            log::debug!(
                "Timetable fetch for {} was superseded by a refresh, loading again",
                scope
            );
        }
    }

    /// The cached model without triggering a fetch
    pub fn get_timetable(&self, scope: &Scope) -> TimetableState {
        let entries = self.inner.lock_entries();
        match entries.get(scope) {
            Some(ScopeEntry {
                current: Some(current),
                ..
            }) => TimetableState::Ready(Arc::clone(current)),
            Some(ScopeEntry {
                generation,
                in_flight: Some(in_flight),
                ..
            }) if in_flight.generation == *generation => TimetableState::Loading,
            _ => TimetableState::NotLoaded,
        }
    }

    /// Invalidate the cached model for `scope`
    ///
    /// A fetch still running for the old generation completes in the
    /// background; its model is kept as the last good one but never becomes
    /// current again.
    pub fn refresh(&self, scope: &Scope) {
        let mut entries = self.inner.lock_entries();
        let entry = entries.entry(scope.clone()).or_default();
        entry.generation += 1;
        entry.current = None;
        entry.in_flight = None;
        log::info!(
            "Refreshing timetable for {} (generation {})",
            scope,
            entry.generation
        );
    }

    /// Invalidate every cached scope
    pub fn refresh_all(&self) {
        let scopes = self.scopes();
        for scope in &scopes {
            self.refresh(scope);
        }
    }

    /// Refresh `scope` and wait for the new model
    pub async fn reload(&self, scope: &Scope) -> TimetableResult<Arc<NormalizedTimetable>> {
        self.refresh(scope);
        self.load_timetable(scope).await
    }

    /// Last successfully normalized model, kept across refreshes and failures
    pub fn last_good(&self, scope: &Scope) -> Option<Arc<NormalizedTimetable>> {
        let entries = self.inner.lock_entries();
        entries
            .get(scope)
            .and_then(|entry| entry.last_good.as_ref())
            .map(|(_, timetable)| Arc::clone(timetable))
    }

    /// Every scope the cache has seen, sorted
    pub fn scopes(&self) -> Vec<Scope> {
        let entries = self.inner.lock_entries();
        let mut scopes: Vec<Scope> = entries.keys().cloned().collect();
        scopes.sort();
        scopes
    }

    /// Number of fetch cycles started against the source
    pub fn fetch_count(&self) -> u64 {
        self.inner.fetches.load(Ordering::Relaxed)
    }

    /// Slots containing the person, over the current model
    ///
    /// Disabled slots are included, matching `total_hours`.
    pub fn find_by_person(&self, scope: &Scope, id: &str) -> SlotSelection {
        self.select(scope, SlotFilter::Person(id.to_string()))
    }

    /// Active slots on `weekday`, over the current model
    pub fn find_by_weekday(&self, scope: &Scope, weekday: Weekday) -> SlotSelection {
        self.select(
            scope,
            SlotFilter::Weekday {
                weekday,
                include_disabled: false,
            },
        )
    }

    /// Slots on `weekday`, disabled ones included
    pub fn find_all_by_weekday(&self, scope: &Scope, weekday: Weekday) -> SlotSelection {
        self.select(
            scope,
            SlotFilter::Weekday {
                weekday,
                include_disabled: true,
            },
        )
    }

    /// Hours summed over every slot containing the person
    ///
    /// Disabled slots count too. Zero when nothing is loaded or the person is
    /// unknown.
    pub fn total_hours(&self, scope: &Scope, id: &str) -> HoursTotal {
        self.current(scope)
            .map(|timetable| timetable.total_hours(id))
            .unwrap_or_default()
    }

    pub fn conflicts(&self, scope: &Scope) -> Vec<Conflict> {
        self.current(scope)
            .map(|timetable| timetable.conflicts())
            .unwrap_or_default()
    }

    pub fn roster(&self, scope: &Scope) -> Vec<NormalizedPerson> {
        self.current(scope)
            .map(|timetable| timetable.roster())
            .unwrap_or_default()
    }

    fn current(&self, scope: &Scope) -> Option<Arc<NormalizedTimetable>> {
        self.get_timetable(scope).into_ready()
    }

    fn select(&self, scope: &Scope, filter: SlotFilter) -> SlotSelection {
        SlotSelection::new(self.current(scope), filter)
    }

    fn start_fetch(&self, scope: Scope, generation: u64) -> FetchFuture {
        let inner = Arc::clone(&self.inner);
        async move {
            let result = inner.fetch_and_normalize(&scope).await;
            inner.complete(&scope, generation, &result);
            result
        }
        .boxed()
        .shared()
    }
}

impl Inner {
    // The guarded map is only mutated in short critical sections that
    // cannot leave it half-updated, so a poisoned lock is still usable.
    fn lock_entries(&self) -> MutexGuard<'_, HashMap<Scope, ScopeEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn generation(&self, scope: &Scope) -> u64 {
        self.lock_entries()
            .get(scope)
            .map_or(0, |entry| entry.generation)
    }

    async fn fetch_and_normalize(
        &self,
        scope: &Scope,
    ) -> TimetableResult<Arc<NormalizedTimetable>> {
        self.fetches.fetch_add(1, Ordering::Relaxed);
        log::debug!(
            "Fetching timetable for {} from {} source",
            scope,
            self.source.name()
        );

        let records = retry_async("timetable_fetch", self.retry.clone(), || {
            self.source.fetch(scope)
        })
        .await
        .map_err(|source| TimetableError::Fetch {
            scope: scope.clone(),
            source,
        })?;

        let record_count = records.len();
        let timetable =
            normalize(records).map_err(|source| TimetableError::DataConsistency {
                scope: scope.clone(),
                source,
            })?;

        log::debug!(
            "Normalized {} records into {} timeslots for {}",
            record_count,
            timetable.len(),
            scope
        );
        Ok(Arc::new(timetable))
    }

    fn complete(
        &self,
        scope: &Scope,
        generation: u64,
        result: &TimetableResult<Arc<NormalizedTimetable>>,
    ) {
        let mut entries = self.lock_entries();
        let entry = entries.entry(scope.clone()).or_default();

        if entry
            .in_flight
            .as_ref()
            .is_some_and(|in_flight| in_flight.generation == generation)
        {
            entry.in_flight = None;
        }

        match result {
            Ok(timetable) => {
                if entry
                    .last_good
                    .as_ref()
                    .is_none_or(|(good_generation, _)| *good_generation <= generation)
                {
                    entry.last_good = Some((generation, Arc::clone(timetable)));
                }

                if entry.generation == generation {
                    entry.current = Some(Arc::clone(timetable));
                    log::info!("Loaded {} timeslots for {}", timetable.len(), scope);
                } else {
                    log::debug!(
                        "Discarding superseded timetable for {} (generation {}, current {})",
                        scope,
                        generation,
                        entry.generation
                    );
                }
            }
            Err(e) => log::warn!("Timetable load for {} failed: {}", scope, e),
        }
    }
}
