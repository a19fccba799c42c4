//! Planner data service
//!
//! Staffing view over the shared timetable: which active slots lack enough
//! contracted hours, and which have nobody assigned at all.

use crate::model::{NormalizedTimeslot, SlotKey};
use crate::service::{TimetableDataService, TimetableService};
use crate::source::Scope;
use serde::Serialize;

/// Hours of assigned working time below which a slot counts as understaffed
pub const DEFAULT_STAFFING_THRESHOLD: f64 = 4.0;

/// An active slot whose assigned working hours fall short of the threshold
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaffingGap {
    pub key: SlotKey,
    pub name: String,
    pub assigned_hours: f64,
    pub threshold: f64,
    pub missing: f64,
}

#[derive(Debug, Clone)]
pub struct PlannerDataService {
    shared: TimetableService,
    scope: Scope,
    staffing_threshold: f64,
}

impl PlannerDataService {
    pub fn new(shared: TimetableService, scope: Scope) -> Self {
        Self {
            shared,
            scope,
            staffing_threshold: DEFAULT_STAFFING_THRESHOLD,
        }
    }

    /// Negative or non-finite thresholds fall back to zero
    pub fn with_threshold(mut self, hours: f64) -> Self {
        self.staffing_threshold = if hours.is_finite() { hours.max(0.0) } else { 0.0 };
        self
    }

    pub fn threshold(&self) -> f64 {
        self.staffing_threshold
    }

    /// Active slots with less assigned working time than the threshold,
    /// in timetable order
    pub fn slots_needing_staff(&self) -> Vec<StaffingGap> {
        let Some(timetable) = self.get_timetable().into_ready() else {
            return Vec::new();
        };

        timetable
            .active_slots()
            .filter_map(|slot| {
                let assigned_hours = slot.working_hours();
                (assigned_hours < self.staffing_threshold).then(|| StaffingGap {
                    key: slot.key(),
                    name: slot.name.clone(),
                    assigned_hours,
                    threshold: self.staffing_threshold,
                    missing: self.staffing_threshold - assigned_hours,
                })
            })
            .collect()
    }

    /// Active slots without any person
    pub fn unassigned_slots(&self) -> Vec<NormalizedTimeslot> {
        self.get_timetable()
            .into_ready()
            .map(|timetable| {
                timetable
                    .active_slots()
                    .filter(|slot| slot.persons.is_empty())
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl TimetableDataService for PlannerDataService {
    fn shared(&self) -> &TimetableService {
        &self.shared
    }

    fn scope(&self) -> &Scope {
        &self.scope
    }
}
