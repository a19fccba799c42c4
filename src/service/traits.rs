//! Capability trait shared by the specialized data services

use super::error::TimetableResult;
use super::shared::TimetableService;
use super::state::TimetableState;
use crate::model::{Conflict, HoursTotal, NormalizedTimetable, SlotSelection, Weekday};
use crate::source::Scope;
use async_trait::async_trait;
use std::sync::Arc;

/// Common timetable operations over one fixed scope
///
/// Implementors only say which shared cache and which scope they work on;
/// every operation delegates to the [`TimetableService`], so all modules
/// bound to the same scope see the same model.
#[async_trait]
pub trait TimetableDataService: Send + Sync {
    fn shared(&self) -> &TimetableService;

    fn scope(&self) -> &Scope;

    async fn load_timetable(&self) -> TimetableResult<Arc<NormalizedTimetable>> {
        self.shared().load_timetable(self.scope()).await
    }

    fn get_timetable(&self) -> TimetableState {
        self.shared().get_timetable(self.scope())
    }

    fn refresh(&self) {
        self.shared().refresh(self.scope())
    }

    async fn reload(&self) -> TimetableResult<Arc<NormalizedTimetable>> {
        self.shared().reload(self.scope()).await
    }

    fn find_by_person(&self, id: &str) -> SlotSelection {
        self.shared().find_by_person(self.scope(), id)
    }

    fn find_by_weekday(&self, weekday: Weekday) -> SlotSelection {
        self.shared().find_by_weekday(self.scope(), weekday)
    }

    fn find_all_by_weekday(&self, weekday: Weekday) -> SlotSelection {
        self.shared().find_all_by_weekday(self.scope(), weekday)
    }

    fn total_hours(&self, id: &str) -> HoursTotal {
        self.shared().total_hours(self.scope(), id)
    }

    fn conflicts(&self) -> Vec<Conflict> {
        self.shared().conflicts(self.scope())
    }
}
