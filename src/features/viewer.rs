//! Viewer data service
//!
//! Projects the shared timetable onto a week grid: one column per weekday
//! and one row per slot name, grouped by workplace in backend order. Grid coordinates are
//! 1-based CSS-grid style lines; the first two columns and the first row are
//! reserved for headers.

use crate::model::{NormalizedTimeslot, PersonId, Weekday};
use crate::service::{TimetableDataService, TimetableService};
use crate::source::Scope;
use chrono::NaiveTime;
use serde::Serialize;
use std::collections::HashMap;
use std::hash::Hash;

/// Row counter value before the first timeslot is placed
pub const GRID_ROW_ORIGIN: u32 = 2;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekdayColumn {
    pub weekday: Weekday,
    pub grid_column: u8,
    pub slots: Vec<NormalizedTimeslot>,
}

/// One timeslot placed in the grid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridCell {
    pub weekday: Weekday,
    pub grid_column: u8,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub disabled: bool,
    pub persons: Vec<PersonId>,
}

/// All timeslots of one slot name within a workplace, sharing a grid row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotGroup {
    pub name: String,
    pub grid_row: u32,
    pub cells: Vec<GridCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkplaceRow {
    pub department: String,
    pub name: String,
    pub grid_row_start: u32,
    /// Exclusive
    pub grid_row_end: u32,
    pub slot_groups: Vec<SlotGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimetableGrid {
    pub workplaces: Vec<WorkplaceRow>,
    /// Largest `grid_row_end`, zero for an empty grid
    pub full_height: u32,
}

impl TimetableGrid {
    pub fn is_empty(&self) -> bool {
        self.workplaces.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ViewerDataService {
    shared: TimetableService,
    scope: Scope,
    show_disabled: bool,
}

impl ViewerDataService {
    pub fn new(shared: TimetableService, scope: Scope) -> Self {
        Self {
            shared,
            scope,
            show_disabled: true,
        }
    }

    pub fn with_show_disabled(mut self, show_disabled: bool) -> Self {
        self.show_disabled = show_disabled;
        self
    }

    pub fn show_disabled(&self) -> bool {
        self.show_disabled
    }

    /// All seven weekdays, Monday first, each with its slots
    pub fn weekday_columns(&self) -> Vec<WeekdayColumn> {
        Weekday::all()
            .map(|weekday| {
                let selection = if self.show_disabled {
                    self.find_all_by_weekday(weekday)
                } else {
                    self.find_by_weekday(weekday)
                };
                WeekdayColumn {
                    weekday,
                    grid_column: weekday.grid_column(),
                    slots: selection.to_vec(),
                }
            })
            .collect()
    }

    /// Grid layout of the current model
    ///
    /// Workplaces and slot groups keep the order in which the backend first
    /// delivered them. The row counter starts at [`GRID_ROW_ORIGIN`] and
    /// advances once per timeslot; a slot group takes the counter value after
    /// its own timeslots. A workplace spans `[first group row, last group row
    /// + 1]` and the counter resumes one row below that end.
    pub fn workplace_grid(&self) -> TimetableGrid {
        let Some(timetable) = self.get_timetable().into_ready() else {
            return TimetableGrid::default();
        };

        let visible = timetable
            .slots_in_backend_order()
            .filter(|slot| self.show_disabled || slot.is_active());
        let grouped = group_in_order(visible, |slot| {
            (slot.department.as_str(), slot.workplace.as_str())
        });

        let mut counter = GRID_ROW_ORIGIN;
        let mut workplaces = Vec::with_capacity(grouped.len());

        for ((department, workplace), slots) in grouped {
            let slot_groups: Vec<SlotGroup> = group_in_order(slots, |slot| slot.name.as_str())
                .into_iter()
                .map(|(name, slots)| {
                    counter += slots.len() as u32;
                    SlotGroup {
                        name: name.to_string(),
                        grid_row: counter,
                        cells: slots.into_iter().map(grid_cell).collect(),
                    }
                })
                .collect();

            // Groups are never empty, so rows strictly increase
            let grid_row_start = slot_groups.first().map_or(counter, |group| group.grid_row);
            let grid_row_end = slot_groups.last().map_or(counter, |group| group.grid_row) + 1;
            workplaces.push(WorkplaceRow {
                department: department.to_string(),
                name: workplace.to_string(),
                grid_row_start,
                grid_row_end,
                slot_groups,
            });
            counter = grid_row_end + 1;
        }

        let full_height = workplaces
            .iter()
            .map(|workplace| workplace.grid_row_end)
            .max()
            .unwrap_or(0);

        TimetableGrid {
            workplaces,
            full_height,
        }
    }
}

/// Group items by key, groups and their members in first-seen order
fn group_in_order<T, K, F>(items: impl IntoIterator<Item = T>, key: F) -> Vec<(K, Vec<T>)>
where
    K: Eq + Hash + Copy,
    F: Fn(&T) -> K,
{
    let mut positions: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<T>)> = Vec::new();
    for item in items {
        let k = key(&item);
        let position = *positions.entry(k).or_insert_with(|| {
            groups.push((k, Vec::new()));
            groups.len() - 1
        });
        groups[position].1.push(item);
    }
    groups
}

fn grid_cell(slot: &NormalizedTimeslot) -> GridCell {
    GridCell {
        weekday: slot.weekday,
        grid_column: slot.weekday.grid_column(),
        start: slot.start,
        end: slot.end,
        disabled: slot.disabled,
        persons: slot.persons.iter().map(|person| person.id.clone()).collect(),
    }
}

impl TimetableDataService for ViewerDataService {
    fn shared(&self) -> &TimetableService {
        &self.shared
    }

    fn scope(&self) -> &Scope {
        &self.scope
    }
}
