//! Output rendering for CLI results
//!
//! Text output is built as prettytable tables, colored through
//! [`StyleRole`] when color is enabled. JSON output is pretty-printed
//! `serde_json`.

use super::cli::OutputFormat;
use crate::core::styles::StyleRole;
use crate::features::{AbsenceImpact, RosterEntry, StaffingGap, TimetableGrid, WeekdayColumn};
use crate::model::{Conflict, HoursTotal, NormalizedTimeslot, PersonId, Weekday};
use prettytable::{format, Cell, Row, Table};
use serde::Serialize;
use std::fmt;

/// A rendered result, ready to print
#[derive(Debug)]
pub enum Rendered {
    Table(Table),
    Text(String),
}

impl Rendered {
    pub fn print(&self) {
        match self {
            Rendered::Table(table) => {
                table.printstd();
            }
            Rendered::Text(text) => println!("{}", text),
        }
    }
}

impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rendered::Table(table) => write!(f, "{}", table),
            Rendered::Text(text) => f.write_str(text),
        }
    }
}

pub struct Renderer {
    format: OutputFormat,
    color: bool,
}

impl Renderer {
    pub fn new(format: OutputFormat, color: bool) -> Self {
        Self { format, color }
    }

    pub fn slots(&self, slots: &[NormalizedTimeslot]) -> Rendered {
        if let Some(json) = self.json(&slots) {
            return json;
        }

        let mut table = self.table(&[
            "Day", "Start", "End", "Department", "Workplace", "Slot", "Persons",
        ]);
        for slot in slots {
            let role = if slot.disabled {
                StyleRole::Disabled
            } else {
                StyleRole::Value
            };
            let persons = slot
                .persons
                .iter()
                .map(|p| p.id.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            table.add_row(Row::new(vec![
                self.cell(slot.weekday.as_id(), StyleRole::Slot),
                self.cell(&slot.start.format("%H:%M").to_string(), role),
                self.cell(&slot.end.format("%H:%M").to_string(), role),
                self.cell(&slot.department, role),
                self.cell(&slot.workplace, role),
                self.cell(&slot.name, role),
                self.cell(&persons, StyleRole::Person),
            ]));
        }
        Rendered::Table(table)
    }

    pub fn hours(&self, person: &PersonId, hours: HoursTotal) -> Rendered {
        #[derive(Serialize)]
        struct PersonHours<'a> {
            person: &'a PersonId,
            #[serde(flatten)]
            hours: HoursTotal,
        }

        if let Some(json) = self.json(&PersonHours { person, hours }) {
            return json;
        }

        let mut table = self.table(&["Person", "Working", "Actual"]);
        table.add_row(Row::new(vec![
            self.cell(person.as_str(), StyleRole::Person),
            self.cell(&format_hours(hours.working), StyleRole::Value),
            self.cell(&format_hours(hours.actual), StyleRole::Value),
        ]));
        Rendered::Table(table)
    }

    pub fn staffing_gaps(&self, gaps: &[StaffingGap]) -> Rendered {
        if let Some(json) = self.json(&gaps) {
            return json;
        }

        let mut table = self.table(&[
            "Day", "Start", "Workplace", "Slot", "Assigned", "Missing",
        ]);
        for gap in gaps {
            table.add_row(Row::new(vec![
                self.cell(gap.key.weekday.as_id(), StyleRole::Slot),
                self.cell(&gap.key.start.format("%H:%M").to_string(), StyleRole::Value),
                self.cell(&gap.key.workplace, StyleRole::Value),
                self.cell(&gap.name, StyleRole::Value),
                self.cell(&format_hours(gap.assigned_hours), StyleRole::Value),
                self.cell(&format_hours(gap.missing), StyleRole::Warning),
            ]));
        }
        Rendered::Table(table)
    }

    /// One row per slot group, one column per weekday
    pub fn grid(&self, grid: &TimetableGrid) -> Rendered {
        if let Some(json) = self.json(grid) {
            return json;
        }

        let mut titles = vec!["Row", "Workplace", "Slot"];
        titles.extend(Weekday::all().map(Weekday::as_id));
        let mut table = self.table(&titles);

        for workplace in &grid.workplaces {
            for group in &workplace.slot_groups {
                let mut days: Vec<Vec<String>> = vec![Vec::new(); 7];
                let mut disabled = [false; 7];
                for cell in &group.cells {
                    let day = usize::from(cell.weekday.ordinal());
                    let persons = cell
                        .persons
                        .iter()
                        .map(PersonId::as_str)
                        .collect::<Vec<_>>()
                        .join(" ");
                    days[day].push(
                        format!(
                            "{}-{} {}",
                            cell.start.format("%H:%M"),
                            cell.end.format("%H:%M"),
                            persons
                        )
                        .trim_end()
                        .to_string(),
                    );
                    disabled[day] = cell.disabled;
                }

                let mut row = vec![
                    self.cell(&group.grid_row.to_string(), StyleRole::Value),
                    self.cell(
                        &format!("{}/{}", workplace.department, workplace.name),
                        StyleRole::Header,
                    ),
                    self.cell(&group.name, StyleRole::Slot),
                ];
                for (day, entries) in days.iter().enumerate() {
                    let role = if disabled[day] {
                        StyleRole::Disabled
                    } else {
                        StyleRole::Value
                    };
                    row.push(self.cell(&entries.join("\n"), role));
                }
                table.add_row(Row::new(row));
            }
        }
        Rendered::Table(table)
    }

    pub fn weekday_columns(&self, columns: &[WeekdayColumn]) -> Rendered {
        if let Some(json) = self.json(&columns) {
            return json;
        }

        let mut table = self.table(&["Day", "Column", "Slots"]);
        for column in columns {
            let slots = column
                .slots
                .iter()
                .map(|slot| {
                    format!(
                        "{}/{} {} {}-{}{}",
                        slot.department,
                        slot.workplace,
                        slot.name,
                        slot.start.format("%H:%M"),
                        slot.end.format("%H:%M"),
                        if slot.disabled { " (disabled)" } else { "" }
                    )
                })
                .collect::<Vec<_>>()
                .join("\n");
            table.add_row(Row::new(vec![
                self.cell(column.weekday.as_id(), StyleRole::Slot),
                self.cell(&column.grid_column.to_string(), StyleRole::Value),
                self.cell(&slots, StyleRole::Value),
            ]));
        }
        Rendered::Table(table)
    }

    pub fn roster(&self, roster: &[RosterEntry]) -> Rendered {
        if let Some(json) = self.json(&roster) {
            return json;
        }

        let mut table = self.table(&["ID", "Name", "Email"]);
        for entry in roster {
            table.add_row(Row::new(vec![
                self.cell(entry.id.as_str(), StyleRole::Person),
                self.cell(&entry.fullname, StyleRole::Value),
                self.cell(&entry.email, StyleRole::Value),
            ]));
        }
        Rendered::Table(table)
    }

    pub fn conflicts(&self, conflicts: &[Conflict]) -> Rendered {
        if let Some(json) = self.json(&conflicts) {
            return json;
        }

        let mut table = self.table(&["Person", "Slot", "Overlaps"]);
        for conflict in conflicts {
            table.add_row(Row::new(vec![
                self.cell(conflict.person.as_str(), StyleRole::Person),
                self.cell(&conflict.first.to_string(), StyleRole::Warning),
                self.cell(&conflict.second.to_string(), StyleRole::Warning),
            ]));
        }
        Rendered::Table(table)
    }

    pub fn absence_impact(&self, impact: &AbsenceImpact) -> Rendered {
        if let Some(json) = self.json(impact) {
            return json;
        }

        let mut table = self.table(&["Date", "Day", "Slot", "Working", "Actual"]);
        for slot in &impact.affected {
            table.add_row(Row::new(vec![
                self.cell(&slot.date.to_string(), StyleRole::Value),
                self.cell(slot.key.weekday.as_id(), StyleRole::Slot),
                self.cell(&format!("{} {}", slot.key, slot.name), StyleRole::Value),
                self.cell(&format_hours(slot.working_hours), StyleRole::Value),
                self.cell(&format_hours(slot.actual_hours), StyleRole::Value),
            ]));
        }

        let ranges = impact
            .ranges
            .iter()
            .map(|range| {
                if range.start == range.end {
                    range.start.to_string()
                } else {
                    format!("{}..{}", range.start, range.end)
                }
            })
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(Row::new(vec![
            self.cell(&ranges, StyleRole::Header),
            self.cell("", StyleRole::Value),
            self.cell(&format!("Total for {}", impact.person), StyleRole::Header),
            self.cell(&format_hours(impact.hours.working), StyleRole::Warning),
            self.cell(&format_hours(impact.hours.actual), StyleRole::Warning),
        ]));
        Rendered::Table(table)
    }

    fn json<T: Serialize + ?Sized>(&self, value: &T) -> Option<Rendered> {
        if self.format != OutputFormat::Json {
            return None;
        }
        let text = serde_json::to_string_pretty(value)
            .unwrap_or_else(|e| serde_json::json!({ "error": e.to_string() }).to_string());
        Some(Rendered::Text(text))
    }

    fn table(&self, titles: &[&str]) -> Table {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
        table.set_titles(Row::new(
            titles
                .iter()
                .map(|title| self.cell(title, StyleRole::Header))
                .collect(),
        ));
        table
    }

    fn cell(&self, text: &str, role: StyleRole) -> Cell {
        let cell = Cell::new(text);
        match role.to_prettytable_spec() {
            Some(spec) if self.color => cell.style_spec(&spec),
            _ => cell,
        }
    }
}

fn format_hours(hours: f64) -> String {
    format!("{:.2}", hours)
}
