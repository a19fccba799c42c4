//! Common test utilities and helpers
//!
//! Fixture timetables and helpers that write them to disk the way the
//! backend export would.

#![allow(dead_code)]

use std::io::Write;
use tempfile::NamedTempFile;
use timetable::records::{PersonRecord, TimeslotRecord};

/// A small week across two departments
pub fn week_records() -> Vec<TimeslotRecord> {
    vec![
        TimeslotRecord::new("Department 1", "Arzt", "V1", "MON", "08:00", "12:00")
            .with_person(PersonRecord::new("ABCD", "Max", "Mustermann", 4.0, 4.0)),
        TimeslotRecord::new("Department 1", "Arzt", "V1", "TUE", "08:00", "12:00")
            .with_person(PersonRecord::new("ABCD", "Max", "Mustermann", 4.0, 3.0)),
        TimeslotRecord::new("Department 1", "Arzt", "V2", "MON", "13:00", "16:00")
            .with_disabled(true),
        TimeslotRecord::new("Department 1", "Empfang", "A", "FRI", "07:00", "10:00"),
        TimeslotRecord::new("Department 2", "Test", "V1", "WED", "07:45", "11:45")
            .with_person(PersonRecord::new("EFGH", "Erika", "Musterfrau", 2.0, 2.0)),
    ]
}

/// Write records as a bare JSON array
pub fn write_records(records: &[TimeslotRecord]) -> NamedTempFile {
    write_json(&serde_json::to_value(records).expect("records serialize"))
}

/// Write records inside the backend `{ "data": [...] }` envelope
pub fn write_envelope(records: &[TimeslotRecord]) -> NamedTempFile {
    write_json(&serde_json::json!({ "data": records }))
}

pub fn write_json(value: &serde_json::Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    write!(file, "{}", value).expect("write temp file");
    file.flush().expect("flush temp file");
    file
}

/// Overwrite an existing fixture file in place
pub fn rewrite_records(file: &NamedTempFile, records: &[TimeslotRecord]) {
    let json = serde_json::to_string(records).expect("records serialize");
    std::fs::write(file.path(), json).expect("rewrite temp file");
}

pub fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file.flush().expect("flush config");
    file
}
