//! Commands run end to end against a timetable file

use crate::common::{week_records, write_envelope, write_records};
use std::sync::Arc;
use timetable::app::cli::{Command, OutputFormat};
use timetable::app::config::TimetableConfig;
use timetable::app::display::Renderer;
use timetable::app::startup::execute;
use timetable::core::retry::RetryPolicy;
use timetable::model::PersonId;
use timetable::service::{TimetableError, TimetableService};
use timetable::source::JsonFileSource;

fn service_for(config: &TimetableConfig) -> TimetableService {
    TimetableService::with_retry(
        Arc::new(JsonFileSource::new(config.data_file().unwrap())),
        RetryPolicy::none(),
    )
}

async fn run_json(config: &TimetableConfig, command: Command) -> serde_json::Value {
    let rendered = execute(
        &command,
        service_for(config),
        config,
        &Renderer::new(OutputFormat::Json, false),
    )
    .await
    .unwrap();
    serde_json::from_str(&rendered.to_string()).unwrap()
}

#[tokio::test]
async fn test_unassigned_slots_from_envelope() {
    let file = write_envelope(&week_records());
    let config = TimetableConfig {
        data_file: Some(file.path().to_path_buf()),
        ..TimetableConfig::default()
    };

    let value = run_json(&config, Command::Unassigned).await;

    // The disabled V2 slot is not active and so never reported
    let slots = value.as_array().unwrap();
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0]["workplace"], "Empfang");
    assert_eq!(slots[0]["weekday"], "FRI");
}

#[tokio::test]
async fn test_person_slots_in_week_order() {
    let file = write_records(&week_records());
    let config = TimetableConfig {
        data_file: Some(file.path().to_path_buf()),
        ..TimetableConfig::default()
    };

    let value = run_json(
        &config,
        Command::Person {
            id: PersonId::parse("ABCD").unwrap(),
        },
    )
    .await;

    let days: Vec<&str> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|slot| slot["weekday"].as_str().unwrap())
        .collect();
    assert_eq!(days, vec!["MON", "TUE"]);
}

#[tokio::test]
async fn test_days_lists_every_weekday() {
    let file = write_records(&week_records());
    let config = TimetableConfig {
        data_file: Some(file.path().to_path_buf()),
        department: Some("Department 1".to_string()),
        ..TimetableConfig::default()
    };

    let value = run_json(&config, Command::Days).await;

    let columns = value.as_array().unwrap();
    assert_eq!(columns.len(), 7);
    assert_eq!(columns[0]["weekday"], "MON");
    assert_eq!(columns[0]["grid_column"], 3);
    assert_eq!(columns[0]["slots"].as_array().unwrap().len(), 2);
    assert!(columns[2]["slots"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_text_output_for_conflicts() {
    let mut records = week_records();
    records.push(
        timetable::records::TimeslotRecord::new(
            "Department 2",
            "Test",
            "V9",
            "MON",
            "09:00",
            "10:00",
        )
        .with_person(timetable::records::PersonRecord::new(
            "ABCD",
            "Max",
            "Mustermann",
            1.0,
            1.0,
        )),
    );
    let file = write_records(&records);
    let config = TimetableConfig {
        data_file: Some(file.path().to_path_buf()),
        ..TimetableConfig::default()
    };

    let rendered = execute(
        &Command::Conflicts,
        service_for(&config),
        &config,
        &Renderer::new(OutputFormat::Text, false),
    )
    .await
    .unwrap();
    let text = rendered.to_string();

    assert!(text.contains("ABCD"), "got:\n{text}");
    assert!(text.contains("Arzt"));
    assert!(text.contains("Test"));
}

#[tokio::test]
async fn test_inconsistent_file_is_reported() {
    let mut records = week_records();
    records.push(records[0].clone());
    let file = write_records(&records);
    let config = TimetableConfig {
        data_file: Some(file.path().to_path_buf()),
        ..TimetableConfig::default()
    };

    let err = execute(
        &Command::Roster,
        service_for(&config),
        &config,
        &Renderer::new(OutputFormat::Text, false),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, TimetableError::DataConsistency { .. }));
}
