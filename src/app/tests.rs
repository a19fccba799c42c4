//! Tests for configuration, command dispatch and rendering

use super::cli::{Args, Command, OutputFormat};
use super::config::{ConfigError, TimetableConfig};
use super::display::{Rendered, Renderer};
use super::startup::execute;
use crate::core::error_handling::ContextualError;
use crate::core::retry::RetryPolicy;
use crate::model::{PersonId, Weekday};
use crate::records::{PersonRecord, TimeslotRecord};
use crate::service::{TimetableError, TimetableService};
use crate::source::{JsonFileSource, MemorySource, Scope};
use chrono::NaiveDate;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::NamedTempFile;

fn records() -> Vec<TimeslotRecord> {
    vec![
        TimeslotRecord::new("Department 1", "Arzt", "V1", "MON", "08:00", "12:00")
            .with_person(PersonRecord::new("ABCD", "Max", "Mustermann", 4.0, 4.0)),
        TimeslotRecord::new("Department 1", "Arzt", "V1", "TUE", "08:00", "12:00")
            .with_person(PersonRecord::new("ABCD", "Max", "Mustermann", 4.0, 3.0)),
        TimeslotRecord::new("Department 1", "Arzt", "V2", "MON", "13:00", "16:00")
            .with_disabled(true),
        TimeslotRecord::new("Department 2", "Test", "V1", "WED", "07:45", "11:45")
            .with_person(PersonRecord::new("EFGH", "Erika", "Musterfrau", 2.0, 2.0)),
    ]
}

fn memory_service() -> TimetableService {
    TimetableService::with_retry(Arc::new(MemorySource::new(records())), RetryPolicy::none())
}

fn json_renderer() -> Renderer {
    Renderer::new(OutputFormat::Json, false)
}

fn as_json(rendered: &Rendered) -> serde_json::Value {
    serde_json::from_str(&rendered.to_string()).unwrap()
}

#[test]
fn test_config_defaults() {
    let config = TimetableConfig::from_toml_str("").unwrap();

    assert_eq!(config, TimetableConfig::default());
    assert_eq!(config.fetch, RetryPolicy::default());
    assert!(config.show_disabled);
    assert_eq!(config.scope(), Scope::all());
}

#[test]
fn test_config_file_values() {
    let config = TimetableConfig::from_toml_str(
        r#"
        log-level = "debug"
        log-format = "json"
        log-file = "none"
        color = false
        data-file = "/srv/timetable/week.json"
        department = "Department 1"

        [fetch]
        attempts = 5
        delay-ms = 0

        [planner]
        staffing-threshold = 3

        [viewer]
        show-disabled = false
        "#,
    )
    .unwrap();

    assert_eq!(config.log_level.as_deref(), Some("debug"));
    assert_eq!(config.log_format.as_deref(), Some("json"));
    assert_eq!(config.log_file, None);
    assert_eq!(config.color, Some(false));
    assert_eq!(
        config.data_file().unwrap(),
        PathBuf::from("/srv/timetable/week.json").as_path()
    );
    assert_eq!(config.scope(), Scope::department("Department 1"));
    assert_eq!(config.fetch.max_attempts, 5);
    assert_eq!(config.fetch.delay, Duration::ZERO);
    assert_eq!(config.staffing_threshold, 3.0);
    assert!(!config.show_disabled);
}

#[test]
fn test_config_rejects_bad_values() {
    let cases = [
        ("color = \"yes\"", "color"),
        ("[fetch]\nattempts = 0", "fetch.attempts"),
        ("[fetch]\ndelay-ms = -5", "fetch.delay-ms"),
        ("[planner]\nstaffing-threshold = -1.5", "planner.staffing-threshold"),
        ("[viewer]\nshow-disabled = 1", "viewer.show-disabled"),
        ("department = 7", "department"),
    ];

    for (toml, key) in cases {
        match TimetableConfig::from_toml_str(toml) {
            Err(ConfigError::Invalid { key: got, .. }) => assert_eq!(got, key, "for {toml:?}"),
            other => panic!("expected invalid {key}, got {other:?}"),
        }
    }

    assert!(matches!(
        TimetableConfig::from_toml_str("log-level = "),
        Err(ConfigError::Parse { .. })
    ));
}

#[test]
fn test_missing_data_file_is_actionable() {
    let err = TimetableConfig::default().data_file().unwrap_err();
    assert!(err.is_user_actionable());
    assert!(err.user_message().unwrap().contains("--data"));
}

#[tokio::test]
async fn test_load_explicit_config_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "workplace = \"Arzt\"\n[fetch]\nattempts = 2").unwrap();

    let config = TimetableConfig::load(Some(file.path())).await.unwrap();
    assert_eq!(config.workplace.as_deref(), Some("Arzt"));
    assert_eq!(config.fetch.max_attempts, 2);
}

#[tokio::test]
async fn test_load_missing_explicit_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    let err = TimetableConfig::load(Some(&path)).await.unwrap_err();
    assert_eq!(err, ConfigError::NotFound { path });
}

#[test]
fn test_command_line_overrides_file() {
    let mut config = TimetableConfig::from_toml_str(
        "log-level = \"warn\"\ncolor = true\ndepartment = \"Department 2\"\nlog-file = \"/tmp/tt.log\"",
    )
    .unwrap();
    let args = Args::try_parse_from([
        "timetable",
        "--log-level",
        "trace",
        "--no-color",
        "--department",
        "Department 1",
        "--log-file",
        "-",
        "roster",
    ])
    .unwrap();

    config.apply_args(&args);

    assert_eq!(config.log_level.as_deref(), Some("trace"));
    assert_eq!(config.color, Some(false));
    assert_eq!(config.department.as_deref(), Some("Department 1"));
    assert_eq!(config.log_file, None);
}

#[test]
fn test_unset_flags_keep_file_values() {
    let mut config =
        TimetableConfig::from_toml_str("log-level = \"warn\"\nworkplace = \"Arzt\"").unwrap();
    let args = Args::try_parse_from(["timetable", "grid"]).unwrap();

    config.apply_args(&args);

    assert_eq!(config.log_level.as_deref(), Some("warn"));
    assert_eq!(config.workplace.as_deref(), Some("Arzt"));
    assert_eq!(config.color, None);
}

#[tokio::test]
async fn test_execute_weekday_as_json() {
    let config = TimetableConfig::default();
    let command = Command::Weekday {
        day: Weekday::Mon,
        include_disabled: false,
    };

    let rendered = execute(&command, memory_service(), &config, &json_renderer())
        .await
        .unwrap();
    let value = as_json(&rendered);

    let slots = value.as_array().unwrap();
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0]["weekday"], "MON");
    assert_eq!(slots[0]["name"], "V1");
    assert_eq!(slots[0]["persons"][0]["id"], "ABCD");
}

#[tokio::test]
async fn test_execute_respects_configured_scope() {
    let mut config = TimetableConfig::default();
    config.department = Some("Department 2".to_string());

    let rendered = execute(&Command::Roster, memory_service(), &config, &json_renderer())
        .await
        .unwrap();
    let value = as_json(&rendered);

    let ids: Vec<&str> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["EFGH"]);
}

#[tokio::test]
async fn test_execute_hours_and_threshold_override() {
    let config = TimetableConfig::default();
    let service = memory_service();

    let hours = execute(
        &Command::Hours {
            id: PersonId::parse("ABCD").unwrap(),
        },
        service.clone(),
        &config,
        &json_renderer(),
    )
    .await
    .unwrap();
    let value = as_json(&hours);
    assert_eq!(value["person"], "ABCD");
    assert_eq!(value["working"], 8.0);
    assert_eq!(value["actual"], 7.0);

    let gaps = execute(
        &Command::Understaffed {
            threshold: Some(3.0),
        },
        service.clone(),
        &config,
        &json_renderer(),
    )
    .await
    .unwrap();
    let value = as_json(&gaps);
    let gaps = value.as_array().unwrap();
    assert_eq!(gaps.len(), 1);
    assert_eq!(gaps[0]["key"]["workplace"], "Test");
    assert_eq!(gaps[0]["missing"], 1.0);

    // Both commands were served from one fetch
    assert_eq!(service.fetch_count(), 1);
}

#[tokio::test]
async fn test_execute_absence_text_output() {
    let config = TimetableConfig::default();
    let command = Command::Absence {
        id: PersonId::parse("ABCD").unwrap(),
        dates: vec![
            NaiveDate::from_ymd_opt(2022, 1, 4).unwrap(),
            NaiveDate::from_ymd_opt(2022, 1, 3).unwrap(),
        ],
    };

    let rendered = execute(
        &command,
        memory_service(),
        &config,
        &Renderer::new(OutputFormat::Text, false),
    )
    .await
    .unwrap();
    let text = rendered.to_string();

    assert!(matches!(rendered, Rendered::Table(_)));
    assert!(text.contains("2022-01-03..2022-01-04"), "got:\n{text}");
    assert!(text.contains("Total for ABCD"));
    assert!(text.contains("8.00"));
    assert!(text.contains("7.00"));
    assert!(!text.contains('\u{1b}'));
}

#[tokio::test]
async fn test_execute_grid_from_json_file() {
    let mut file = NamedTempFile::new().unwrap();
    let payload = serde_json::json!({ "data": records() });
    write!(file, "{}", payload).unwrap();

    let mut config = TimetableConfig::default();
    config.data_file = Some(file.path().to_path_buf());
    config.show_disabled = false;
    let service = TimetableService::with_retry(
        Arc::new(JsonFileSource::new(config.data_file().unwrap())),
        RetryPolicy::none(),
    );

    let rendered = execute(&Command::Grid, service, &config, &json_renderer())
        .await
        .unwrap();
    let value = as_json(&rendered);

    let workplaces = value["workplaces"].as_array().unwrap();
    let names: Vec<&str> = workplaces
        .iter()
        .map(|workplace| workplace["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Arzt", "Test"]);
    // V2 is disabled and hidden, leaving one group per workplace
    assert_eq!(workplaces[0]["slot_groups"].as_array().unwrap().len(), 1);
    // V1 has two timeslots, so its row is two below the origin
    assert_eq!(workplaces[0]["grid_row_start"], 4);
    assert_eq!(workplaces[1]["grid_row_start"], 7);
    assert_eq!(value["full_height"], 8);
}

#[tokio::test]
async fn test_execute_reports_unreadable_source() {
    let dir = tempfile::tempdir().unwrap();
    let service = TimetableService::with_retry(
        Arc::new(JsonFileSource::new(dir.path().join("missing.json"))),
        RetryPolicy::none(),
    );

    let err = execute(
        &Command::Days,
        service,
        &TimetableConfig::default(),
        &json_renderer(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, TimetableError::Fetch { .. }));
    assert!(err.is_user_actionable());
}

#[test]
fn test_text_tables_are_uncolored_without_color() {
    let renderer = Renderer::new(OutputFormat::Text, false);
    let rendered = renderer.hours(
        &PersonId::parse("ABCD").unwrap(),
        crate::model::HoursTotal::new(8.0, 7.5),
    );

    let text = rendered.to_string();
    assert!(text.contains("Working"));
    assert!(text.contains("7.50"));
    assert!(!text.contains('\u{1b}'));
}
