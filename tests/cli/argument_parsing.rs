//! CLI argument parsing tests

use clap::Parser;
use timetable::app::cli::{Args, Command, OutputFormat};
use timetable::model::Weekday;

static COMMAND_NAME: &str = "timetable";

#[test]
fn test_global_flags_before_command() {
    let args = Args::try_parse_from([
        COMMAND_NAME,
        "-d",
        "week.json",
        "-W",
        "Arzt",
        "-o",
        "json",
        "days",
    ])
    .unwrap();

    assert_eq!(args.workplace.as_deref(), Some("Arzt"));
    assert_eq!(args.output, OutputFormat::Json);
    assert_eq!(args.command, Command::Days);
}

#[test]
fn test_weekday_is_case_insensitive() {
    for day in ["WED", "wed", "Wed"] {
        let args = Args::try_parse_from([COMMAND_NAME, "weekday", day]).unwrap();
        assert_eq!(
            args.command,
            Command::Weekday {
                day: Weekday::Wed,
                include_disabled: false
            }
        );
    }
}

#[test]
fn test_command_is_required() {
    assert!(Args::try_parse_from([COMMAND_NAME, "--data", "week.json"]).is_err());
}

#[test]
fn test_invalid_date_rejected() {
    let err =
        Args::try_parse_from([COMMAND_NAME, "absence", "ABCD", "--date", "2022-02-30"]).unwrap_err();
    assert!(err.to_string().contains("2022-02-30"));
}
