//! TOML configuration tests

use crate::common::write_config;
use clap::Parser;
use timetable::app::cli::Args;
use timetable::app::config::{ConfigError, TimetableConfig};
use timetable::core::error_handling::ContextualError;
use timetable::source::Scope;

#[tokio::test]
async fn test_config_file_with_flag_overrides() {
    let file = write_config(
        r#"
        data-file = "from-config.json"
        department = "Department 1"
        workplace = "Arzt"

        [planner]
        staffing-threshold = 6.5
        "#,
    );
    let args = Args::try_parse_from([
        "timetable",
        "--config-file",
        file.path().to_str().unwrap(),
        "--data",
        "from-flag.json",
        "understaffed",
    ])
    .unwrap();

    let mut config = TimetableConfig::load(args.config_file.as_deref())
        .await
        .unwrap();
    config.apply_args(&args);

    assert_eq!(
        config.data_file().unwrap(),
        std::path::Path::new("from-flag.json")
    );
    assert_eq!(
        config.scope(),
        Scope::department("Department 1").with_workplace("Arzt")
    );
    assert_eq!(config.staffing_threshold, 6.5);
}

#[tokio::test]
async fn test_malformed_config_file() {
    let file = write_config("[fetch\nattempts = 2");

    let err = TimetableConfig::load(Some(file.path())).await.unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.is_user_actionable());
}

#[tokio::test]
async fn test_section_must_be_table() {
    let file = write_config("planner = 4");

    let err = TimetableConfig::load(Some(file.path())).await.unwrap_err();
    assert!(
        matches!(&err, ConfigError::Invalid { key, .. } if key == "planner"),
        "got {err:?}"
    );
}
