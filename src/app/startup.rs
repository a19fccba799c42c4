//! Application startup and command dispatch

use super::cli::{Args, Command};
use super::config::TimetableConfig;
use super::display::{Rendered, Renderer};
use crate::core::error_handling::{log_error_with_context, ContextualError};
use crate::core::logging::init_logging;
use crate::core::styles::{palette_to_clap, StyleRole};
use crate::core::version::long_version;
use crate::features::{AbsencyDataService, PlannerDataService, ViewerDataService};
use crate::service::api::{install_timetable_service, shutdown_timetable_service, timetable_service};
use crate::service::{TimetableDataService, TimetableResult, TimetableService};
use crate::source::JsonFileSource;
use clap::{CommandFactory, FromArgMatches};
use std::io::IsTerminal;
use std::process::ExitCode;
use std::sync::Arc;

/// Run the CLI and return the process exit code
pub async fn startup() -> ExitCode {
    let args = parse_args();

    // Configuration is loaded before logging so file settings apply to it
    let mut config = match TimetableConfig::load(args.config_file.as_deref()).await {
        Ok(config) => config,
        Err(e) => {
            let message = e.user_message().unwrap_or_else(|| e.to_string());
            eprintln!(
                "{}",
                StyleRole::Error.paint(&message, std::io::stderr().is_terminal())
            );
            return ExitCode::FAILURE;
        }
    };
    config.apply_args(&args);

    let use_color = config
        .color
        .unwrap_or_else(|| std::io::stdout().is_terminal());
    let log_file = config
        .log_file
        .as_ref()
        .map(|path| path.to_string_lossy().into_owned());
    if let Err(e) = init_logging(
        config.log_level.as_deref(),
        config.log_format.as_deref(),
        log_file.as_deref(),
        use_color,
    ) {
        eprintln!("Failed to initialise logging: {}", e);
        return ExitCode::FAILURE;
    }
    log::debug!("Effective configuration: {:?}", config);

    let data_file = match config.data_file() {
        Ok(path) => path.to_path_buf(),
        Err(e) => {
            log_error_with_context(&e, "Configuration");
            return ExitCode::FAILURE;
        }
    };

    let service = TimetableService::with_retry(
        Arc::new(JsonFileSource::new(data_file)),
        config.fetch.clone(),
    );
    if let Err(e) = install_timetable_service(service) {
        log_error_with_context(&e, "Service startup");
        return ExitCode::FAILURE;
    }

    let exit_code = match timetable_service() {
        Ok(service) => {
            let renderer = Renderer::new(args.output, use_color);
            match execute(&args.command, service, &config, &renderer).await {
                Ok(rendered) => {
                    rendered.print();
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    log_error_with_context(&e, "Timetable loading");
                    ExitCode::FAILURE
                }
            }
        }
        Err(e) => {
            log_error_with_context(&e, "Service lookup");
            ExitCode::FAILURE
        }
    };

    if let Err(e) = shutdown_timetable_service() {
        log::debug!("Service shutdown: {}", e);
    }
    exit_code
}

fn parse_args() -> Args {
    let color = !std::env::args().any(|arg| arg == "--no-color") && std::io::stdout().is_terminal();
    let matches = Args::command()
        .styles(palette_to_clap(color))
        .long_version(long_version())
        .get_matches();

    Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
}

/// Load the timetable for the configured scope and run one query against it
pub async fn execute(
    command: &Command,
    service: TimetableService,
    config: &TimetableConfig,
    renderer: &Renderer,
) -> TimetableResult<Rendered> {
    let scope = config.scope();
    log::debug!("Running {:?} for {}", command, scope);

    let rendered = match command {
        Command::Weekday {
            day,
            include_disabled,
        } => {
            let viewer = ViewerDataService::new(service, scope);
            viewer.load_timetable().await?;
            let selection = if *include_disabled {
                viewer.find_all_by_weekday(*day)
            } else {
                viewer.find_by_weekday(*day)
            };
            renderer.slots(&selection.to_vec())
        }
        Command::Person { id } => {
            let viewer = ViewerDataService::new(service, scope);
            viewer.load_timetable().await?;
            renderer.slots(&viewer.find_by_person(id.as_str()).to_vec())
        }
        Command::Hours { id } => {
            let absency = AbsencyDataService::new(service, scope);
            absency.load_timetable().await?;
            renderer.hours(id, absency.total_hours(id.as_str()))
        }
        Command::Understaffed { threshold } => {
            let planner = PlannerDataService::new(service, scope)
                .with_threshold(threshold.unwrap_or(config.staffing_threshold));
            planner.load_timetable().await?;
            renderer.staffing_gaps(&planner.slots_needing_staff())
        }
        Command::Unassigned => {
            let planner = PlannerDataService::new(service, scope);
            planner.load_timetable().await?;
            renderer.slots(&planner.unassigned_slots())
        }
        Command::Grid => {
            let viewer =
                ViewerDataService::new(service, scope).with_show_disabled(config.show_disabled);
            viewer.load_timetable().await?;
            renderer.grid(&viewer.workplace_grid())
        }
        Command::Days => {
            let viewer =
                ViewerDataService::new(service, scope).with_show_disabled(config.show_disabled);
            viewer.load_timetable().await?;
            renderer.weekday_columns(&viewer.weekday_columns())
        }
        Command::Roster => {
            let absency = AbsencyDataService::new(service, scope);
            absency.load_timetable().await?;
            renderer.roster(&absency.roster())
        }
        Command::Conflicts => {
            let planner = PlannerDataService::new(service, scope);
            planner.load_timetable().await?;
            renderer.conflicts(&planner.conflicts())
        }
        Command::Absence { id, dates } => {
            let absency = AbsencyDataService::new(service, scope);
            absency.load_timetable().await?;
            renderer.absence_impact(&absency.absence_impact(id.clone(), dates))
        }
    };

    Ok(rendered)
}
