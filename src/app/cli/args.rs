//! Command line arguments
//!
//! Global flags select where the data comes from and how output looks; the
//! subcommand picks the query.

use crate::app::config::validate_threshold;
use crate::model::{PersonId, Weekday};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "timetable")]
#[command(about = "Query shared timetable data for planning, viewing and absences")]
#[command(version)]
pub struct Args {
    /// Configuration file path
    #[arg(short = 'c', long = "config-file", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Timetable data file (JSON array or {"data": [...]})
    #[arg(short = 'd', long = "data", value_name = "FILE")]
    pub data_file: Option<PathBuf>,

    /// Restrict to one department
    #[arg(short = 'D', long = "department", value_name = "NAME")]
    pub department: Option<String>,

    /// Restrict to one workplace
    #[arg(short = 'W', long = "workplace", value_name = "NAME")]
    pub workplace: Option<String>,

    /// Force colored output
    #[arg(long = "color", conflicts_with = "no_color")]
    pub color: bool,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Log level
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = ["trace", "debug", "info", "warn", "error", "off"])]
    pub log_level: Option<String>,

    /// Log file path (use 'none' to disable file logging)
    #[arg(short = 'f', long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log output format
    #[arg(long = "log-format", value_name = "FORMAT", value_parser = ["text", "ext", "json"])]
    pub log_format: Option<String>,

    /// Result output format
    #[arg(short = 'o', long = "output", value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Slots on one weekday (MON..SUN)
    Weekday {
        #[arg(value_parser = parse_weekday)]
        day: Weekday,

        /// Include disabled slots
        #[arg(long = "include-disabled")]
        include_disabled: bool,
    },

    /// Slots a person is assigned to
    Person { id: PersonId },

    /// Working and actual hours of a person
    Hours { id: PersonId },

    /// Active slots with too few assigned hours
    Understaffed {
        /// Hours below which a slot is understaffed
        #[arg(long = "threshold", value_name = "HOURS", value_parser = parse_threshold)]
        threshold: Option<f64>,
    },

    /// Active slots nobody is assigned to
    Unassigned,

    /// Workplace grid of the whole week
    Grid,

    /// Slots per weekday
    Days,

    /// Everyone in the timetable
    Roster,

    /// People booked into overlapping slots
    Conflicts,

    /// Slots affected by a person's absence
    Absence {
        id: PersonId,

        /// Absence date (repeatable)
        #[arg(long = "date", value_name = "YYYY-MM-DD", required = true, num_args = 1..)]
        dates: Vec<NaiveDate>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl Args {
    /// --color gives Some(true), --no-color Some(false), neither None
    pub fn color_preference(&self) -> Option<bool> {
        match (self.color, self.no_color) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

fn parse_weekday(value: &str) -> Result<Weekday, String> {
    Weekday::parse_id(value).map_err(|e| e.to_string())
}

fn parse_threshold(value: &str) -> Result<f64, String> {
    validate_threshold("threshold", value.parse().ok()).map_err(|e| e.to_string())
}
