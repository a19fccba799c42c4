//! TOML configuration file parsing and loading
//!
//! Values are layered: built-in defaults, then the configuration file, then
//! command line flags.

use super::cli::Args;
use crate::core::error_handling::ContextualError;
use crate::core::retry::RetryPolicy;
use crate::features::DEFAULT_STAFFING_THRESHOLD;
use crate::source::Scope;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("The specified configuration file does not exist: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("Error reading configuration file {}: {message}", .path.display())]
    Read { path: PathBuf, message: String },

    #[error("Error parsing configuration file: {message}")]
    Parse { message: String },

    #[error("Invalid value for '{key}': {message}")]
    Invalid { key: String, message: String },
}

impl ConfigError {
    fn invalid(key: &str, message: impl Into<String>) -> Self {
        Self::Invalid {
            key: key.to_string(),
            message: message.into(),
        }
    }
}

impl ContextualError for ConfigError {
    fn is_user_actionable(&self) -> bool {
        true
    }

    fn user_message(&self) -> Option<String> {
        Some(self.to_string())
    }
}

/// Effective application settings
#[derive(Debug, Clone, PartialEq)]
pub struct TimetableConfig {
    pub log_level: Option<String>,
    pub log_format: Option<String>,
    pub log_file: Option<PathBuf>,
    /// `None` means decide from the terminal
    pub color: Option<bool>,
    pub data_file: Option<PathBuf>,
    pub department: Option<String>,
    pub workplace: Option<String>,
    pub fetch: RetryPolicy,
    pub staffing_threshold: f64,
    pub show_disabled: bool,
}

impl Default for TimetableConfig {
    fn default() -> Self {
        Self {
            log_level: None,
            log_format: None,
            log_file: None,
            color: None,
            data_file: None,
            department: None,
            workplace: None,
            fetch: RetryPolicy::default(),
            staffing_threshold: DEFAULT_STAFFING_THRESHOLD,
            show_disabled: true,
        }
    }
}

impl TimetableConfig {
    /// `<config dir>/Timetable/timetable.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("Timetable").join("timetable.toml"))
    }

    /// Load from an explicit path, or from the default path when it exists
    ///
    /// An explicit path must exist; a missing default file yields defaults.
    pub async fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match config_file {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound {
                    path: path.to_path_buf(),
                })
            }
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };

        let contents =
            tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| ConfigError::Read {
                    path: path.clone(),
                    message: e.to_string(),
                })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let table = toml::from_str::<toml::Table>(contents).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        let mut config = Self::default();
        config.apply_toml_values(&table)?;
        Ok(config)
    }

    /// Apply TOML configuration values over the current settings
    pub fn apply_toml_values(&mut self, config: &toml::Table) -> Result<(), ConfigError> {
        if let Some(log_level) = string_value(config, "log-level")? {
            self.log_level = Some(log_level);
        }
        if let Some(log_format) = string_value(config, "log-format")? {
            self.log_format = Some(log_format);
        }
        if let Some(log_file) = string_value(config, "log-file")? {
            // "none" and "-" disable file logging
            self.log_file = if log_file.eq_ignore_ascii_case("none") || log_file == "-" {
                None
            } else {
                Some(PathBuf::from(log_file))
            };
        }
        if let Some(color) = config.get("color") {
            self.color = Some(
                color
                    .as_bool()
                    .ok_or_else(|| ConfigError::invalid("color", "expected true or false"))?,
            );
        }
        if let Some(data_file) = string_value(config, "data-file")? {
            self.data_file = Some(PathBuf::from(data_file));
        }
        if let Some(department) = string_value(config, "department")? {
            self.department = Some(department);
        }
        if let Some(workplace) = string_value(config, "workplace")? {
            self.workplace = Some(workplace);
        }

        if let Some(fetch) = section(config, "fetch")? {
            if let Some(attempts) = fetch.get("attempts") {
                let attempts = attempts
                    .as_integer()
                    .filter(|n| *n >= 1)
                    .ok_or_else(|| ConfigError::invalid("fetch.attempts", "must be a positive integer"))?;
                self.fetch.max_attempts = attempts as usize;
            }
            if let Some(delay) = fetch.get("delay-ms") {
                let delay = delay
                    .as_integer()
                    .filter(|n| *n >= 0)
                    .ok_or_else(|| {
                        ConfigError::invalid("fetch.delay-ms", "must be a non-negative integer")
                    })?;
                self.fetch.delay = Duration::from_millis(delay as u64);
            }
        }

        if let Some(planner) = section(config, "planner")? {
            if let Some(threshold) = planner.get("staffing-threshold") {
                self.staffing_threshold = validate_threshold(
                    "planner.staffing-threshold",
                    threshold.as_float().or_else(|| threshold.as_integer().map(|n| n as f64)),
                )?;
            }
        }

        if let Some(viewer) = section(config, "viewer")? {
            if let Some(show_disabled) = viewer.get("show-disabled") {
                self.show_disabled = show_disabled.as_bool().ok_or_else(|| {
                    ConfigError::invalid("viewer.show-disabled", "expected true or false")
                })?;
            }
        }

        Ok(())
    }

    /// Let command line flags override file values
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(level) = &args.log_level {
            self.log_level = Some(level.clone());
        }
        if let Some(format) = &args.log_format {
            self.log_format = Some(format.clone());
        }
        if let Some(file) = &args.log_file {
            self.log_file = if file.as_os_str() == "none" || file.as_os_str() == "-" {
                None
            } else {
                Some(file.clone())
            };
        }
        if let Some(color) = args.color_preference() {
            self.color = Some(color);
        }
        if let Some(data_file) = &args.data_file {
            self.data_file = Some(data_file.clone());
        }
        if let Some(department) = &args.department {
            self.department = Some(department.clone());
        }
        if let Some(workplace) = &args.workplace {
            self.workplace = Some(workplace.clone());
        }
    }

    /// Scope all commands operate on
    pub fn scope(&self) -> Scope {
        Scope {
            department: self.department.clone(),
            workplace: self.workplace.clone(),
        }
    }

    pub fn data_file(&self) -> Result<&Path, ConfigError> {
        self.data_file.as_deref().ok_or_else(|| {
            ConfigError::invalid(
                "data-file",
                "no timetable data file configured (use --data or data-file)",
            )
        })
    }
}

/// Staffing thresholds are hours and cannot be negative
pub fn validate_threshold(key: &str, value: Option<f64>) -> Result<f64, ConfigError> {
    match value {
        Some(hours) if hours.is_finite() && hours >= 0.0 => Ok(hours),
        _ => Err(ConfigError::invalid(key, "must be a non-negative number of hours")),
    }
}

fn string_value(config: &toml::Table, key: &str) -> Result<Option<String>, ConfigError> {
    match config.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_str()
            .map(|s| Some(s.to_string()))
            .ok_or_else(|| ConfigError::invalid(key, "expected a string")),
    }
}

fn section<'a>(config: &'a toml::Table, key: &str) -> Result<Option<&'a toml::Table>, ConfigError> {
    match config.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_table()
            .map(Some)
            .ok_or_else(|| ConfigError::invalid(key, "expected a table")),
    }
}
