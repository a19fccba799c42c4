//! Generic error handling utilities
//!
//! Provides unified error reporting across the timetable, source and
//! configuration error types.

/// Trait for errors that can distinguish between user-actionable and system errors
///
/// When `is_user_actionable()` returns `true`, `user_message()` should return
/// `Some(message)` with a helpful, actionable message; otherwise `None`.
pub trait ContextualError: std::error::Error {
    /// Returns true if this error carries a message the user can act on
    ///
    /// Examples of user-actionable errors:
    /// - Malformed timetable data (duplicate slots, bad weekday identifiers)
    /// - Configuration values out of range
    ///
    /// Examples of system errors:
    /// - IO failures
    /// - Unreachable data sources
    fn is_user_actionable(&self) -> bool;

    /// The specific user message if this is a user-actionable error
    fn user_message(&self) -> Option<String>;
}

/// Log errors with appropriate detail level based on error specificity
///
/// - user-actionable errors log their specific message
/// - system errors log the operation context; details go to debug level
///
/// # Examples
/// ```rust,no_run
/// # use timetable::core::error_handling::log_error_with_context;
/// # use timetable::app::config::ConfigError;
/// let err = ConfigError::Invalid {
///     key: "planner.staffing-threshold".to_string(),
///     message: "must be a non-negative number".to_string(),
/// };
/// log_error_with_context(&err, "Configuration loading");
/// ```
pub fn log_error_with_context<E: ContextualError + std::fmt::Display + std::fmt::Debug>(
    error: &E,
    operation_context: &str,
) {
    match error.user_message() {
        Some(user_msg) if error.is_user_actionable() => {
            log::error!("FATAL: {}: {}", operation_context, user_msg);
        }
        _ => log::error!("FATAL: {}", operation_context),
    }
    log::debug!("DETAIL: {}", error);
    log::debug!("DEBUG_DETAILS: {:?}", error);
}
