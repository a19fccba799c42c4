//! Source Error Types

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SourceError {
    #[error("Failed to read {}: {message}", .path.display())]
    Io { path: PathBuf, message: String },

    #[error("Malformed timetable data: {message}")]
    Decode { message: String },

    #[error("Data source unavailable: {message}")]
    Unavailable { message: String },
}

impl SourceError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}
