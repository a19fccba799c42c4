//! JSON file timetable source
//!
//! Reads a backend response saved to disk. Both a bare array of timeslot
//! records and the backend envelope `{ "data": [...], "message", "status" }`
//! are accepted. An envelope must carry `data`, and a non-2xx `status` is a
//! failed response, never an empty timetable.

use super::{Scope, SourceError, SourceResult, TimetableSource};
use crate::records::TimeslotRecord;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Envelope {
    // deserialize_with makes a missing field an error instead of None
    #[serde(deserialize_with = "Option::deserialize")]
    data: Option<Vec<TimeslotRecord>>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    status: Option<u16>,
}

impl Envelope {
    fn into_records(self) -> SourceResult<Vec<TimeslotRecord>> {
        if let Some(status) = self.status.filter(|status| !(200..300).contains(status)) {
            return Err(SourceError::unavailable(format!(
                "backend responded with status {}: {}",
                status,
                self.message.as_deref().unwrap_or("no message")
            )));
        }
        self.data.ok_or_else(|| SourceError::Decode {
            message: format!(
                "response envelope carries no data ({})",
                self.message.as_deref().unwrap_or("no message")
            ),
        })
    }
}

fn decode_error(e: serde_json::Error) -> SourceError {
    SourceError::Decode {
        message: e.to_string(),
    }
}

/// Source backed by a JSON file, re-read on every fetch
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Decode a JSON document into records
    pub fn parse(contents: &str) -> SourceResult<Vec<TimeslotRecord>> {
        let value: serde_json::Value = serde_json::from_str(contents).map_err(decode_error)?;
        if value.is_array() {
            return serde_json::from_value(value).map_err(decode_error);
        }

        let envelope: Envelope = serde_json::from_value(value).map_err(decode_error)?;
        envelope.into_records()
    }
}

#[async_trait::async_trait]
impl TimetableSource for JsonFileSource {
    fn name(&self) -> &str {
        "json-file"
    }

    async fn fetch(&self, scope: &Scope) -> SourceResult<Vec<TimeslotRecord>> {
        let contents =
            tokio::fs::read_to_string(&self.path)
                .await
                .map_err(|e| SourceError::Io {
                    path: self.path.clone(),
                    message: e.to_string(),
                })?;

        let records = Self::parse(&contents)?;
        log::debug!(
            "Read {} timeslot records from {}",
            records.len(),
            self.path.display()
        );

        Ok(records
            .into_iter()
            .filter(|record| scope.matches(record))
            .collect())
    }
}
