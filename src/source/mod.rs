//! External timetable data sources
//!
//! The core treats the upstream backend as "a function from scope to a batch
//! of [`TimeslotRecord`]s, which may fail". Transport, endpoints and
//! authentication live behind the [`TimetableSource`] trait; this crate ships
//! an in-memory source and a JSON file source.

mod error;
mod file;
mod memory;
mod scope;

pub use error::SourceError;
pub use file::JsonFileSource;
pub use memory::MemorySource;
pub use scope::Scope;

use crate::records::TimeslotRecord;

/// Result type alias for source operations
pub type SourceResult<T> = std::result::Result<T, SourceError>;

/// Supplier of raw timeslot records
///
/// Implementations should narrow the batch to the requested [`Scope`]; the
/// service caches per scope and never merges batches.
#[async_trait::async_trait]
pub trait TimetableSource: Send + Sync {
    /// Short name used in log messages
    fn name(&self) -> &str;

    /// Fetch every record within `scope`
    async fn fetch(&self, scope: &Scope) -> SourceResult<Vec<TimeslotRecord>>;
}
