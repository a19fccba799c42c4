//! Process-wide timetable service
//!
//! The binary installs one [`TimetableService`] at startup and tears it down
//! on exit. Library users may instead construct and pass services around
//! explicitly; the registry only exists so independent modules can find the
//! shared cache without threading it through every call.

use super::error::RegistryError;
use super::shared::TimetableService;
use std::sync::{LazyLock, PoisonError, RwLock};

static TIMETABLE_SERVICE: LazyLock<RwLock<Option<TimetableService>>> = LazyLock::new(|| {
    log::trace!("Initializing timetable service registry");
    RwLock::new(None)
});

/// Make `service` the process-wide instance
///
/// # Examples
/// ```no_run
/// # use std::sync::Arc;
/// # use timetable::service::api::{install_timetable_service, timetable_service};
/// # use timetable::service::TimetableService;
/// # use timetable::source::MemorySource;
/// let service = TimetableService::new(Arc::new(MemorySource::default()));
/// install_timetable_service(service)?;
/// let shared = timetable_service()?;
/// # Ok::<(), timetable::service::RegistryError>(())
/// ```
pub fn install_timetable_service(service: TimetableService) -> Result<(), RegistryError> {
    let mut slot = TIMETABLE_SERVICE
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    if slot.is_some() {
        return Err(RegistryError::AlreadyInstalled);
    }
    log::info!(
        "Installed timetable service backed by {} source",
        service.source_name()
    );
    *slot = Some(service);
    Ok(())
}

/// Handle to the process-wide instance; clones share its cache
pub fn timetable_service() -> Result<TimetableService, RegistryError> {
    TIMETABLE_SERVICE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
        .ok_or(RegistryError::NotInstalled)
}

/// Remove the process-wide instance and return it
///
/// Handles obtained earlier keep working; later lookups fail until a new
/// service is installed.
pub fn shutdown_timetable_service() -> Result<TimetableService, RegistryError> {
    let service = TIMETABLE_SERVICE
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .take()
        .ok_or(RegistryError::NotInstalled)?;
    log::info!("Timetable service shut down");
    Ok(service)
}
