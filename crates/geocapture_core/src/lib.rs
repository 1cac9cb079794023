//! Core domain logic for geocapture.
//! This crate is the single source of truth for capture and storage invariants.

pub mod app;
pub mod config;
pub mod db;
pub mod location;
pub mod logging;
pub mod model;
pub mod prefs;
pub mod repo;
pub mod theme;

pub use app::{Alert, AppController, AppSnapshot, ControllerError, ControllerResult};
pub use config::AppConfig;
pub use location::{
    CaptureService, FixedLocationProvider, LocationError, LocationProvider, PermissionStatus,
    PlatformReport, ReportedLocationProvider,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::location::{Coordinate, CoordinateValidationError, LocationId, LocationRecord};
pub use prefs::{JsonFilePreferenceStore, MemoryPreferenceStore, PreferenceError, PreferenceStore};
pub use repo::location_repo::{LocationRepository, RepoError, RepoResult, SqliteLocationRepository};
pub use theme::{Palette, Theme, ThemeMode};

/// Controller wired to on-disk storage, as used by the shells.
pub type FileAppController<P> = AppController<SqliteLocationRepository, JsonFilePreferenceStore, P>;

/// Opens the on-disk stores described by `config` and starts a controller.
///
/// # Errors
/// - Data directory creation, database open, or schema bootstrap failure,
///   as a human-readable message.
pub fn start_with_config<P: LocationProvider>(
    config: &AppConfig,
    provider: P,
) -> Result<FileAppController<P>, String> {
    config.ensure_dirs()?;
    let repo = SqliteLocationRepository::open(&config.db_path)
        .map_err(|err| format!("location DB open failed: {err}"))?;
    let prefs = JsonFilePreferenceStore::open(&config.prefs_path);
    AppController::start(repo, prefs, provider).map_err(|err| format!("app start failed: {err}"))
}

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
