//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the controller lifecycle and the two user actions to Dart via FRB.
//! - Translate controller state and errors into flat response envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - At most one controller is live per process; `app_start` opens it and
//!   `app_shutdown` closes it.
//! - A call arriving while another holds the controller is answered with
//!   `error_code = "busy"` instead of waiting.
//! - Between `app_begin_capture` and `app_complete_capture` (or
//!   `app_cancel_capture`) every state response reports `loading=true`, and a
//!   second begin is answered with `busy`.

use geocapture_core::theme::Palette;
use geocapture_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    start_with_config, AppConfig, ControllerError, Coordinate, FileAppController,
    LocationRecord, PermissionStatus, PlatformReport, ReportedLocationProvider,
};
use log::{info, warn};
use std::sync::{Mutex, MutexGuard, TryLockError};

const BUSY_CODE: &str = "busy";
const NOT_STARTED_CODE: &str = "not_started";

struct RunningApp {
    config: AppConfig,
    controller: FileAppController<ReportedLocationProvider>,
}

static APP: Mutex<Option<RunningApp>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One palette entry, e.g. `background -> #FFFBFE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteColor {
    pub role: String,
    pub value: String,
}

/// One captured location rendered for the list.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationItem {
    pub id: i64,
    pub latitude: f64,
    pub longitude: f64,
    /// `Localização {id}`.
    pub title: String,
    /// `Latitude: {lat} | Longitude: {lon}`.
    pub description: String,
}

/// Platform outcome collected by Dart for one capture.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureReport {
    pub permission_granted: bool,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Platform error text when no fix was produced.
    pub error: Option<String>,
}

/// Response envelope shared by every `app_*` call.
#[derive(Debug, Clone, PartialEq)]
pub struct AppStateResponse {
    /// Whether the requested operation succeeded.
    pub ok: bool,
    /// `true` while a capture is in flight.
    pub loading: bool,
    pub dark_mode: bool,
    pub palette: Vec<PaletteColor>,
    /// Full record list in insertion order.
    pub items: Vec<LocationItem>,
    /// Id of the record stored by a successful capture.
    pub captured_id: Option<i64>,
    /// Stable failure code (`permission_denied`, `storage_failure`, `busy`, ...).
    pub error_code: Option<String>,
    /// Modal alert for the shell; `None` when nothing must be shown.
    pub alert_title: Option<String>,
    /// Human-readable message for diagnostics/UI.
    pub message: String,
}

impl AppStateResponse {
    fn from_controller(controller: &FileAppController<ReportedLocationProvider>) -> Self {
        let snapshot = controller.snapshot();
        Self {
            ok: true,
            loading: snapshot.loading,
            dark_mode: snapshot.theme_mode.is_dark(),
            palette: palette_colors(snapshot.theme_mode.palette()),
            items: snapshot.locations.iter().map(to_location_item).collect(),
            captured_id: None,
            error_code: None,
            alert_title: None,
            message: String::new(),
        }
    }

    fn with_error(mut self, err: &ControllerError) -> Self {
        let alert = err.alert();
        self.ok = false;
        self.error_code = Some(err.code().to_string());
        self.alert_title = Some(alert.title.to_string());
        self.message = alert.message;
        self
    }

    fn failure(code: &str, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            loading: false,
            dark_mode: false,
            palette: Vec::new(),
            items: Vec::new(),
            captured_id: None,
            error_code: Some(code.to_string()),
            alert_title: None,
            message: message.into(),
        }
    }

    fn stopped() -> Self {
        Self {
            ok: true,
            error_code: None,
            ..Self::failure(NOT_STARTED_CODE, "App stopped.")
        }
    }

    fn busy() -> Self {
        Self {
            loading: true,
            ..Self::failure(BUSY_CODE, "A capture is already in progress.")
        }
    }
}

/// Opens the database and preferences under `data_dir` and loads state.
///
/// # FFI contract
/// - Idempotent for the same `data_dir`; returns current state.
/// - A different `data_dir` while running is rejected.
#[flutter_rust_bridge::frb(sync)]
pub fn app_start(data_dir: String) -> AppStateResponse {
    let config = match AppConfig::from_data_dir(data_dir.as_str()) {
        Ok(config) => config,
        Err(err) => return AppStateResponse::failure("invalid_config", err),
    };

    let mut slot = match lock_app() {
        Some(slot) => slot,
        None => return AppStateResponse::busy(),
    };

    if let Some(running) = slot.as_ref() {
        if running.config == config {
            return AppStateResponse::from_controller(&running.controller);
        }
        return AppStateResponse::failure(
            "already_started",
            format!(
                "app already started at `{}`; refusing to switch to `{}`",
                running.config.data_dir.display(),
                config.data_dir.display()
            ),
        );
    }

    match start_with_config(&config, ReportedLocationProvider::new()) {
        Ok(controller) => {
            let response = AppStateResponse::from_controller(&controller);
            *slot = Some(RunningApp { config, controller });
            response
        }
        Err(err) => AppStateResponse::failure("start_failed", err),
    }
}

/// Returns current state; reports `busy` with `loading=true` during a capture.
#[flutter_rust_bridge::frb(sync)]
pub fn app_snapshot() -> AppStateResponse {
    with_running(|running| AppStateResponse::from_controller(&running.controller))
}

/// Flips dark mode and persists it.
///
/// On a persist failure the returned state already shows the new theme and
/// carries `preference_failure`.
#[flutter_rust_bridge::frb(sync)]
pub fn app_toggle_theme() -> AppStateResponse {
    with_running(|running| match running.controller.toggle_theme() {
        Ok(_) => AppStateResponse::from_controller(&running.controller),
        Err(err) => AppStateResponse::from_controller(&running.controller).with_error(&err),
    })
}

/// Marks a capture as pending before Dart starts the permission prompt
/// and position request.
///
/// # FFI contract
/// - Returned state has `loading=true`.
/// - A capture already pending returns `busy` with the alert text.
#[flutter_rust_bridge::frb(sync)]
pub fn app_begin_capture() -> AppStateResponse {
    with_running(|running| match running.controller.begin_capture() {
        Ok(()) => AppStateResponse::from_controller(&running.controller),
        Err(err) => AppStateResponse::from_controller(&running.controller).with_error(&err),
    })
}

/// Finishes the pending capture with the platform outcome Dart collected.
///
/// # FFI contract
/// - Permission denial returns `permission_denied` with the alert text.
/// - A granted report without both coordinates is treated as no fix.
/// - Returned state has `loading=false` whatever the outcome.
/// - Without a prior `app_begin_capture` the capture runs in one step.
#[flutter_rust_bridge::frb(sync)]
pub fn app_complete_capture(report: CaptureReport) -> AppStateResponse {
    with_running(|running| {
        running
            .controller
            .provider_mut()
            .stage(to_platform_report(report));
        match running.controller.complete_capture() {
            Ok(record) => {
                let mut response = AppStateResponse::from_controller(&running.controller);
                response.captured_id = Some(record.id);
                response.message = format!("{} saved.", record.display_title());
                response
            }
            Err(err) => AppStateResponse::from_controller(&running.controller).with_error(&err),
        }
    })
}

/// Abandons a pending capture, e.g. when the Dart side was interrupted.
///
/// Nothing is stored. Safe to call when no capture is pending.
#[flutter_rust_bridge::frb(sync)]
pub fn app_cancel_capture() -> AppStateResponse {
    with_running(|running| {
        running.controller.cancel_capture();
        AppStateResponse::from_controller(&running.controller)
    })
}

/// Closes the database; a later `app_start` reopens it.
#[flutter_rust_bridge::frb(sync)]
pub fn app_shutdown() -> AppStateResponse {
    let mut slot = match lock_app() {
        Some(slot) => slot,
        None => return AppStateResponse::busy(),
    };

    match slot.take() {
        Some(running) => match running.controller.shutdown() {
            Ok(()) => AppStateResponse::stopped(),
            Err(err) => AppStateResponse::failure(err.code(), err.to_string()),
        },
        None => AppStateResponse::failure(NOT_STARTED_CODE, "app is not started"),
    }
}

fn with_running(f: impl FnOnce(&mut RunningApp) -> AppStateResponse) -> AppStateResponse {
    let mut slot = match lock_app() {
        Some(slot) => slot,
        None => return AppStateResponse::busy(),
    };
    match slot.as_mut() {
        Some(running) => f(running),
        None => AppStateResponse::failure(NOT_STARTED_CODE, "app is not started"),
    }
}

/// Non-blocking lock; `None` means another call holds the controller.
fn lock_app() -> Option<MutexGuard<'static, Option<RunningApp>>> {
    match APP.try_lock() {
        Ok(guard) => Some(guard),
        Err(TryLockError::WouldBlock) => {
            info!("event=ffi_call module=ffi status=rejected error_code=busy");
            None
        }
        Err(TryLockError::Poisoned(poisoned)) => {
            warn!("event=ffi_call module=ffi status=recovered error_code=lock_poisoned");
            Some(poisoned.into_inner())
        }
    }
}

fn to_platform_report(report: CaptureReport) -> PlatformReport {
    let permission = if report.permission_granted {
        PermissionStatus::Granted
    } else {
        PermissionStatus::Denied
    };
    let position = match (report.latitude, report.longitude) {
        (Some(latitude), Some(longitude)) => Ok(Coordinate::new(latitude, longitude)),
        _ => Err(report
            .error
            .unwrap_or_else(|| "platform returned no coordinates".to_string())),
    };
    PlatformReport {
        permission,
        position,
    }
}

fn to_location_item(record: &LocationRecord) -> LocationItem {
    LocationItem {
        id: record.id,
        latitude: record.latitude,
        longitude: record.longitude,
        title: record.display_title(),
        description: record.display_description(),
    }
}

fn palette_colors(palette: &Palette) -> Vec<PaletteColor> {
    palette
        .colors
        .iter()
        .map(|(role, value)| PaletteColor {
            role: (*role).to_string(),
            value: (*value).to_string(),
        })
        .collect()
}
