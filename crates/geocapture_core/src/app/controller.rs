//! Application controller.
//!
//! # Responsibility
//! - Run the startup sequence: schema, theme flag, record list.
//! - Expose the two user actions: toggle theme and capture location.
//!
//! # Invariants
//! - Capture order is permission -> fix -> append -> reload, never reordered.
//! - A failed capture leaves the in-memory list untouched.
//! - Theme mode and palette flip together before the flag is persisted; a
//!   failed persist does not roll the flip back.
//! - At most one capture is pending: `begin_capture` is refused while the
//!   loading flag is set, and every `complete_capture` exit path clears it.

use super::error::{ControllerError, ControllerResult};
use crate::location::{CaptureService, LocationProvider};
use crate::model::location::LocationRecord;
use crate::prefs::PreferenceStore;
use crate::repo::location_repo::LocationRepository;
use crate::theme::{Theme, ThemeMode};
use log::{error, info, warn};
use serde::Serialize;
use std::time::Instant;

/// Cloneable read view of controller state for shells.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppSnapshot {
    pub loading: bool,
    pub theme_mode: ThemeMode,
    pub locations: Vec<LocationRecord>,
}

/// Orchestrates storage, preferences and location capture.
pub struct AppController<R, S, P>
where
    R: LocationRepository,
    S: PreferenceStore,
    P: LocationProvider,
{
    repo: R,
    prefs: S,
    capture: CaptureService<P>,
    loading: bool,
    capture_started_at: Option<Instant>,
    locations: Vec<LocationRecord>,
    theme: Theme,
}

impl<R, S, P> AppController<R, S, P>
where
    R: LocationRepository,
    S: PreferenceStore,
    P: LocationProvider,
{
    /// Takes ownership of the storage handles and runs the startup sequence.
    ///
    /// # Errors
    /// - `Storage` when the schema cannot be created; the controller is
    ///   unusable without it.
    ///
    /// A failed theme or record load is logged and leaves the default
    /// (light theme, empty list) in place.
    pub fn start(repo: R, prefs: S, provider: P) -> ControllerResult<Self> {
        let started_at = Instant::now();
        let mut controller = Self {
            repo,
            prefs,
            capture: CaptureService::new(provider),
            loading: false,
            capture_started_at: None,
            locations: Vec::new(),
            theme: Theme::default(),
        };

        if let Err(err) = controller.repo.ensure_schema() {
            error!(
                "event=app_start module=app status=error error_code=schema_failed error={}",
                err
            );
            return Err(err.into());
        }

        controller.load_theme();
        if let Err(err) = controller.reload() {
            warn!(
                "event=app_start module=app status=degraded error_code={} error={}",
                err.code(),
                err
            );
        }

        info!(
            "event=app_start module=app status=ok duration_ms={} records={} theme={:?}",
            started_at.elapsed().as_millis(),
            controller.locations.len(),
            controller.theme.mode()
        );
        Ok(controller)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn locations(&self) -> &[LocationRecord] {
        &self.locations
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn snapshot(&self) -> AppSnapshot {
        AppSnapshot {
            loading: self.loading,
            theme_mode: self.theme.mode(),
            locations: self.locations.clone(),
        }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn preferences(&self) -> &S {
        &self.prefs
    }

    /// Mutable access to the provider, e.g. to stage a platform report.
    pub fn provider_mut(&mut self) -> &mut P {
        self.capture.provider_mut()
    }

    /// Replaces the in-memory list with the full persisted set.
    ///
    /// On failure the previous list is kept as-is.
    pub fn reload(&mut self) -> ControllerResult<usize> {
        match self.repo.load_all() {
            Ok(records) => {
                self.locations = records;
                Ok(self.locations.len())
            }
            Err(err) => {
                error!(
                    "event=locations_load module=app status=error error_code=storage_failure error={}",
                    err
                );
                Err(err.into())
            }
        }
    }

    /// Flips the theme and persists the new flag.
    ///
    /// Returns the new mode. On `Err`, the flip is still applied in memory.
    pub fn toggle_theme(&mut self) -> ControllerResult<ThemeMode> {
        self.theme.toggle();
        let mode = self.theme.mode();

        if let Err(err) = self.prefs.save_dark_mode(mode.is_dark()) {
            error!(
                "event=theme_toggle module=app status=error error_code=preference_failure theme={:?} error={}",
                mode, err
            );
            return Err(err.into());
        }

        info!(
            "event=theme_toggle module=app status=ok theme={:?}",
            mode
        );
        Ok(mode)
    }

    /// Captures one location and refreshes the list.
    ///
    /// Same as `begin_capture` followed by `complete_capture`.
    pub fn capture_location(&mut self) -> ControllerResult<LocationRecord> {
        self.begin_capture()?;
        self.complete_capture()
    }

    /// Marks a capture as pending and sets the loading flag.
    ///
    /// Shells whose permission prompt and fix run outside the core call this
    /// before starting platform work, so snapshots taken meanwhile report
    /// `loading=true`.
    ///
    /// # Errors
    /// - `CaptureInProgress` when a capture is already pending.
    pub fn begin_capture(&mut self) -> ControllerResult<()> {
        if self.loading {
            warn!("event=location_capture module=app status=rejected error_code=busy");
            return Err(ControllerError::CaptureInProgress);
        }
        self.loading = true;
        self.capture_started_at = Some(Instant::now());
        info!("event=location_capture module=app status=start");
        Ok(())
    }

    /// Runs permission -> fix -> append -> reload for the pending capture
    /// and clears the loading flag whatever the outcome.
    ///
    /// Starts a capture implicitly when none is pending. Returns the stored
    /// record on success.
    ///
    /// # Errors
    /// - `PermissionDenied`: nothing is read or written.
    /// - `LocationUnavailable`: no fix, nothing written.
    /// - `Storage`: insert or reload failed; the list keeps its prior value.
    pub fn complete_capture(&mut self) -> ControllerResult<LocationRecord> {
        let started_at = self.capture_started_at.unwrap_or_else(Instant::now);
        self.loading = true;
        let result = self.run_capture();
        self.loading = false;
        self.capture_started_at = None;

        match &result {
            Ok(record) => info!(
                "event=location_capture module=app status=ok id={} records={} duration_ms={}",
                record.id,
                self.locations.len(),
                started_at.elapsed().as_millis()
            ),
            Err(ControllerError::PermissionDenied) => info!(
                "event=location_capture module=app status=aborted error_code=permission_denied duration_ms={}",
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=location_capture module=app status=error error_code={} duration_ms={} error={}",
                err.code(),
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }

    /// Drops a pending capture without touching storage.
    ///
    /// Returns whether a capture was pending.
    pub fn cancel_capture(&mut self) -> bool {
        let was_pending = self.loading;
        if was_pending {
            info!("event=location_capture module=app status=cancelled");
        }
        self.loading = false;
        self.capture_started_at = None;
        was_pending
    }

    /// Releases the storage handles.
    pub fn shutdown(self) -> ControllerResult<()> {
        let records = self.locations.len();
        self.repo.close()?;
        info!(
            "event=app_shutdown module=app status=ok records={}",
            records
        );
        Ok(())
    }

    fn run_capture(&mut self) -> ControllerResult<LocationRecord> {
        let permission = self.capture.request_permission()?;
        if !permission.is_granted() {
            return Err(ControllerError::PermissionDenied);
        }

        let coordinate = self.capture.current_coordinate()?;
        let record = self.repo.append(&coordinate)?;
        let records = self.repo.load_all()?;
        self.locations = records;
        Ok(record)
    }

    fn load_theme(&mut self) {
        match self.prefs.load_dark_mode() {
            Ok(Some(dark)) => self.theme = Theme::new(ThemeMode::from_dark_flag(dark)),
            Ok(None) => {}
            Err(err) => error!(
                "event=theme_load module=app status=error error_code=preference_failure error={}",
                err
            ),
        }
    }
}
