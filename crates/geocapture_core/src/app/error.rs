//! Controller error taxonomy.

use crate::location::LocationError;
use crate::prefs::PreferenceError;
use crate::repo::location_repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ControllerResult<T> = Result<T, ControllerError>;

/// Failures of controller actions.
#[derive(Debug)]
pub enum ControllerError {
    /// User refused foreground location permission.
    PermissionDenied,
    /// A capture is already pending.
    CaptureInProgress,
    /// Permission prompt failed or no fix could be produced.
    LocationUnavailable(LocationError),
    /// Schema bootstrap, insert or query failed.
    Storage(RepoError),
    /// Dark-mode flag could not be read or written.
    Preference(PreferenceError),
}

/// Modal alert text a shell shows for a failed action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: &'static str,
    pub message: String,
}

impl ControllerError {
    /// Stable machine-readable code used in logs and FFI envelopes.
    pub fn code(&self) -> &'static str {
        match self {
            Self::PermissionDenied => "permission_denied",
            Self::CaptureInProgress => "busy",
            Self::LocationUnavailable(_) => "location_unavailable",
            Self::Storage(_) => "storage_failure",
            Self::Preference(_) => "preference_failure",
        }
    }

    /// User-facing alert for this error.
    pub fn alert(&self) -> Alert {
        match self {
            Self::PermissionDenied => Alert {
                title: "Permissão negada",
                message: "Permissão para localização foi negada.".to_string(),
            },
            Self::CaptureInProgress => Alert {
                title: "Captura em andamento",
                message: "Aguarde a captura atual terminar.".to_string(),
            },
            Self::LocationUnavailable(_) => Alert {
                title: "Localização indisponível",
                message: "Não foi possível obter a localização atual.".to_string(),
            },
            Self::Storage(_) => Alert {
                title: "Erro de armazenamento",
                message: "Não foi possível salvar ou carregar as localizações.".to_string(),
            },
            Self::Preference(_) => Alert {
                title: "Erro de preferências",
                message: "Não foi possível salvar o modo escuro.".to_string(),
            },
        }
    }
}

impl Display for ControllerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PermissionDenied => write!(f, "location permission denied"),
            Self::CaptureInProgress => write!(f, "a location capture is already in progress"),
            Self::LocationUnavailable(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::Preference(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ControllerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::PermissionDenied | Self::CaptureInProgress => None,
            Self::LocationUnavailable(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::Preference(err) => Some(err),
        }
    }
}

impl From<LocationError> for ControllerError {
    fn from(value: LocationError) -> Self {
        Self::LocationUnavailable(value)
    }
}

impl From<RepoError> for ControllerError {
    fn from(value: RepoError) -> Self {
        Self::Storage(value)
    }
}

impl From<PreferenceError> for ControllerError {
    fn from(value: PreferenceError) -> Self {
        Self::Preference(value)
    }
}
