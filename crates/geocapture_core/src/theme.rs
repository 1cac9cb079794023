//! Light/dark color palettes and the active theme.
//!
//! Palettes are static role -> color tables in the Material 3 role naming the
//! mobile shell consumes. Nothing here is computed or persisted; only the
//! dark-mode flag is stored (see `prefs`).

use serde::{Deserialize, Serialize};

/// Static mapping from semantic color role to `#RRGGBB` value.
#[derive(Debug, PartialEq, Eq)]
pub struct Palette {
    pub name: &'static str,
    pub colors: &'static [(&'static str, &'static str)],
}

impl Palette {
    /// Looks up one role, e.g. `"background"`.
    pub fn color(&self, role: &str) -> Option<&'static str> {
        self.colors
            .iter()
            .find(|(name, _)| *name == role)
            .map(|(_, value)| *value)
    }
}

pub static LIGHT_PALETTE: Palette = Palette {
    name: "light",
    colors: &[
        ("primary", "#6750A4"),
        ("onPrimary", "#FFFFFF"),
        ("primaryContainer", "#EADDFF"),
        ("onPrimaryContainer", "#21005D"),
        ("secondary", "#625B71"),
        ("onSecondary", "#FFFFFF"),
        ("background", "#FFFBFE"),
        ("onBackground", "#1C1B1F"),
        ("surface", "#FFFBFE"),
        ("onSurface", "#1C1B1F"),
        ("surfaceVariant", "#E7E0EC"),
        ("onSurfaceVariant", "#49454F"),
        ("outline", "#79747E"),
        ("error", "#B3261E"),
        ("onError", "#FFFFFF"),
    ],
};

pub static DARK_PALETTE: Palette = Palette {
    name: "dark",
    colors: &[
        ("primary", "#D0BCFF"),
        ("onPrimary", "#381E72"),
        ("primaryContainer", "#4F378B"),
        ("onPrimaryContainer", "#EADDFF"),
        ("secondary", "#CCC2DC"),
        ("onSecondary", "#332D41"),
        ("background", "#1C1B1F"),
        ("onBackground", "#E6E1E5"),
        ("surface", "#1C1B1F"),
        ("onSurface", "#E6E1E5"),
        ("surfaceVariant", "#49454F"),
        ("onSurfaceVariant", "#CAC4D0"),
        ("outline", "#938F99"),
        ("error", "#F2B8B5"),
        ("onError", "#601410"),
    ],
};

/// Which palette is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn from_dark_flag(dark: bool) -> Self {
        if dark {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn palette(self) -> &'static Palette {
        match self {
            Self::Light => &LIGHT_PALETTE,
            Self::Dark => &DARK_PALETTE,
        }
    }
}

/// Active theme: mode flag and palette always change together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    mode: ThemeMode,
    palette: &'static Palette,
}

impl Theme {
    pub fn new(mode: ThemeMode) -> Self {
        Self {
            mode,
            palette: mode.palette(),
        }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn is_dark(&self) -> bool {
        self.mode.is_dark()
    }

    pub fn palette(&self) -> &'static Palette {
        self.palette
    }

    /// Flips mode and palette in one step.
    pub fn toggle(&mut self) {
        *self = Self::new(self.mode.toggled());
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ThemeMode::Light)
    }
}

#[cfg(test)]
mod tests {
    use super::{Theme, ThemeMode, DARK_PALETTE, LIGHT_PALETTE};

    #[test]
    fn palettes_define_the_same_roles() {
        let light_roles: Vec<_> = LIGHT_PALETTE.colors.iter().map(|(role, _)| *role).collect();
        let dark_roles: Vec<_> = DARK_PALETTE.colors.iter().map(|(role, _)| *role).collect();
        assert_eq!(light_roles, dark_roles);
    }

    #[test]
    fn toggle_swaps_mode_and_palette_together() {
        let mut theme = Theme::default();
        assert_eq!(theme.palette(), &LIGHT_PALETTE);

        theme.toggle();
        assert_eq!(theme.mode(), ThemeMode::Dark);
        assert_eq!(theme.palette(), &DARK_PALETTE);
        assert_eq!(theme.palette().color("background"), Some("#1C1B1F"));
    }
}
