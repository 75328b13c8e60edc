use std::env;

use crate::config::{PreferenceStore, THEME_KEY};
use crate::surface::Surface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemePreference {
    Dark,
    Light,
}

impl ThemePreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemePreference::Dark => "dark",
            ThemePreference::Light => "light",
        }
    }

    pub fn from_dark(is_dark: bool) -> Self {
        if is_dark {
            ThemePreference::Dark
        } else {
            ThemePreference::Light
        }
    }

    /// Interpret a stored value. Empty means unset; anything other than
    /// `"dark"` is light.
    pub fn from_stored(value: &str) -> Option<Self> {
        if value.is_empty() {
            None
        } else if value == "dark" {
            Some(ThemePreference::Dark)
        } else {
            Some(ThemePreference::Light)
        }
    }

    pub fn is_dark(&self) -> bool {
        *self == ThemePreference::Dark
    }
}

/// Detect whether the terminal has a dark background.
///
/// Reads `COLORFGBG` ("fg;bg" ANSI indices). Background 7 or 15 is light,
/// anything else dark. Unset or unparsable defaults to dark.
pub fn detect_os_dark_mode() -> bool {
    dark_from_colorfgbg(env::var("COLORFGBG").ok().as_deref())
}

fn dark_from_colorfgbg(colorfgbg: Option<&str>) -> bool {
    colorfgbg
        .and_then(|v| v.split(';').next_back())
        .and_then(|bg| bg.trim().parse::<u8>().ok())
        .map(|bg| bg != 7 && bg != 15)
        .unwrap_or(true)
}

/// Owns the dark-mode marker, the indicator icon and the persisted preference.
pub struct ThemeController<S> {
    store: S,
    dark: bool,
    icon: &'static str,
}

impl<S: PreferenceStore> ThemeController<S> {
    /// Resolve the startup theme: a stored preference always wins over the
    /// OS signal.
    pub fn load(store: S, os_prefers_dark: bool, surface: &mut dyn Surface) -> Self {
        let stored = store
            .get(THEME_KEY)
            .and_then(|v| ThemePreference::from_stored(&v));
        let should_be_dark = stored.map(|p| p.is_dark()).unwrap_or(os_prefers_dark);

        tracing::debug!(?stored, os_prefers_dark, "resolved startup theme");

        let mut controller = Self {
            store,
            dark: false,
            icon: "moon",
        };
        controller.apply_theme(should_be_dark, surface);
        controller
    }

    pub fn apply_theme(&mut self, is_dark: bool, surface: &mut dyn Surface) {
        self.dark = is_dark;
        self.icon = if is_dark { "sun" } else { "moon" };
        surface.refresh_icons();
    }

    pub fn toggle_dark_mode(&mut self, surface: &mut dyn Surface) {
        let new_dark = !self.dark;
        let preference = ThemePreference::from_dark(new_dark);

        if let Err(e) = self.store.set(THEME_KEY, preference.as_str()) {
            tracing::warn!(error = %e, "failed to persist theme preference");
        }

        self.apply_theme(new_dark, surface);
    }

    pub fn is_dark(&self) -> bool {
        self.dark
    }

    pub fn preference(&self) -> ThemePreference {
        ThemePreference::from_dark(self.dark)
    }

    /// Lucide name of the indicator icon: `sun` in dark mode, `moon` in light.
    pub fn icon(&self) -> &'static str {
        self.icon
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
