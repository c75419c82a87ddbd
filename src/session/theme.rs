//! Theme context
//!
//! Two states, one symmetric transition. The current theme is written back
//! to the preference store after every change.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

use super::preferences::{PreferenceStore, Preferences};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("Unknown theme: {other}")),
        }
    }
}

/// Process-wide theme state
#[derive(Debug)]
pub struct ThemeContext {
    theme: Theme,
    store: Option<PreferenceStore>,
}

impl ThemeContext {
    /// In-memory context, nothing persisted
    pub fn new(initial: Theme) -> Self {
        Self {
            theme: initial,
            store: None,
        }
    }

    /// Context seeded from the persisted preference (light if none)
    pub fn load(store: PreferenceStore) -> Self {
        let theme = store.load().theme;
        info!("Theme preference: {} ({})", theme, store.path().display());
        Self {
            theme,
            store: Some(store),
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_dark(&self) -> bool {
        self.theme.is_dark()
    }

    pub fn toggle(&mut self) -> Theme {
        self.set(self.theme.toggled())
    }

    pub fn set(&mut self, theme: Theme) -> Theme {
        self.theme = theme;
        self.persist();
        theme
    }

    fn persist(&self) {
        if let Some(store) = &self.store {
            if let Err(e) = store.save(&Preferences { theme: self.theme }) {
                warn!("Failed to persist theme preference: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_twice_is_identity() {
        for initial in [Theme::Light, Theme::Dark] {
            let mut ctx = ThemeContext::new(initial);
            ctx.toggle();
            assert_ne!(ctx.theme(), initial);
            ctx.toggle();
            assert_eq!(ctx.theme(), initial);
        }
    }

    #[test]
    fn test_default_is_light() {
        assert_eq!(Theme::default(), Theme::Light);
        assert!(!ThemeContext::new(Theme::default()).is_dark());
    }

    #[test]
    fn test_parse() {
        assert_eq!("Dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!(" light ".parse::<Theme>().unwrap(), Theme::Light);
        assert!("sepia".parse::<Theme>().is_err());
    }

    #[test]
    fn test_preference_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        let mut ctx = ThemeContext::load(PreferenceStore::new(&path));
        assert_eq!(ctx.theme(), Theme::Light);
        assert_eq!(ctx.toggle(), Theme::Dark);

        let reloaded = ThemeContext::load(PreferenceStore::new(&path));
        assert!(reloaded.is_dark());
    }
}
