//! Persisted site preferences
//!
//! A small JSON document on disk. A missing or unreadable file yields the
//! defaults; writes go through a temporary file and a rename.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::theme::Theme;
use crate::types::{FolioError, Result};

/// Everything the service remembers between restarts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub theme: Theme,
}

/// File-backed preference storage
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read preferences, falling back to defaults
    pub fn load(&self) -> Preferences {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No preferences at {}, using defaults", self.path.display());
                return Preferences::default();
            }
            Err(e) => {
                warn!("Failed to read {}: {}, using defaults", self.path.display(), e);
                return Preferences::default();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("Invalid preferences in {}: {}, using defaults", self.path.display(), e);
            Preferences::default()
        })
    }

    pub fn save(&self, preferences: &Preferences) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(preferences)
            .map_err(|e| FolioError::Internal(format!("Failed to encode preferences: {e}")))?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::new(dir.path().join("prefs.json"));
        assert_eq!(store.load(), Preferences::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::new(dir.path().join("nested/prefs.json"));

        store.save(&Preferences { theme: Theme::Dark }).unwrap();
        assert_eq!(store.load().theme, Theme::Dark);
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(PreferenceStore::new(path).load(), Preferences::default());
    }
}
