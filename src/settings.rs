//! Player preferences
//!
//! Persisted separately from scores. The simulation only reads the
//! handedness; the other toggles belong to the host's audio/haptics layers.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::persistence::{StoreError, read_json, write_json};
use crate::sim::Handedness;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Steering hand, decides the spawn exclusion corner
    pub handedness: Handedness,

    // === Audio ===
    pub music_enabled: bool,
    pub sfx_enabled: bool,

    pub haptics_enabled: bool,
    pub has_seen_tutorial: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            handedness: Handedness::Right,
            music_enabled: true,
            sfx_enabled: true,
            haptics_enabled: true,
            has_seen_tutorial: false,
        }
    }
}

impl Settings {
    /// Restore factory defaults
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Load settings, falling back to defaults when no file exists yet
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        match read_json(path.as_ref())? {
            Some(settings) => {
                log::info!("Loaded settings from {}", path.as_ref().display());
                Ok(settings)
            }
            None => {
                log::info!("Using default settings");
                Ok(Self::default())
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        write_json(path.as_ref(), self)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.handedness, Handedness::Right);
        assert!(s.music_enabled && s.sfx_enabled && s.haptics_enabled);
        assert!(!s.has_seen_tutorial);
    }

    #[test]
    fn test_reset() {
        let mut s = Settings {
            handedness: Handedness::Left,
            sfx_enabled: false,
            has_seen_tutorial: true,
            ..Settings::default()
        };
        s.reset();
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn test_load_missing_uses_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let s = Settings::load(dir.path().join("settings.json")).expect("load");
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.json");
        let s = Settings {
            handedness: Handedness::Left,
            music_enabled: false,
            ..Settings::default()
        };
        s.save(&path).expect("save");
        assert_eq!(Settings::load(&path).expect("load"), s);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "handedness": "left" }"#).expect("write");
        let s = Settings::load(&path).expect("load");
        assert_eq!(s.handedness, Handedness::Left);
        assert!(s.haptics_enabled);
    }
}
