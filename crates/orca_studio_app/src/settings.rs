// SPDX-License-Identifier: MIT OR Apache-2.0
//! Persistent studio settings stored as RON in the platform config directory.

use crate::recent::RecentProjects;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory under the platform config dir
pub const SETTINGS_DIR_NAME: &str = "OrcaStudio";
/// Settings file name
pub const SETTINGS_FILE_NAME: &str = "settings.ron";

/// Settings load/save errors
#[derive(Debug, Error)]
pub enum SettingsError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file exists but is not valid settings RON
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Serialization failed
    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] ron::Error),
}

/// User settings that survive restarts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioSettings {
    /// Recently opened projects (`RecentProjects/files`)
    #[serde(rename = "RecentProjects")]
    pub recent_projects: RecentProjects,
    /// Log filter directives used when `RUST_LOG` is not set
    pub log_filter: Option<String>,
}

impl StudioSettings {
    /// `<config_dir>/OrcaStudio/settings.ron`, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(SETTINGS_DIR_NAME).join(SETTINGS_FILE_NAME))
    }

    /// Load settings from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => return Err(err.into()),
        };
        Ok(ron::from_str(&content)?)
    }

    /// Write settings to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let config = ron::ser::PrettyConfig::default().struct_names(true);
        let content = ron::ser::to_string_pretty(self, config)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Settings plus the file they are persisted to.
///
/// Every mutation through the store is written back immediately. Without a
/// path (no config dir) the store works in memory only.
#[derive(Debug)]
pub struct SettingsStore {
    path: Option<PathBuf>,
    settings: StudioSettings,
}

impl SettingsStore {
    /// Wrap already loaded settings
    pub fn new(path: Option<PathBuf>, settings: StudioSettings) -> Self {
        Self { path, settings }
    }

    /// Store that never touches the disk
    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self::new(None, StudioSettings::default())
    }

    /// Current settings
    pub fn settings(&self) -> &StudioSettings {
        &self.settings
    }

    /// Record `path` as the most recently opened project.
    pub fn touch_recent(&mut self, path: &Path) {
        self.settings.recent_projects.touch(path);
        self.persist();
    }

    /// Forget a recent project.
    pub fn remove_recent(&mut self, path: &Path) {
        if self.settings.recent_projects.remove(path) {
            self.persist();
        }
    }

    fn persist(&self) {
        let Some(path) = &self.path else {
            return;
        };
        match self.settings.save_to(path) {
            Ok(()) => tracing::debug!("Saved settings to {}", path.display()),
            Err(e) => tracing::warn!("Failed to save settings to {}: {e}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = StudioSettings::load_from(&dir.path().join("settings.ron")).unwrap();
        assert_eq!(settings, StudioSettings::default());
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.ron");

        let mut settings = StudioSettings {
            log_filter: Some("info".to_string()),
            ..StudioSettings::default()
        };
        settings.recent_projects.touch("/projects/Game.orca");
        settings.save_to(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("RecentProjects"));
        assert!(written.contains("files"));

        let loaded = StudioSettings::load_from(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.ron");
        std::fs::write(&path, "(RecentProjects: [[[").unwrap();

        assert!(matches!(
            StudioSettings::load_from(&path),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_store_persists_recent_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.ron");
        let mut store = SettingsStore::new(Some(path.clone()), StudioSettings::default());

        store.touch_recent(Path::new("/projects/A.orca"));
        store.touch_recent(Path::new("/projects/B.orca"));
        store.remove_recent(Path::new("/projects/A.orca"));

        let loaded = StudioSettings::load_from(&path).unwrap();
        assert_eq!(
            loaded.recent_projects.files(),
            &[PathBuf::from("/projects/B.orca")]
        );
    }
}
