// SPDX-License-Identifier: MIT OR Apache-2.0
//! Recently opened project files.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Maximum number of remembered projects
pub const MAX_RECENT_PROJECTS: usize = 10;

/// Most-recent-first list of project file paths without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecentProjects {
    files: Vec<PathBuf>,
}

impl RecentProjects {
    /// Remembered paths, most recent first
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Move `path` to the front, inserting it if new.
    pub fn touch(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        let path = std::path::absolute(&path).unwrap_or(path);

        self.files.retain(|p| p != &path);
        self.files.insert(0, path);
        self.files.truncate(MAX_RECENT_PROJECTS);
    }

    /// Forget `path`. Returns whether it was present.
    pub fn remove(&mut self, path: &Path) -> bool {
        let before = self.files.len();
        self.files.retain(|p| p != path);
        self.files.len() != before
    }

    /// Entries whose project file still exists on disk.
    pub fn existing(&self) -> Vec<RecentEntry> {
        self.files
            .iter()
            .filter_map(|path| RecentEntry::from_path(path))
            .collect()
    }
}

/// A recent project that is present on disk, ready for display
#[derive(Debug, Clone)]
pub struct RecentEntry {
    /// Full path of the project file
    pub path: PathBuf,
    /// File name up to the first `.`
    pub name: String,
    /// Directory containing the project file
    pub directory: String,
    /// Last modification time of the project file
    pub modified: Option<DateTime<Local>>,
}

impl RecentEntry {
    fn from_path(path: &Path) -> Option<Self> {
        let metadata = std::fs::metadata(path).ok()?;
        if !metadata.is_file() {
            return None;
        }

        Some(Self {
            path: path.to_path_buf(),
            name: crate::project::project_name(path),
            directory: path
                .parent()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            modified: metadata.modified().ok().map(DateTime::<Local>::from),
        })
    }

    /// Modification date as `MM/DD/YYYY h:mm AM`
    pub fn modified_label(&self) -> String {
        self.modified
            .map(|time| time.format("%m/%d/%Y %-I:%M %p").to_string())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touch_moves_to_front_without_duplicates() {
        let mut recent = RecentProjects::default();
        recent.touch("/projects/a.orca");
        recent.touch("/projects/b.orca");
        recent.touch("/projects/a.orca");

        assert_eq!(
            recent.files(),
            &[
                PathBuf::from("/projects/a.orca"),
                PathBuf::from("/projects/b.orca")
            ]
        );
    }

    #[test]
    fn test_touch_keeps_at_most_ten() {
        let mut recent = RecentProjects::default();
        for i in 0..15 {
            recent.touch(format!("/projects/p{i}.orca"));
        }

        assert_eq!(recent.files().len(), MAX_RECENT_PROJECTS);
        assert_eq!(recent.files()[0], PathBuf::from("/projects/p14.orca"));
        assert_eq!(recent.files()[9], PathBuf::from("/projects/p5.orca"));
    }

    #[test]
    fn test_remove() {
        let mut recent = RecentProjects::default();
        recent.touch("/projects/a.orca");
        assert!(recent.remove(Path::new("/projects/a.orca")));
        assert!(!recent.remove(Path::new("/projects/a.orca")));
        assert!(recent.files().is_empty());
    }

    #[test]
    fn test_existing_skips_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("Game.orca");
        std::fs::write(&present, "{}").unwrap();

        let mut recent = RecentProjects::default();
        recent.touch(dir.path().join("Gone.orca"));
        recent.touch(&present);
        recent.touch(dir.path()); // a directory is not a project file

        let entries = recent.existing();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Game");
        assert_eq!(entries[0].directory, dir.path().display().to_string());
        assert!(entries[0].modified.is_some());
    }
}
