// SPDX-License-Identifier: MIT OR Apache-2.0
//! Editor state shared by the panels.

use crate::project::{self, ProjectFile};
use std::path::{Path, PathBuf};

/// Numeric id of an entity in the hierarchy
pub type EntityId = u32;

/// State of the open project
#[derive(Debug)]
pub struct EditorState {
    /// Path of the open `.orca` file
    pub project_path: PathBuf,
    /// Parsed project file, if it could be read
    pub project: Option<ProjectFile>,
    /// Entity shown in the inspector
    pub selection: Option<EntityId>,
}

impl EditorState {
    /// Open the project at `path`. A project file that cannot be read is
    /// logged and leaves the editor without project data.
    pub fn open(path: &Path) -> Self {
        let project = match project::open_project(path) {
            Ok(project) => {
                tracing::info!(
                    "Loaded project '{}' (engine {})",
                    project.project_name,
                    project.engine_version
                );
                Some(project)
            }
            Err(e) => {
                tracing::warn!("{e}");
                None
            }
        };

        Self {
            project_path: path.to_path_buf(),
            project,
            selection: None,
        }
    }

    /// Name shown in the window and the project panel
    pub fn project_name(&self) -> String {
        match &self.project {
            Some(project) => project.project_name.clone(),
            None => project::project_name(&self.project_path),
        }
    }

    /// Directory containing the project file
    pub fn project_dir(&self) -> &Path {
        self.project_path.parent().unwrap_or(Path::new("."))
    }

    /// Re-read the project file from disk
    pub fn reload(&mut self) {
        let selection = self.selection;
        let path = self.project_path.clone();
        *self = Self::open(&path);
        self.selection = selection;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_created_project() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Arena.orca");
        project::create_project(&path).unwrap();

        let state = EditorState::open(&path);
        assert_eq!(state.project_name(), "Arena");
        assert_eq!(state.project_dir(), dir.path());
        assert!(state.project.is_some());
        assert_eq!(state.selection, None);
    }

    #[test]
    fn test_open_unreadable_project() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Lost.orca");

        let mut state = EditorState::open(&path);
        assert!(state.project.is_none());
        assert_eq!(state.project_name(), "Lost");

        state.selection = Some(2);
        project::create_project(&path).unwrap();
        state.reload();
        assert!(state.project.is_some());
        assert_eq!(state.selection, Some(2));
    }
}
