// SPDX-License-Identifier: MIT OR Apache-2.0
//! Project panel - Top-level project folders.

use crate::state::EditorState;

/// Folders listed for every project
pub const PROJECT_FOLDERS: [&str; 4] = ["Assets", "Managers", "Prefabs", "Resources"];

/// The project panel
pub struct ProjectBrowserPanel {
    selected: Option<usize>,
}

impl ProjectBrowserPanel {
    /// Create a new project panel
    pub fn new() -> Self {
        Self { selected: None }
    }

    /// Render the project panel
    pub fn ui(&mut self, ui: &mut egui::Ui, state: &EditorState) {
        ui.horizontal(|ui| {
            ui.strong(state.project_name());
            ui.weak(state.project_dir().display().to_string());
        });

        ui.separator();

        egui::ScrollArea::vertical().show(ui, |ui| {
            for (index, folder) in PROJECT_FOLDERS.iter().enumerate() {
                let text = format!("\u{1f4c1} {folder}");
                if ui.selectable_label(self.selected == Some(index), text).clicked() {
                    self.selected = Some(index);
                    tracing::debug!("Selected project folder: {folder}");
                }
            }
        });
    }
}

impl Default for ProjectBrowserPanel {
    fn default() -> Self {
        Self::new()
    }
}
