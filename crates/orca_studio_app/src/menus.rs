// SPDX-License-Identifier: MIT OR Apache-2.0
//! Editor menu bar.

use crate::panel_types::PanelType;

/// Something the user picked from the menu bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Return to the welcome screen
    CloseProject,
    /// Quit the studio
    Exit,
    /// Deselect the current entity
    ClearSelection,
    /// Empty the console
    ClearConsole,
    /// Re-read the project file
    ReloadProject,
    /// Log the project summary
    ProjectInfo,
    /// Focus or reopen a panel
    OpenPanel(PanelType),
    /// Restore the default dock layout
    ResetLayout,
    /// Show the about window
    About,
}

/// Draw the File/Edit/Project/Window/Help menu bar.
pub fn menu_bar(ui: &mut egui::Ui) -> Option<MenuAction> {
    let mut action = None;

    egui::menu::bar(ui, |ui| {
        ui.menu_button("File", |ui| {
            item(ui, "Close Project", MenuAction::CloseProject, &mut action);
            ui.separator();
            item(ui, "Exit", MenuAction::Exit, &mut action);
        });

        ui.menu_button("Edit", |ui| {
            item(ui, "Clear Selection", MenuAction::ClearSelection, &mut action);
            item(ui, "Clear Console", MenuAction::ClearConsole, &mut action);
        });

        ui.menu_button("Project", |ui| {
            item(ui, "Reload Project", MenuAction::ReloadProject, &mut action);
            item(ui, "Project Info", MenuAction::ProjectInfo, &mut action);
        });

        ui.menu_button("Window", |ui| {
            for panel in PanelType::ALL {
                let text = format!("{} {}", panel.icon(), panel.name());
                item(ui, &text, MenuAction::OpenPanel(panel), &mut action);
            }
            ui.separator();
            item(ui, "Reset Layout", MenuAction::ResetLayout, &mut action);
        });

        ui.menu_button("Help", |ui| {
            item(ui, "About Orca Studio", MenuAction::About, &mut action);
        });
    });

    action
}

fn item(ui: &mut egui::Ui, text: &str, value: MenuAction, action: &mut Option<MenuAction>) {
    if ui.button(text).clicked() {
        *action = Some(value);
        ui.close_menu();
    }
}
