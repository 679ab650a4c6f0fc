// SPDX-License-Identifier: MIT OR Apache-2.0
//! Welcome screen: create, open or reopen a project before the editor starts.

use crate::project::{self, normalize_project_path};
use crate::recent::RecentEntry;
use crate::settings::SettingsStore;
use crate::theme::ThemeColors;
use std::path::{Path, PathBuf};

/// Window title while the welcome screen is shown
pub const WELCOME_TITLE: &str = "Welcome to Orca Studio";
/// Minimum window size while the welcome screen is shown
pub const WELCOME_MIN_SIZE: [f32; 2] = [900.0, 600.0];
/// Studio version shown under the logo
pub const STUDIO_VERSION_LABEL: &str = "Version 0.7.8 (Engine Preview)";

const LEFT_PANEL_WIDTH: f32 = 320.0;

/// Simple file dialog state
#[derive(Debug, Clone, Copy, PartialEq)]
enum FileDialogMode {
    None,
    NewProject,
    OpenProject,
}

/// Modal error shown over the welcome screen
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorDialog {
    /// Window title
    pub title: &'static str,
    /// Message body
    pub message: String,
}

/// The welcome screen
pub struct WelcomeScreen {
    file_dialog_mode: FileDialogMode,
    file_dialog_path: String,
    error: Option<ErrorDialog>,
    recent: Vec<RecentEntry>,
    selected_recent: Option<usize>,
    colors: ThemeColors,
}

impl WelcomeScreen {
    /// Create the welcome screen with the current recent list.
    pub fn new(store: &SettingsStore) -> Self {
        let mut screen = Self {
            file_dialog_mode: FileDialogMode::None,
            file_dialog_path: String::new(),
            error: None,
            recent: Vec::new(),
            selected_recent: None,
            colors: ThemeColors::default(),
        };
        screen.refresh_recent(store);
        screen
    }

    /// Error dialog currently shown, if any
    pub fn error(&self) -> Option<&ErrorDialog> {
        self.error.as_ref()
    }

    /// Recent projects that existed when the list was last refreshed
    pub fn recent(&self) -> &[RecentEntry] {
        &self.recent
    }

    fn refresh_recent(&mut self, store: &SettingsStore) {
        self.recent = store.settings().recent_projects.existing();
        self.selected_recent = None;
    }

    /// Create a project at the user-entered `input` path. Returns the path of
    /// the new project file on success.
    pub fn create_new(&mut self, input: &str, store: &mut SettingsStore) -> Option<PathBuf> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        let path = normalize_project_path(Path::new(input));
        match project::create_project(&path) {
            Ok(_) => {
                store.touch_recent(&path);
                tracing::debug!("Successfully created and opening new project: {}", path.display());
                Some(path)
            }
            Err(e) => {
                tracing::error!("{e}");
                self.error = Some(ErrorDialog {
                    title: "Error Creating Project",
                    message: "Failed to create the project file or directory structure.\n\
                              Please check directory permissions."
                        .to_string(),
                });
                None
            }
        }
    }

    /// Open the project file at the user-entered `input` path.
    pub fn open_existing(&mut self, input: &str, store: &mut SettingsStore) -> Option<PathBuf> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        let path = PathBuf::from(input);
        if !path.is_file() {
            tracing::warn!("Project file not found: {}", path.display());
            self.error = Some(ErrorDialog {
                title: "Project Not Found",
                message: format!("The project file '{}' does not exist.", path.display()),
            });
            return None;
        }

        store.touch_recent(&path);
        tracing::debug!("Opening project: {}", path.display());
        Some(path)
    }

    /// Reopen a project from the recent list. A file that vanished is
    /// reported and dropped from the list.
    pub fn open_recent(&mut self, path: &Path, store: &mut SettingsStore) -> Option<PathBuf> {
        if !path.exists() {
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            tracing::warn!("Recent project no longer exists: {}", path.display());

            self.error = Some(ErrorDialog {
                title: "Project Not Found",
                message: format!(
                    "The project file '{file_name}' no longer exists at this location. \
                     It will be removed from the recent list."
                ),
            });
            store.remove_recent(path);
            self.refresh_recent(store);
            return None;
        }

        store.touch_recent(path);
        tracing::debug!("Recent project selected: {}", path.display());
        Some(path.to_path_buf())
    }

    /// Title of the window while this screen is shown
    pub fn title(&self) -> &'static str {
        WELCOME_TITLE
    }

    /// Render the welcome screen. Returns the project to open, if one was
    /// chosen this frame.
    pub fn ui(&mut self, ctx: &egui::Context, store: &mut SettingsStore) -> Option<PathBuf> {
        let modal_open = self.file_dialog_mode != FileDialogMode::None || self.error.is_some();
        let mut opened = None;

        egui::SidePanel::left("welcome_left")
            .exact_width(LEFT_PANEL_WIDTH)
            .resizable(false)
            .frame(
                egui::Frame::none()
                    .fill(self.colors.bar)
                    .inner_margin(egui::Margin {
                        left: 30.0,
                        right: 30.0,
                        top: 40.0,
                        bottom: 30.0,
                    }),
            )
            .show(ctx, |ui| {
                if modal_open {
                    ui.disable();
                }
                self.left_panel(ui);
            });

        egui::CentralPanel::default()
            .frame(
                egui::Frame::none()
                    .fill(self.colors.panel)
                    .inner_margin(egui::Margin {
                        left: 40.0,
                        right: 40.0,
                        top: 40.0,
                        bottom: 30.0,
                    }),
            )
            .show(ctx, |ui| {
                if modal_open {
                    ui.disable();
                }
                if let Some(path) = self.recent_list(ui) {
                    opened = self.open_recent(&path, store);
                }
            });

        if let Some(path) = self.show_file_dialog(ctx, store) {
            opened = Some(path);
        }
        self.show_error_dialog(ctx);

        opened
    }

    fn left_panel(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 0.0;
            ui.label(egui::RichText::new("Orca").size(36.0).color(self.colors.accent));
            ui.label(egui::RichText::new(" Studio").size(36.0));
        });
        ui.label(egui::RichText::new(STUDIO_VERSION_LABEL).color(self.colors.text_dim));
        ui.add_space(40.0);

        ui.label(egui::RichText::new("Start a Project").size(18.0));
        ui.add_space(12.0);

        let button_size = egui::vec2(ui.available_width(), 40.0);
        let primary = |text: &str| {
            let label = egui::RichText::new(text)
                .size(15.0)
                .strong()
                .color(egui::Color32::WHITE);
            egui::Button::new(label)
                .fill(self.colors.accent)
                .min_size(button_size)
        };

        if ui
            .add(primary("New Project"))
            .on_hover_text("Create a blank project or use a template.")
            .clicked()
        {
            self.file_dialog_mode = FileDialogMode::NewProject;
            self.file_dialog_path = dirs::home_dir()
                .unwrap_or_default()
                .join("NewOrcaProject")
                .display()
                .to_string();
        }

        ui.add_space(6.0);

        if ui
            .add(primary("Open Existing"))
            .on_hover_text("Open an existing Orca project file (.orca).")
            .clicked()
        {
            self.file_dialog_mode = FileDialogMode::OpenProject;
            self.file_dialog_path = dirs::home_dir()
                .map(|home| format!("{}{}", home.display(), std::path::MAIN_SEPARATOR))
                .unwrap_or_default();
        }

        ui.with_layout(egui::Layout::bottom_up(egui::Align::LEFT), |ui| {
            for link in ["Community Forums", "Documentation"] {
                if ui.link(egui::RichText::new(link).color(self.colors.accent)).clicked() {
                    tracing::info!("{link} is not available in this build");
                }
            }
            ui.label(egui::RichText::new("Resources").color(self.colors.text_dim));
        });
    }

    /// Draw the recent list. Returns the path of a double-clicked entry.
    fn recent_list(&mut self, ui: &mut egui::Ui) -> Option<PathBuf> {
        ui.label(egui::RichText::new("Recent Projects").size(18.0));
        ui.add_space(12.0);

        let mut activated = None;

        egui::Frame::none()
            .stroke(egui::Stroke::new(1.0, self.colors.border_strong))
            .rounding(5.0)
            .show(ui, |ui| {
                ui.set_min_size(ui.available_size());
                egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
                    if self.recent.is_empty() {
                        ui.add_space(8.0);
                        ui.weak("  No recent projects");
                    }

                    for (index, entry) in self.recent.iter().enumerate() {
                        let selected = self.selected_recent == Some(index);
                        let fill = if selected {
                            self.colors.accent
                        } else {
                            egui::Color32::TRANSPARENT
                        };

                        let row = egui::Frame::none()
                            .fill(fill)
                            .inner_margin(egui::Margin::same(8.0))
                            .show(ui, |ui| {
                                ui.set_width(ui.available_width());
                                ui.horizontal(|ui| {
                                    ui.vertical(|ui| {
                                        ui.label(egui::RichText::new(&entry.name).strong());
                                        ui.label(
                                            egui::RichText::new(&entry.directory)
                                                .size(11.0)
                                                .color(self.colors.text_dim),
                                        );
                                    });
                                    let right = egui::Layout::right_to_left(egui::Align::Center);
                                    ui.with_layout(right, |ui| {
                                        ui.label(
                                            egui::RichText::new(entry.modified_label())
                                                .size(11.0)
                                                .color(self.colors.text_dim),
                                        );
                                    });
                                });
                            })
                            .response;

                        let row_id = ui.id().with(("recent", index));
                        let response = ui.interact(row.rect, row_id, egui::Sense::click());
                        if response.clicked() {
                            self.selected_recent = Some(index);
                        }
                        if response.double_clicked() {
                            activated = Some(entry.path.clone());
                        }
                        ui.separator();
                    }
                });
            });

        activated
    }

    fn show_file_dialog(
        &mut self,
        ctx: &egui::Context,
        store: &mut SettingsStore,
    ) -> Option<PathBuf> {
        let (title, action_text) = match self.file_dialog_mode {
            FileDialogMode::NewProject => ("Create New Orca Project", "Create"),
            FileDialogMode::OpenProject => ("Open Orca Project", "Open"),
            FileDialogMode::None => return None,
        };

        let mut should_close = false;
        let mut submitted = false;

        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Path:");
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut self.file_dialog_path)
                            .hint_text("Orca Project Files (*.orca)")
                            .desired_width(360.0),
                    );
                    if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        submitted = true;
                    }
                });

                ui.add_space(10.0);

                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        should_close = true;
                    }
                    if ui.button(action_text).clicked() {
                        submitted = true;
                    }
                });
            });

        let mut opened = None;
        if submitted {
            let input = self.file_dialog_path.clone();
            opened = match self.file_dialog_mode {
                FileDialogMode::NewProject => self.create_new(&input, store),
                FileDialogMode::OpenProject => self.open_existing(&input, store),
                FileDialogMode::None => None,
            };
            should_close = true;
        }

        if should_close {
            self.file_dialog_mode = FileDialogMode::None;
        }
        opened
    }

    fn show_error_dialog(&mut self, ctx: &egui::Context) {
        let Some(error) = &self.error else {
            return;
        };

        let mut should_close = false;

        egui::Window::new(error.title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(egui::RichText::new(&error.message).color(self.colors.text));
                ui.add_space(10.0);
                if ui.button("OK").clicked() {
                    should_close = true;
                }
            });

        if should_close {
            self.error = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::StudioSettings;

    fn store_in(dir: &Path) -> SettingsStore {
        SettingsStore::new(Some(dir.join("settings.ron")), StudioSettings::default())
    }

    #[test]
    fn test_create_new_appends_extension_and_remembers() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(dir.path());
        let mut screen = WelcomeScreen::new(&store);

        let input = dir.path().join("Racer").join("Racer");
        let opened = screen.create_new(&input.display().to_string(), &mut store).unwrap();

        assert_eq!(opened, dir.path().join("Racer").join("Racer.orca"));
        assert!(opened.is_file());
        assert_eq!(store.settings().recent_projects.files()[0], opened);
        assert!(screen.error().is_none());
    }

    #[test]
    fn test_create_new_failure_shows_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        let mut store = SettingsStore::in_memory();
        let mut screen = WelcomeScreen::new(&store);

        let input = blocker.join("Game.orca").display().to_string();
        assert!(screen.create_new(&input, &mut store).is_none());
        assert_eq!(screen.error().unwrap().title, "Error Creating Project");
        assert!(store.settings().recent_projects.files().is_empty());
    }

    #[test]
    fn test_blank_input_does_nothing() {
        let mut store = SettingsStore::in_memory();
        let mut screen = WelcomeScreen::new(&store);

        assert!(screen.create_new("   ", &mut store).is_none());
        assert!(screen.open_existing("", &mut store).is_none());
        assert!(screen.error().is_none());
    }

    #[test]
    fn test_open_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Game.orca");
        project::create_project(&path).unwrap();

        let mut store = SettingsStore::in_memory();
        let mut screen = WelcomeScreen::new(&store);

        let missing = dir.path().join("Other.orca").display().to_string();
        assert!(screen.open_existing(&missing, &mut store).is_none());
        assert_eq!(screen.error().unwrap().title, "Project Not Found");

        let opened = screen.open_existing(&path.display().to_string(), &mut store);
        assert_eq!(opened, Some(path.clone()));
        assert_eq!(store.settings().recent_projects.files(), &[path]);
    }

    #[test]
    fn test_open_recent_missing_is_removed() {
        let dir = tempfile::tempdir().unwrap();
        let kept = dir.path().join("Kept.orca");
        let gone = dir.path().join("Gone.orca");
        project::create_project(&kept).unwrap();
        project::create_project(&gone).unwrap();

        let mut store = store_in(dir.path());
        store.touch_recent(&kept);
        store.touch_recent(&gone);

        let mut screen = WelcomeScreen::new(&store);
        assert_eq!(screen.recent().len(), 2);

        std::fs::remove_file(&gone).unwrap();
        assert!(screen.open_recent(&gone, &mut store).is_none());

        let error = screen.error().unwrap();
        assert_eq!(error.title, "Project Not Found");
        assert!(error.message.contains("'Gone.orca'"));
        assert_eq!(store.settings().recent_projects.files(), &[kept.clone()]);
        assert_eq!(screen.recent().len(), 1);

        let reloaded = StudioSettings::load_from(&dir.path().join("settings.ron")).unwrap();
        assert_eq!(reloaded.recent_projects.files(), &[kept]);
    }

    #[test]
    fn test_open_recent_moves_to_front() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("A.orca");
        let b = dir.path().join("B.orca");
        project::create_project(&a).unwrap();
        project::create_project(&b).unwrap();

        let mut store = SettingsStore::in_memory();
        store.touch_recent(&a);
        store.touch_recent(&b);

        let mut screen = WelcomeScreen::new(&store);
        assert_eq!(screen.open_recent(&a, &mut store), Some(a.clone()));
        assert_eq!(store.settings().recent_projects.files(), &[a, b]);
    }
}
