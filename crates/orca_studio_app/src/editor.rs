// SPDX-License-Identifier: MIT OR Apache-2.0
//! Editor screen: menu bar, dock area and status bar around the panels.

use crate::menus::{self, MenuAction};
use crate::panel_types::PanelType;
use crate::panels::console::{EntryKind, TracingEvent};
use crate::panels::{
    ConsolePanel, HierarchyPanel, InspectorPanel, ProjectBrowserPanel, ViewportPanel,
};
use crate::state::EditorState;
use crate::theme::EditorTheme;
use egui_dock::{DockArea, DockState, NodeIndex, Style, TabViewer};
use std::path::Path;
use std::sync::mpsc;
use std::time::Duration;

/// Window title while the editor is shown
pub const EDITOR_TITLE: &str = "Orca(R) Studio";
/// Minimum window size while the editor is shown
pub const EDITOR_MIN_SIZE: [f32; 2] = [860.0, 640.0];

/// Clock format of the status bar
const STATUS_CLOCK_FORMAT: &str = "%I:%M %p %m/%d/%Y";

/// Status bar clock text for `time`
pub fn format_status_clock(time: &chrono::NaiveDateTime) -> String {
    time.format(STATUS_CLOCK_FORMAT).to_string()
}

/// Screen change requested by the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorRequest {
    /// Go back to the welcome screen
    CloseProject,
    /// Quit the studio
    Exit,
}

/// Tab viewer for the dock area
pub struct EditorTabViewer<'a> {
    state: &'a mut EditorState,
    viewport: &'a mut ViewportPanel,
    hierarchy: &'a mut HierarchyPanel,
    project_browser: &'a mut ProjectBrowserPanel,
    inspector: &'a mut InspectorPanel,
    console: &'a mut ConsolePanel,
}

impl<'a> TabViewer for EditorTabViewer<'a> {
    type Tab = PanelType;

    fn title(&mut self, tab: &mut Self::Tab) -> egui::WidgetText {
        format!("{} {}", tab.icon(), tab.name()).into()
    }

    fn ui(&mut self, ui: &mut egui::Ui, tab: &mut Self::Tab) {
        match tab {
            PanelType::Viewport => self.viewport.ui(ui),
            PanelType::Hierarchy => self.hierarchy.ui(ui, self.state),
            PanelType::Project => self.project_browser.ui(ui, self.state),
            PanelType::Inspector => self.inspector.ui(ui, self.state),
            PanelType::Console => self.console.ui(ui),
        }
    }

    fn closeable(&mut self, _tab: &mut Self::Tab) -> bool {
        true
    }

    fn clear_background(&self, tab: &Self::Tab) -> bool {
        *tab != PanelType::Viewport
    }
}

/// The editor screen for one open project
pub struct Editor {
    state: EditorState,
    dock_state: DockState<PanelType>,
    viewport: ViewportPanel,
    hierarchy: HierarchyPanel,
    project_browser: ProjectBrowserPanel,
    inspector: InspectorPanel,
    console: ConsolePanel,
    theme: EditorTheme,
    /// Documentation search box in the status bar
    search: String,
    show_about: bool,
}

impl Editor {
    /// Open the editor on the project at `project_path`.
    pub fn new(project_path: &Path, tracing_rx: Option<mpsc::Receiver<TracingEvent>>) -> Self {
        tracing::info!("Opening project: {}", project_path.display());
        let state = EditorState::open(project_path);

        let hierarchy = if state.project.is_some() {
            HierarchyPanel::new()
        } else {
            HierarchyPanel::empty()
        };

        Self {
            state,
            dock_state: Self::create_default_layout(),
            viewport: ViewportPanel::new(),
            hierarchy,
            project_browser: ProjectBrowserPanel::new(),
            inspector: InspectorPanel::new(),
            console: ConsolePanel::new(tracing_rx),
            theme: EditorTheme::default(),
            search: String::new(),
            show_about: false,
        }
    }

    /// Viewport in the centre, Hierarchy and Project tabbed on the left,
    /// Inspector on the right, Console below the viewport.
    fn create_default_layout() -> DockState<PanelType> {
        let mut dock_state = DockState::new(vec![PanelType::Viewport]);
        let surface = dock_state.main_surface_mut();

        let [center, _right] =
            surface.split_right(NodeIndex::root(), 0.78, vec![PanelType::Inspector]);
        let [center, _left] = surface.split_left(
            center,
            0.25,
            vec![PanelType::Hierarchy, PanelType::Project],
        );
        let [_top, _bottom] = surface.split_below(center, 0.72, vec![PanelType::Console]);

        dock_state
    }

    /// Editor state
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Title of the window while the editor is shown
    pub fn title(&self) -> &'static str {
        EDITOR_TITLE
    }

    /// Release GPU resources and hand back the tracing receiver. The GL
    /// context behind `gl` must be current.
    pub fn shutdown(&mut self, gl: &glow::Context) -> Option<mpsc::Receiver<TracingEvent>> {
        self.viewport.teardown(gl);
        self.console.take_tracing_receiver()
    }

    /// Focus a panel, reopening it if it was closed.
    pub fn open_panel(&mut self, panel: PanelType) {
        if let Some((surface, node, tab)) = self.dock_state.find_tab(&panel) {
            self.dock_state.set_active_tab((surface, node, tab));
            self.dock_state.set_focused_node_and_surface((surface, node));
        } else {
            self.dock_state.push_to_focused_leaf(panel);
        }
    }

    /// Whether a panel is currently docked
    pub fn is_open(&self, panel: PanelType) -> bool {
        self.dock_state.find_tab(&panel).is_some()
    }

    /// Apply a menu choice.
    pub fn handle_menu_action(&mut self, action: MenuAction) -> Option<EditorRequest> {
        match action {
            MenuAction::CloseProject => {
                tracing::info!("Closing project {}", self.state.project_path.display());
                return Some(EditorRequest::CloseProject);
            }
            MenuAction::Exit => return Some(EditorRequest::Exit),
            MenuAction::ClearSelection => self.state.selection = None,
            MenuAction::ClearConsole => {
                self.console.clear();
                self.console.log(EntryKind::System, "Console cleared.");
            }
            MenuAction::ReloadProject => {
                self.state.reload();
                self.hierarchy = if self.state.project.is_some() {
                    HierarchyPanel::new()
                } else {
                    HierarchyPanel::empty()
                };
            }
            MenuAction::ProjectInfo => match &self.state.project {
                Some(project) => tracing::info!(
                    "Project '{}': engine {}, {} game objects, skybox {}",
                    project.project_name,
                    project.engine_version,
                    project.scene.game_objects.len(),
                    project.scene.environment.skybox
                ),
                None => tracing::warn!(
                    "No project data loaded from {}",
                    self.state.project_path.display()
                ),
            },
            MenuAction::OpenPanel(panel) => self.open_panel(panel),
            MenuAction::ResetLayout => self.dock_state = Self::create_default_layout(),
            MenuAction::About => self.show_about = true,
        }
        None
    }

    /// Draw one frame of the editor.
    pub fn update(&mut self, ctx: &egui::Context) -> Option<EditorRequest> {
        let mut request = None;

        egui::TopBottomPanel::top("menu_bar")
            .frame(self.theme.bar_frame())
            .show(ctx, |ui| {
                if let Some(action) = menus::menu_bar(ui) {
                    request = self.handle_menu_action(action);
                }
            });

        self.status_bar(ctx);

        let mut tab_viewer = EditorTabViewer {
            state: &mut self.state,
            viewport: &mut self.viewport,
            hierarchy: &mut self.hierarchy,
            project_browser: &mut self.project_browser,
            inspector: &mut self.inspector,
            console: &mut self.console,
        };

        DockArea::new(&mut self.dock_state)
            .style(Style::from_egui(ctx.style().as_ref()))
            .show(ctx, &mut tab_viewer);

        // The Console tab may be closed; keep draining so nothing piles up.
        if !self.is_open(PanelType::Console) {
            self.console.poll_tracing_events();
        }

        self.show_about_window(ctx);

        request
    }

    fn status_bar(&mut self, ctx: &egui::Context) {
        let colors = &self.theme.colors;
        let frame = self
            .theme
            .bar_frame()
            .stroke(egui::Stroke::new(self.theme.border_width, colors.border));

        egui::TopBottomPanel::bottom("status_bar").frame(frame).show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("Ready").color(colors.success));
                ui.separator();
                ui.label(egui::RichText::new(self.state.project_name()).color(colors.text_dim));

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let now = chrono::Local::now().naive_local();
                    ui.label(format_status_clock(&now));
                    ui.separator();

                    let response = ui.add(
                        egui::TextEdit::singleline(&mut self.search)
                            .hint_text("Search for documentation or tools...")
                            .desired_width(300.0),
                    );
                    if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        let query = self.search.trim();
                        if !query.is_empty() {
                            tracing::info!("No documentation found for '{query}'");
                        }
                    }
                });
            });
        });

        ctx.request_repaint_after(Duration::from_secs(1));
    }

    fn show_about_window(&mut self, ctx: &egui::Context) {
        if !self.show_about {
            return;
        }

        let mut open = true;
        egui::Window::new("About Orca Studio")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.spacing_mut().item_spacing.x = 0.0;
                    let accent = self.theme.colors.accent;
                    ui.label(egui::RichText::new("Orca").size(24.0).color(accent));
                    ui.label(egui::RichText::new(" Studio").size(24.0));
                });
                ui.label(crate::welcome::STUDIO_VERSION_LABEL);
                ui.label(format!("Build {}", env!("CARGO_PKG_VERSION")));
            });

        if !open {
            self.show_about = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor() -> (tempfile::TempDir, Editor) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Demo.orca");
        crate::project::create_project(&path).unwrap();
        let editor = Editor::new(&path, None);
        (dir, editor)
    }

    #[test]
    fn test_default_layout_has_every_panel() {
        let (_dir, editor) = editor();
        for panel in PanelType::ALL {
            assert!(editor.is_open(panel), "{} missing", panel.name());
        }
        assert!(editor.state().project.is_some());
    }

    #[test]
    fn test_reopen_closed_panel() {
        let (_dir, mut editor) = editor();

        let location = editor.dock_state.find_tab(&PanelType::Inspector).unwrap();
        assert_eq!(editor.dock_state.remove_tab(location), Some(PanelType::Inspector));
        assert!(!editor.is_open(PanelType::Inspector));

        assert_eq!(editor.handle_menu_action(MenuAction::OpenPanel(PanelType::Inspector)), None);
        assert!(editor.is_open(PanelType::Inspector));
    }

    #[test]
    fn test_reset_layout() {
        let (_dir, mut editor) = editor();

        let location = editor.dock_state.find_tab(&PanelType::Console).unwrap();
        editor.dock_state.remove_tab(location);
        editor.handle_menu_action(MenuAction::ResetLayout);

        for panel in PanelType::ALL {
            assert!(editor.is_open(panel));
        }
    }

    #[test]
    fn test_menu_requests() {
        let (_dir, mut editor) = editor();
        editor.state.selection = Some(1);

        assert_eq!(editor.handle_menu_action(MenuAction::ClearSelection), None);
        assert_eq!(editor.state().selection, None);
        assert_eq!(
            editor.handle_menu_action(MenuAction::CloseProject),
            Some(EditorRequest::CloseProject)
        );
        assert_eq!(editor.handle_menu_action(MenuAction::Exit), Some(EditorRequest::Exit));
    }

    #[test]
    fn test_status_clock_format() {
        let time = chrono::NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(15, 7, 0)
            .unwrap();
        assert_eq!(format_status_clock(&time), "03:07 PM 03/09/2024");
    }
}
