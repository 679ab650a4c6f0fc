// SPDX-License-Identifier: MIT OR Apache-2.0
//! Viewport panel - Hosts the OpenGL scene viewport inside the dock.

use orca_studio_viewport::{FrameTicker, SceneViewport, SurfaceState};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Instant;

/// Scene viewport bound to the window's GL context
pub type SharedViewport = Arc<Mutex<SceneViewport<glow::Context>>>;

/// The scene viewport panel
pub struct ViewportPanel {
    viewport: SharedViewport,
    ticker: FrameTicker,
    /// Stats overlay visibility
    pub show_stats: bool,
}

impl ViewportPanel {
    /// Create a new viewport panel. GL resources are created on the first
    /// paint, when the context is current.
    pub fn new() -> Self {
        Self {
            viewport: Arc::new(Mutex::new(SceneViewport::new())),
            ticker: FrameTicker::default(),
            show_stats: true,
        }
    }

    /// Release GPU resources. The context behind `gl` must be current.
    pub fn teardown(&self, gl: &glow::Context) {
        self.viewport.lock().teardown(gl);
    }

    /// Render the viewport panel
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        let (state, rotation, (width, height)) = {
            let viewport = self.viewport.lock();
            (viewport.state(), viewport.rotation_degrees(), viewport.size())
        };

        ui.horizontal(|ui| {
            ui.checkbox(&mut self.show_stats, "Stats");
        });

        let (rect, _response) = ui.allocate_exact_size(ui.available_size(), egui::Sense::hover());
        let painter = ui.painter_at(rect);

        if state == SurfaceState::Broken {
            painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(25, 25, 25));
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "Rendering disabled: the OpenGL shaders failed to initialize.\nSee the console for details.",
                egui::FontId::proportional(14.0),
                egui::Color32::from_rgb(255, 100, 100),
            );
            return;
        }

        painter.add(self.paint_callback(rect));

        if self.show_stats {
            let stats = format!(
                "{width} x {height} px\nRotation: {rotation:.1}\u{b0}\nFrames: {}",
                self.ticker.frames()
            );
            painter.text(
                rect.left_top() + egui::vec2(8.0, 8.0),
                egui::Align2::LEFT_TOP,
                stats,
                egui::FontId::monospace(11.0),
                egui::Color32::from_rgb(200, 200, 200),
            );
        }

        let wait = self.ticker.tick(Instant::now());
        ui.ctx().request_repaint_after(wait);
    }

    /// Paint callback that initializes, resizes and draws the viewport with
    /// the painter's GL context.
    fn paint_callback(&self, rect: egui::Rect) -> egui::PaintCallback {
        let viewport = Arc::clone(&self.viewport);

        egui::PaintCallback {
            rect,
            callback: Arc::new(egui_glow::CallbackFn::new(move |info, painter| {
                let gl: &glow::Context = painter.gl();
                let mut viewport = viewport.lock();

                let pixels = info.viewport_in_pixels();
                let size = (pixels.width_px.max(0) as u32, pixels.height_px.max(0) as u32);
                if viewport.size() != size {
                    viewport.resize(size.0, size.1);
                }

                if viewport.state() == SurfaceState::Uninitialized {
                    if let Err(e) = viewport.initialize(gl) {
                        tracing::debug!("Scene viewport unavailable: {e}");
                        return;
                    }
                }

                viewport.render_frame(gl);
            })),
        }
    }
}

impl Default for ViewportPanel {
    fn default() -> Self {
        Self::new()
    }
}
