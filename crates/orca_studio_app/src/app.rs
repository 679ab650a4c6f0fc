// SPDX-License-Identifier: MIT OR Apache-2.0
//! Studio application setup and event loop.

use crate::editor::{Editor, EditorRequest, EDITOR_MIN_SIZE};
use crate::panels::console::TracingEvent;
use crate::settings::SettingsStore;
use crate::theme::EditorTheme;
use crate::welcome::{WelcomeScreen, WELCOME_MIN_SIZE};
use glutin::config::{ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext, PossiblyCurrentContext,
    Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};
use glutin_winit::DisplayBuilder;
use orca_studio_viewport::SurfaceFormat;
use raw_window_handle::HasWindowHandle;
use std::num::NonZeroU32;
use std::panic::AssertUnwindSafe;
use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::time::{Duration, Instant};
use thiserror::Error;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

/// Studio application errors
#[derive(Debug, Error)]
pub enum EditorError {
    /// Window creation failed
    #[error("Failed to create window: {0}")]
    WindowCreation(String),

    /// No usable OpenGL 3.3 core context
    #[error("Failed to create OpenGL context: {0}")]
    ContextCreation(String),

    /// Painter setup or buffer swap failed
    #[error("Renderer error: {0}")]
    Renderer(String),

    /// Event loop error
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}

/// Result type for studio operations
pub type Result<T> = std::result::Result<T, EditorError>;

fn non_zero(value: u32) -> NonZeroU32 {
    NonZeroU32::new(value).unwrap_or(NonZeroU32::MIN)
}

/// Context API and profile requested for `format`.
fn context_request(format: SurfaceFormat) -> (ContextApi, GlProfile) {
    let api = ContextApi::OpenGl(Some(Version::new(format.major, format.minor)));
    let profile = if format.core_profile {
        GlProfile::Core
    } else {
        GlProfile::Compatibility
    };
    (api, profile)
}

/// Unwind payload raised by [`pick_config`] when no config matched.
struct NoMatchingConfig;

/// The candidate with the most samples. An empty candidate list unwinds with
/// [`NoMatchingConfig`], which [`catch_missing_config`] turns back into a value.
fn pick_config<C>(configs: impl Iterator<Item = C>, samples: impl Fn(&C) -> u8) -> C {
    configs
        .reduce(|best, config| {
            if samples(&config) > samples(&best) {
                config
            } else {
                best
            }
        })
        .unwrap_or_else(|| std::panic::resume_unwind(Box::new(NoMatchingConfig)))
}

/// Run `build`; `None` if its config picker found nothing to pick.
fn catch_missing_config<T>(build: impl FnOnce() -> T) -> Option<T> {
    match std::panic::catch_unwind(AssertUnwindSafe(build)) {
        Ok(value) => Some(value),
        Err(payload) if payload.is::<NoMatchingConfig>() => None,
        Err(payload) => std::panic::resume_unwind(payload),
    }
}

/// Window, GL context and egui painter
struct GraphicsState {
    window: Window,
    gl_context: PossiblyCurrentContext,
    gl_surface: Surface<WindowSurface>,
    painter: egui_glow::Painter,
}

impl GraphicsState {
    /// Create the window with a current GL context matching
    /// [`SurfaceFormat::DEFAULT`].
    #[allow(unsafe_code)]
    fn new(event_loop: &ActiveEventLoop) -> Result<Self> {
        let format = SurfaceFormat::DEFAULT;
        let window_attrs = Window::default_attributes()
            .with_title(crate::welcome::WELCOME_TITLE)
            .with_inner_size(LogicalSize::new(1280, 760))
            .with_min_inner_size(LogicalSize::new(WELCOME_MIN_SIZE[0], WELCOME_MIN_SIZE[1]));

        let template = ConfigTemplateBuilder::new().with_depth_size(format.depth_bits);

        let (window, gl_config) = catch_missing_config(|| {
            DisplayBuilder::new()
                .with_window_attributes(Some(window_attrs))
                .build(event_loop, template, |configs| {
                    pick_config(configs, |config| config.num_samples())
                })
        })
        .ok_or_else(|| {
            EditorError::ContextCreation(format!(
                "no framebuffer config with a {}-bit depth buffer",
                format.depth_bits
            ))
        })?
        .map_err(|e| EditorError::ContextCreation(e.to_string()))?;

        let window = window.ok_or_else(|| {
            EditorError::WindowCreation("display builder returned no window".into())
        })?;
        let raw_handle = window
            .window_handle()
            .map_err(|e| EditorError::WindowCreation(e.to_string()))?
            .as_raw();
        let gl_display = gl_config.display();

        let (api, profile) = context_request(format);
        let context_attrs = ContextAttributesBuilder::new()
            .with_profile(profile)
            .with_context_api(api)
            .build(Some(raw_handle));

        // SAFETY: `raw_handle` belongs to `window`, which outlives the context.
        let not_current = unsafe { gl_display.create_context(&gl_config, &context_attrs) }
            .map_err(|e| EditorError::ContextCreation(e.to_string()))?;

        let size = window.inner_size();
        let surface_attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            raw_handle,
            non_zero(size.width),
            non_zero(size.height),
        );

        // SAFETY: same window handle as above; the surface is dropped with the window.
        let gl_surface = unsafe { gl_display.create_window_surface(&gl_config, &surface_attrs) }
            .map_err(|e| EditorError::ContextCreation(e.to_string()))?;

        let gl_context = not_current
            .make_current(&gl_surface)
            .map_err(|e| EditorError::ContextCreation(e.to_string()))?;

        let vsync = SwapInterval::Wait(NonZeroU32::MIN);
        if let Err(e) = gl_surface.set_swap_interval(&gl_context, vsync) {
            tracing::warn!("Could not enable vsync: {e}");
        }

        // SAFETY: the context is current on this thread.
        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|name| gl_display.get_proc_address(name))
        };
        let gl = Arc::new(gl);

        let painter = egui_glow::Painter::new(Arc::clone(&gl), "", None, false)
            .map_err(|e| EditorError::Renderer(e.to_string()))?;

        if gl_config.depth_size() < format.depth_bits {
            tracing::warn!(
                "Framebuffer depth is {} bits, wanted {}",
                gl_config.depth_size(),
                format.depth_bits
            );
        }

        tracing::info!(
            "OpenGL {}.{} context ready ({} samples, depth {} bits)",
            format.major,
            format.minor,
            gl_config.num_samples(),
            gl_config.depth_size()
        );

        Ok(Self {
            window,
            gl_context,
            gl_surface,
            painter,
        })
    }

    fn resize(&self, size: PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 {
            return;
        }
        self.gl_surface
            .resize(&self.gl_context, non_zero(size.width), non_zero(size.height));
    }

    fn gl(&self) -> &glow::Context {
        self.painter.gl()
    }

    /// Paint one egui frame and present it.
    fn paint(
        &mut self,
        ctx: &egui::Context,
        shapes: Vec<egui::epaint::ClippedShape>,
        textures_delta: &egui::TexturesDelta,
        pixels_per_point: f32,
        clear_color: [f32; 4],
    ) -> Result<()> {
        let size = self.window.inner_size();
        let screen = [size.width, size.height];
        let clipped = ctx.tessellate(shapes, pixels_per_point);

        egui_glow::painter::clear(self.painter.gl(), screen, clear_color);
        self.painter
            .paint_and_update_textures(screen, pixels_per_point, &clipped, textures_delta);

        self.gl_surface
            .swap_buffers(&self.gl_context)
            .map_err(|e| EditorError::Renderer(e.to_string()))
    }

    fn destroy(&mut self) {
        self.painter.destroy();
    }

    fn apply_window_settings(&self, title: &str, min_size: [f32; 2]) {
        self.window.set_title(title);
        self.window
            .set_min_inner_size(Some(LogicalSize::new(min_size[0], min_size[1])));
    }
}

/// Which screen the window shows
enum Screen {
    Welcome(WelcomeScreen),
    Editor(Box<Editor>),
}

/// Screen change decided during a frame
enum Transition {
    OpenProject(PathBuf),
    CloseProject,
    Exit,
}

/// Running state of the studio
struct StudioRunning {
    graphics: GraphicsState,
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    screen: Screen,
}

/// Main studio application
pub struct EditorApp {
    running: Option<StudioRunning>,
    /// Handed to the console of each opened project and returned on close.
    tracing_rx: Option<mpsc::Receiver<TracingEvent>>,
    settings: SettingsStore,
    theme: EditorTheme,
    fatal: Option<EditorError>,
    next_repaint: Option<Instant>,
}

impl EditorApp {
    fn new(settings: SettingsStore, tracing_rx: Option<mpsc::Receiver<TracingEvent>>) -> Self {
        Self {
            running: None,
            tracing_rx,
            settings,
            theme: EditorTheme::default(),
            fatal: None,
            next_repaint: None,
        }
    }

    /// Run the studio until the window closes.
    pub fn run(
        settings: SettingsStore,
        tracing_rx: Option<mpsc::Receiver<TracingEvent>>,
    ) -> Result<()> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut app = EditorApp::new(settings, tracing_rx);
        event_loop.run_app(&mut app)?;

        match app.fatal.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(running) = &mut self.running else {
            return;
        };

        let raw_input = running.egui_state.take_egui_input(&running.graphics.window);
        let mut transition = None;
        let full_output = running.egui_ctx.run(raw_input, |ctx| {
            transition = match &mut running.screen {
                Screen::Welcome(welcome) => welcome
                    .ui(ctx, &mut self.settings)
                    .map(Transition::OpenProject),
                Screen::Editor(editor) => editor.update(ctx).map(|request| match request {
                    EditorRequest::CloseProject => Transition::CloseProject,
                    EditorRequest::Exit => Transition::Exit,
                }),
            };
        });

        let egui::FullOutput {
            platform_output,
            textures_delta,
            shapes,
            pixels_per_point,
            viewport_output,
        } = full_output;

        running
            .egui_state
            .handle_platform_output(&running.graphics.window, platform_output);

        let clear_color = self.theme.colors.background.to_normalized_gamma_f32();
        if let Err(e) = running.graphics.paint(
            &running.egui_ctx,
            shapes,
            &textures_delta,
            pixels_per_point,
            clear_color,
        ) {
            tracing::error!("{e}");
            self.fatal = Some(e);
            event_loop.exit();
            return;
        }

        let delay = viewport_output
            .get(&egui::ViewportId::ROOT)
            .map_or(Duration::MAX, |output| output.repaint_delay);
        self.schedule_repaint(event_loop, delay);

        if let Some(transition) = transition {
            self.apply_transition(event_loop, transition);
        }
    }

    fn schedule_repaint(&mut self, event_loop: &ActiveEventLoop, delay: Duration) {
        let Some(running) = &self.running else {
            return;
        };

        if delay.is_zero() {
            self.next_repaint = None;
            running.graphics.window.request_redraw();
        } else if let Some(at) = Instant::now().checked_add(delay) {
            self.next_repaint = Some(at);
            event_loop.set_control_flow(ControlFlow::WaitUntil(at));
        } else {
            self.next_repaint = None;
            event_loop.set_control_flow(ControlFlow::Wait);
        }
    }

    fn apply_transition(&mut self, event_loop: &ActiveEventLoop, transition: Transition) {
        let Some(running) = &mut self.running else {
            return;
        };

        match transition {
            Transition::OpenProject(path) => {
                let editor = Editor::new(&path, self.tracing_rx.take());
                running
                    .graphics
                    .apply_window_settings(editor.title(), EDITOR_MIN_SIZE);
                running.screen = Screen::Editor(Box::new(editor));
            }
            Transition::CloseProject => {
                if let Screen::Editor(editor) = &mut running.screen {
                    self.tracing_rx = editor.shutdown(running.graphics.gl());
                }
                let welcome = WelcomeScreen::new(&self.settings);
                running
                    .graphics
                    .apply_window_settings(welcome.title(), WELCOME_MIN_SIZE);
                running.screen = Screen::Welcome(welcome);
            }
            Transition::Exit => {
                tracing::info!("Exit requested, exiting...");
                event_loop.exit();
                return;
            }
        }

        running.graphics.window.request_redraw();
    }
}

impl ApplicationHandler for EditorApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return;
        }

        tracing::info!("Creating studio window...");

        let graphics = match GraphicsState::new(event_loop) {
            Ok(graphics) => graphics,
            Err(e) => {
                tracing::error!("{e}");
                self.fatal = Some(e);
                event_loop.exit();
                return;
            }
        };

        let egui_ctx = egui::Context::default();
        self.theme.apply(&egui_ctx);

        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui_ctx.viewport_id(),
            &graphics.window,
            Some(graphics.window.scale_factor() as f32),
            None,
            Some(graphics.painter.max_texture_side()),
        );

        let welcome = WelcomeScreen::new(&self.settings);
        graphics.apply_window_settings(welcome.title(), WELCOME_MIN_SIZE);
        graphics.window.request_redraw();

        tracing::debug!("Window size: {:?}", graphics.window.inner_size());

        self.running = Some(StudioRunning {
            graphics,
            egui_ctx,
            egui_state,
            screen: Screen::Welcome(welcome),
        });
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(running) = &mut self.running else {
            return;
        };

        let response = running
            .egui_state
            .on_window_event(&running.graphics.window, &event);
        if response.repaint {
            running.graphics.window.request_redraw();
        }
        if response.consumed {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                match running.screen {
                    Screen::Welcome(_) => tracing::info!("Welcome screen closed; exiting."),
                    Screen::Editor(_) => tracing::info!("Close requested, exiting..."),
                }
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                tracing::debug!("Window resized to {:?}", new_size);
                running.graphics.resize(new_size);
                running.graphics.window.request_redraw();
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(running), Some(at)) = (&self.running, self.next_repaint) else {
            return;
        };

        if Instant::now() >= at {
            self.next_repaint = None;
            event_loop.set_control_flow(ControlFlow::Wait);
            running.graphics.window.request_redraw();
        } else {
            event_loop.set_control_flow(ControlFlow::WaitUntil(at));
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        let Some(mut running) = self.running.take() else {
            return;
        };

        if let Screen::Editor(editor) = &mut running.screen {
            self.tracing_rx = editor.shutdown(running.graphics.gl());
        }
        running.graphics.destroy();
        tracing::info!("Studio shut down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_request_follows_surface_format() {
        let (api, profile) = context_request(SurfaceFormat::DEFAULT);
        assert!(matches!(api, ContextApi::OpenGl(Some(v)) if v == Version::new(3, 3)));
        assert!(matches!(profile, GlProfile::Core));

        let compat = SurfaceFormat {
            core_profile: false,
            ..SurfaceFormat::DEFAULT
        };
        assert!(matches!(context_request(compat).1, GlProfile::Compatibility));
    }

    #[test]
    fn test_pick_config_prefers_most_samples() {
        let picked = pick_config([2u8, 8, 4].into_iter(), |&samples| samples);
        assert_eq!(picked, 8);
    }

    #[test]
    fn test_no_matching_config_is_an_error_not_a_panic() {
        let missing = catch_missing_config(|| pick_config(std::iter::empty::<u8>(), |&s| s));
        assert_eq!(missing, None);

        let found = catch_missing_config(|| pick_config([4u8].into_iter(), |&s| s));
        assert_eq!(found, Some(4));
    }
}
