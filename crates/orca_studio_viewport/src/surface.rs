// SPDX-License-Identifier: MIT OR Apache-2.0
//! The scene viewport rendering surface.

use crate::error::{Result, ShaderStage, ViewportError};
use crate::geometry::{self, Vertex, CUBE_VERTEX_COUNT};
use crate::gl::GlApi;
use crate::math::{self, Mat4, Vec3};
use crate::shaders;

/// Background colour of the viewport
pub const CLEAR_COLOR: [f32; 4] = [0.1, 0.1, 0.1, 1.0];
/// Camera position
pub const EYE: Vec3 = [0.0, 0.0, 5.0];
/// Point the camera looks at
pub const TARGET: Vec3 = [0.0, 0.0, 0.0];
/// Camera up vector
pub const UP: Vec3 = [0.0, 1.0, 0.0];
/// Vertical field of view in degrees
pub const FOV_Y_DEGREES: f32 = 45.0;
/// Near clip plane
pub const NEAR_PLANE: f32 = 0.1;
/// Far clip plane
pub const FAR_PLANE: f32 = 100.0;
/// Rotation added after every rendered frame, in degrees
pub const ROTATION_STEP_DEGREES: f32 = 0.5;

/// Lifecycle of a [`SceneViewport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceState {
    /// No GL objects exist yet
    Uninitialized,
    /// Shaders are being compiled and linked
    ShadersPending,
    /// Program is linked, geometry upload in progress
    GeometryPending,
    /// Everything is on the GPU; frames draw the cube
    Ready,
    /// Setup failed; rendering stays disabled for the life of the surface
    Broken,
}

struct Uniforms<L> {
    model: Option<L>,
    view: Option<L>,
    projection: Option<L>,
}

/// Spinning cube renderer bound to one GL context.
///
/// The surface owns exactly one program, one vertex buffer and one vertex
/// array. They are created by [`SceneViewport::initialize`] and released by
/// [`SceneViewport::teardown`]; both must run with the owning context
/// current.
pub struct SceneViewport<G: GlApi> {
    state: SurfaceState,
    rotation: f32,
    aspect: f32,
    size: (u32, u32),
    projection: Mat4,
    program: Option<G::Program>,
    vertex_array: Option<G::VertexArray>,
    buffer: Option<G::Buffer>,
    uniforms: Option<Uniforms<G::UniformLocation>>,
    uploads: u32,
}

impl<G: GlApi> SceneViewport<G> {
    /// Create an uninitialized surface with a square projection.
    pub fn new() -> Self {
        Self {
            state: SurfaceState::Uninitialized,
            rotation: 0.0,
            aspect: 1.0,
            size: (0, 0),
            projection: projection_for(1.0),
            program: None,
            vertex_array: None,
            buffer: None,
            uniforms: None,
            uploads: 0,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> SurfaceState {
        self.state
    }

    /// Whether setup failed and rendering is disabled
    pub fn is_broken(&self) -> bool {
        self.state == SurfaceState::Broken
    }

    /// Rotation about +Y that the next frame will use, in `[0, 360)`
    pub fn rotation_degrees(&self) -> f32 {
        self.rotation
    }

    /// Aspect ratio used by the current projection
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Last size passed to [`SceneViewport::resize`]
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Current projection matrix
    pub fn projection(&self) -> &Mat4 {
        &self.projection
    }

    /// How many times the cube has been uploaded
    pub fn geometry_uploads(&self) -> u32 {
        self.uploads
    }

    /// Set up GL state, build the shader program and upload the cube.
    ///
    /// Calling this on a [`SurfaceState::Ready`] surface does nothing. On a
    /// [`SurfaceState::Broken`] surface it releases anything left over and
    /// returns [`ViewportError::Disabled`].
    pub fn initialize(&mut self, gl: &G) -> Result<()> {
        match self.state {
            SurfaceState::Ready => return Ok(()),
            SurfaceState::Broken => {
                self.release(gl);
                tracing::error!(fatal = true, "Scene viewport rendering is disabled");
                return Err(ViewportError::Disabled);
            }
            _ => {}
        }

        tracing::info!("OpenGL context version: {}", gl.version_string());
        gl.set_clear_color(CLEAR_COLOR);
        gl.set_depth_test(true);

        self.state = SurfaceState::ShadersPending;
        if let Err(err) = self.build_program(gl) {
            tracing::error!(fatal = true, error = %err, "Failed to initialize OpenGL Shaders!");
            return Err(self.disable(gl, err));
        }

        self.state = SurfaceState::GeometryPending;
        if let Err(err) = self.upload_geometry(gl) {
            tracing::error!(fatal = true, error = %err, "Failed to upload viewport geometry");
            return Err(self.disable(gl, err));
        }

        self.state = SurfaceState::Ready;
        tracing::debug!("Scene viewport ready");
        Ok(())
    }

    /// Draw one frame and advance the rotation.
    ///
    /// Returns `false` without touching GL unless the surface is
    /// [`SurfaceState::Ready`].
    pub fn render_frame(&mut self, gl: &G) -> bool {
        if self.state != SurfaceState::Ready {
            return false;
        }
        let (Some(program), Some(vertex_array), Some(uniforms)) =
            (self.program, self.vertex_array, self.uniforms.as_ref())
        else {
            return false;
        };

        // The context is shared with the UI painter, which resets these.
        gl.set_clear_color(CLEAR_COLOR);
        gl.set_depth_test(true);
        gl.clear_color_and_depth();

        gl.use_program(Some(program));
        gl.bind_vertex_array(Some(vertex_array));

        let view = math::look_at(EYE, TARGET, UP);
        let model = math::rotation_y(self.rotation);

        gl.uniform_matrix4(uniforms.projection.as_ref(), &math::to_columns(&self.projection));
        gl.uniform_matrix4(uniforms.view.as_ref(), &math::to_columns(&view));
        gl.uniform_matrix4(uniforms.model.as_ref(), &math::to_columns(&model));

        gl.draw_triangles(0, CUBE_VERTEX_COUNT as i32);

        gl.bind_vertex_array(None);
        gl.use_program(None);
        gl.set_depth_test(false);

        self.advance_rotation();
        true
    }

    /// Recompute the projection for a surface of `width` x `height` pixels.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        self.aspect = aspect_ratio(width, height);
        self.projection = projection_for(self.aspect);
    }

    /// Release the program, buffer and vertex array. Safe to call twice.
    pub fn teardown(&mut self, gl: &G) {
        self.release(gl);
        if self.state != SurfaceState::Broken {
            self.state = SurfaceState::Uninitialized;
        }
    }

    fn advance_rotation(&mut self) {
        self.rotation += ROTATION_STEP_DEGREES;
        if self.rotation >= 360.0 {
            self.rotation -= 360.0;
        }
    }

    fn disable(&mut self, gl: &G, err: ViewportError) -> ViewportError {
        self.release(gl);
        self.state = SurfaceState::Broken;
        err
    }

    fn release(&mut self, gl: &G) {
        if let Some(program) = self.program.take() {
            gl.delete_program(program);
        }
        if let Some(buffer) = self.buffer.take() {
            gl.delete_buffer(buffer);
        }
        if let Some(vertex_array) = self.vertex_array.take() {
            gl.delete_vertex_array(vertex_array);
        }
        self.uniforms = None;
    }

    fn build_program(&mut self, gl: &G) -> Result<()> {
        let vertex = compile_stage(gl, ShaderStage::Vertex, shaders::VERTEX_SOURCE)?;
        let fragment = match compile_stage(gl, ShaderStage::Fragment, shaders::FRAGMENT_SOURCE) {
            Ok(fragment) => fragment,
            Err(err) => {
                gl.delete_shader(vertex);
                return Err(err);
            }
        };

        let program = match gl.create_program() {
            Ok(program) => program,
            Err(reason) => {
                gl.delete_shader(vertex);
                gl.delete_shader(fragment);
                return Err(ViewportError::Allocation {
                    what: "shader program",
                    reason,
                });
            }
        };

        gl.attach_shader(program, vertex);
        gl.attach_shader(program, fragment);
        let linked = gl.link_program(program);

        // Stage objects are not needed once the program is linked (or failed to).
        gl.detach_shader(program, vertex);
        gl.detach_shader(program, fragment);
        gl.delete_shader(vertex);
        gl.delete_shader(fragment);

        if !linked {
            let log = gl.program_info_log(program);
            gl.delete_program(program);
            tracing::warn!(log = %log, "Couldn't link the shader program!");
            return Err(ViewportError::ProgramLink(log));
        }

        self.uniforms = Some(Uniforms {
            model: gl.uniform_location(program, shaders::MODEL_UNIFORM),
            view: gl.uniform_location(program, shaders::VIEW_UNIFORM),
            projection: gl.uniform_location(program, shaders::PROJECTION_UNIFORM),
        });
        self.program = Some(program);
        Ok(())
    }

    fn upload_geometry(&mut self, gl: &G) -> Result<()> {
        let vertex_array = gl
            .create_vertex_array()
            .map_err(|reason| ViewportError::Allocation {
                what: "vertex array",
                reason,
            })?;
        self.vertex_array = Some(vertex_array);

        let buffer = gl
            .create_buffer()
            .map_err(|reason| ViewportError::Allocation {
                what: "vertex buffer",
                reason,
            })?;
        self.buffer = Some(buffer);

        let bytes = geometry::cube_bytes();
        gl.bind_vertex_array(Some(vertex_array));
        gl.bind_array_buffer(Some(buffer));
        gl.upload_array_buffer(bytes);

        gl.vertex_attrib_f32(
            Vertex::POSITION_LOCATION,
            3,
            Vertex::STRIDE,
            Vertex::POSITION_OFFSET,
        );
        gl.enable_vertex_attrib(Vertex::POSITION_LOCATION);
        gl.vertex_attrib_f32(Vertex::COLOR_LOCATION, 3, Vertex::STRIDE, Vertex::COLOR_OFFSET);
        gl.enable_vertex_attrib(Vertex::COLOR_LOCATION);

        gl.bind_array_buffer(None);
        gl.bind_vertex_array(None);

        self.uploads += 1;
        tracing::debug!(
            vertices = CUBE_VERTEX_COUNT,
            bytes = bytes.len(),
            "Uploaded cube geometry"
        );
        Ok(())
    }
}

impl<G: GlApi> Default for SceneViewport<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: GlApi> Drop for SceneViewport<G> {
    fn drop(&mut self) {
        if self.program.is_some() || self.buffer.is_some() || self.vertex_array.is_some() {
            tracing::warn!("Scene viewport dropped without teardown; GL objects leaked");
        }
    }
}

/// `width / height`, or 1.0 when the surface has no height.
///
/// A zero width yields 0.0; the projection then holds an infinite x scale
/// but no NaN, and nothing is visible until the next resize.
pub fn aspect_ratio(width: u32, height: u32) -> f32 {
    if height == 0 {
        1.0
    } else {
        width as f32 / height as f32
    }
}

fn projection_for(aspect: f32) -> Mat4 {
    math::perspective(FOV_Y_DEGREES.to_radians(), aspect, NEAR_PLANE, FAR_PLANE)
}

fn compile_stage<G: GlApi>(gl: &G, stage: ShaderStage, source: &str) -> Result<G::Shader> {
    let shader = gl
        .create_shader(stage)
        .map_err(|reason| ViewportError::Allocation {
            what: "shader",
            reason,
        })?;

    if !gl.compile_shader(shader, source) {
        let log = gl.shader_info_log(shader);
        gl.delete_shader(shader);
        tracing::warn!(log = %log, "Couldn't compile the {} shader!", stage.name());
        return Err(ViewportError::ShaderCompile { stage, log });
    }
    Ok(shader)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, Object, RecordingGl};

    fn ready(gl: &RecordingGl) -> SceneViewport<RecordingGl> {
        let mut viewport = SceneViewport::new();
        viewport.initialize(gl).unwrap();
        viewport
    }

    #[test]
    fn test_initialize_reaches_ready() {
        let gl = RecordingGl::new();
        let mut viewport = ready(&gl);

        assert_eq!(viewport.state(), SurfaceState::Ready);
        assert_eq!(viewport.geometry_uploads(), 1);
        assert!(gl.calls().contains(&Call::ClearColor(CLEAR_COLOR)));
        assert!(gl.calls().contains(&Call::DepthTest(true)));
        // program + buffer + vertex array; the two stage shaders are gone
        assert_eq!(gl.live_objects(), 3);

        viewport.teardown(&gl);
    }

    #[test]
    fn test_upload_layout() {
        let gl = RecordingGl::new();
        let mut viewport = ready(&gl);
        let calls = gl.calls();

        let uploads: Vec<usize> = calls
            .iter()
            .filter_map(|c| match c {
                Call::Upload(bytes) => Some(bytes.len()),
                _ => None,
            })
            .collect();
        assert_eq!(uploads, vec![864]);

        assert!(calls.contains(&Call::AttribPointer {
            index: 0,
            components: 3,
            stride: 24,
            offset: 0,
        }));
        assert!(calls.contains(&Call::AttribPointer {
            index: 1,
            components: 3,
            stride: 24,
            offset: 12,
        }));
        assert!(calls.contains(&Call::EnableAttrib(0)));
        assert!(calls.contains(&Call::EnableAttrib(1)));

        viewport.teardown(&gl);
    }

    #[test]
    fn test_initialize_twice_uploads_once() {
        let gl = RecordingGl::new();
        let mut viewport = ready(&gl);
        viewport.initialize(&gl).unwrap();

        assert_eq!(viewport.geometry_uploads(), 1);
        assert_eq!(gl.created(Object::Buffer), 1);

        viewport.teardown(&gl);
    }

    #[test]
    fn test_render_frame_draws_cube() {
        let gl = RecordingGl::new();
        let mut viewport = ready(&gl);
        gl.clear_calls();

        assert!(viewport.render_frame(&gl));

        let calls = gl.calls();
        assert!(calls.contains(&Call::Clear));
        assert!(calls.contains(&Call::Draw {
            first: 0,
            count: 36
        }));
        let names: Vec<&str> = calls
            .iter()
            .filter_map(|c| match c {
                Call::Uniform { name, .. } => Some(name.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(names, vec!["projection", "view", "model"]);

        // Bindings are restored for whoever draws next.
        assert!(calls.ends_with(&[
            Call::BindVertexArray(None),
            Call::UseProgram(None),
            Call::DepthTest(false),
        ]));

        viewport.teardown(&gl);
    }

    #[test]
    fn test_first_frame_uses_unrotated_model() {
        let gl = RecordingGl::new();
        let mut viewport = ready(&gl);
        gl.clear_calls();
        viewport.render_frame(&gl);

        let model = gl.calls().into_iter().find_map(|c| match c {
            Call::Uniform { name, columns } if name == "model" => Some(columns),
            _ => None,
        });
        assert_eq!(model, Some(math::to_columns(&math::IDENTITY)));

        viewport.teardown(&gl);
    }

    #[test]
    fn test_rotation_advances_and_wraps() {
        let gl = RecordingGl::new();
        let mut viewport = ready(&gl);

        for _ in 0..3 {
            viewport.render_frame(&gl);
        }
        assert_eq!(viewport.rotation_degrees(), 1.5);

        for _ in 3..720 {
            viewport.render_frame(&gl);
        }
        assert_eq!(viewport.rotation_degrees(), 0.0);

        for _ in 0..10 {
            viewport.render_frame(&gl);
        }
        assert_eq!(viewport.rotation_degrees(), 5.0);

        viewport.teardown(&gl);
    }

    #[test]
    fn test_render_before_initialize_is_noop() {
        let gl = RecordingGl::new();
        let mut viewport = SceneViewport::<RecordingGl>::new();

        assert!(!viewport.render_frame(&gl));
        assert!(gl.calls().is_empty());
        assert_eq!(viewport.rotation_degrees(), 0.0);
    }

    #[test]
    fn test_vertex_compile_failure_breaks_surface() {
        let gl = RecordingGl::failing_compile(ShaderStage::Vertex);
        let mut viewport = SceneViewport::new();

        let err = viewport.initialize(&gl).unwrap_err();
        assert!(matches!(
            err,
            ViewportError::ShaderCompile {
                stage: ShaderStage::Vertex,
                ..
            }
        ));
        assert!(viewport.is_broken());
        assert_eq!(gl.live_objects(), 0);
    }

    #[test]
    fn test_broken_surface_never_draws() {
        let gl = RecordingGl::failing_compile(ShaderStage::Fragment);
        let mut viewport = SceneViewport::new();
        assert!(viewport.initialize(&gl).is_err());
        gl.clear_calls();

        for _ in 0..5 {
            assert!(!viewport.render_frame(&gl));
        }
        assert_eq!(gl.count(|c| matches!(c, Call::Draw { .. })), 0);
        assert_eq!(gl.count(|c| matches!(c, Call::UseProgram(_))), 0);
        assert_eq!(gl.count(|c| matches!(c, Call::BindVertexArray(_))), 0);
        assert_eq!(viewport.rotation_degrees(), 0.0);
    }

    #[test]
    fn test_link_failure_releases_everything() {
        let gl = RecordingGl::failing_link();
        let mut viewport = SceneViewport::new();

        let err = viewport.initialize(&gl).unwrap_err();
        assert!(matches!(err, ViewportError::ProgramLink(_)));
        assert_eq!(viewport.state(), SurfaceState::Broken);
        assert_eq!(gl.live_objects(), 0);
        assert_eq!(gl.created(Object::Buffer), 0);
    }

    #[test]
    fn test_reinitialize_after_failure_stays_broken() {
        let gl = RecordingGl::failing_link();
        let mut viewport = SceneViewport::new();
        assert!(viewport.initialize(&gl).is_err());
        gl.clear_calls();

        let err = viewport.initialize(&gl).unwrap_err();
        assert!(matches!(err, ViewportError::Disabled));
        assert!(viewport.is_broken());
        assert_eq!(gl.created(Object::Buffer), 0);
        assert_eq!(gl.created(Object::Program), 0);
        assert_eq!(gl.live_objects(), 0);
    }

    #[test]
    fn test_partial_allocation_failure_releases_vertex_array() {
        let gl = RecordingGl::failing_buffer();
        let mut viewport = SceneViewport::new();

        let err = viewport.initialize(&gl).unwrap_err();
        assert!(matches!(
            err,
            ViewportError::Allocation {
                what: "vertex buffer",
                ..
            }
        ));
        assert!(viewport.is_broken());
        assert_eq!(gl.created(Object::VertexArray), 1);
        assert_eq!(gl.live_objects(), 0);
        assert_eq!(viewport.geometry_uploads(), 0);
    }

    #[test]
    fn test_vertex_array_failure_skips_buffer() {
        let gl = RecordingGl::failing_vertex_array();
        let mut viewport = SceneViewport::new();

        assert!(viewport.initialize(&gl).is_err());
        assert!(viewport.is_broken());
        assert_eq!(gl.created(Object::Buffer), 0);
        assert_eq!(gl.live_objects(), 0);
    }

    #[test]
    fn test_resize_sets_aspect() {
        let mut viewport = SceneViewport::<RecordingGl>::new();

        viewport.resize(800, 600);
        assert!((viewport.aspect() - 800.0 / 600.0).abs() < f32::EPSILON);
        assert_eq!(viewport.size(), (800, 600));

        viewport.resize(640, 0);
        assert_eq!(viewport.aspect(), 1.0);
        assert!(viewport.projection().iter().flatten().all(|v| !v.is_nan()));
    }

    #[test]
    fn test_aspect_ratio_degenerate_sizes() {
        assert_eq!(aspect_ratio(1920, 1080), 1920.0 / 1080.0);
        assert_eq!(aspect_ratio(100, 0), 1.0);
        assert_eq!(aspect_ratio(0, 100), 0.0);
        assert_eq!(aspect_ratio(0, 0), 1.0);
    }

    #[test]
    fn test_resize_to_zero_width() {
        let mut viewport = SceneViewport::<RecordingGl>::new();
        viewport.resize(0, 600);

        assert_eq!(viewport.aspect(), 0.0);
        assert_eq!(viewport.size(), (0, 600));
        assert!(viewport.projection().iter().flatten().all(|v| !v.is_nan()));
    }

    #[test]
    fn test_teardown_is_idempotent() {
        let gl = RecordingGl::new();
        let mut viewport = ready(&gl);

        viewport.teardown(&gl);
        assert_eq!(gl.live_objects(), 0);
        assert_eq!(viewport.state(), SurfaceState::Uninitialized);

        // A second teardown must not delete anything again.
        let deletes = gl.count(|c| matches!(c, Call::Delete(_)));
        viewport.teardown(&gl);
        assert_eq!(gl.count(|c| matches!(c, Call::Delete(_))), deletes);
        assert!(!viewport.render_frame(&gl));
    }
}
