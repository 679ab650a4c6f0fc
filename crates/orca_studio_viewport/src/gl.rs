// SPDX-License-Identifier: MIT OR Apache-2.0
//! GL capability interface used by the rendering surface.
//!
//! [`GlApi`] is the subset of `glow::HasContext` the viewport needs, with
//! the `unsafe` confined to the [`glow::Context`] implementation below.
//! Every method must be called on the thread that owns the current context.

use crate::error::ShaderStage;
use glow::HasContext;

/// GL entry points consumed by [`crate::SceneViewport`].
pub trait GlApi {
    /// Shader object name
    type Shader: Copy;
    /// Program object name
    type Program: Copy;
    /// Buffer object name
    type Buffer: Copy;
    /// Vertex array object name
    type VertexArray: Copy;
    /// Uniform location
    type UniformLocation;

    /// `GL_VERSION` string of the current context
    fn version_string(&self) -> String;

    /// Create an empty shader object for `stage`
    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String>;
    /// Upload `source` and compile; returns the compile status
    fn compile_shader(&self, shader: Self::Shader, source: &str) -> bool;
    /// Compiler output for `shader`
    fn shader_info_log(&self, shader: Self::Shader) -> String;
    /// Delete a shader object
    fn delete_shader(&self, shader: Self::Shader);

    /// Create an empty program object
    fn create_program(&self) -> Result<Self::Program, String>;
    /// Attach a compiled shader to a program
    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    /// Detach a shader from a program
    fn detach_shader(&self, program: Self::Program, shader: Self::Shader);
    /// Link `program`; returns the link status
    fn link_program(&self, program: Self::Program) -> bool;
    /// Linker output for `program`
    fn program_info_log(&self, program: Self::Program) -> String;
    /// Delete a program object
    fn delete_program(&self, program: Self::Program);
    /// Bind (or unbind with `None`) a program
    fn use_program(&self, program: Option<Self::Program>);
    /// Look up a uniform by name
    fn uniform_location(&self, program: Self::Program, name: &str) -> Option<Self::UniformLocation>;
    /// Upload a column-major 4x4 matrix to the bound program
    fn uniform_matrix4(&self, location: Option<&Self::UniformLocation>, columns: &[f32; 16]);

    /// Create a vertex array object
    fn create_vertex_array(&self) -> Result<Self::VertexArray, String>;
    /// Bind (or unbind with `None`) a vertex array
    fn bind_vertex_array(&self, vertex_array: Option<Self::VertexArray>);
    /// Delete a vertex array object
    fn delete_vertex_array(&self, vertex_array: Self::VertexArray);

    /// Create a buffer object
    fn create_buffer(&self) -> Result<Self::Buffer, String>;
    /// Bind (or unbind with `None`) the `ARRAY_BUFFER` target
    fn bind_array_buffer(&self, buffer: Option<Self::Buffer>);
    /// Allocate and fill the bound `ARRAY_BUFFER` with static data
    fn upload_array_buffer(&self, data: &[u8]);
    /// Delete a buffer object
    fn delete_buffer(&self, buffer: Self::Buffer);

    /// Enable a generic vertex attribute
    fn enable_vertex_attrib(&self, index: u32);
    /// Describe a float attribute of the bound `ARRAY_BUFFER`, offsets in bytes
    fn vertex_attrib_f32(&self, index: u32, components: i32, stride: i32, offset: i32);

    /// Set the colour used by [`GlApi::clear_color_and_depth`]
    fn set_clear_color(&self, rgba: [f32; 4]);
    /// Toggle `GL_DEPTH_TEST`
    fn set_depth_test(&self, enabled: bool);
    /// Clear the colour and depth buffers
    fn clear_color_and_depth(&self);
    /// Non-indexed `GL_TRIANGLES` draw
    fn draw_triangles(&self, first: i32, count: i32);
}

fn shader_kind(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    }
}

// SAFETY (applies to every block below): the caller guarantees the context
// is current on this thread, and every object name passed in was created by
// this same context and not yet deleted.
#[allow(unsafe_code)]
impl GlApi for glow::Context {
    type Shader = glow::Shader;
    type Program = glow::Program;
    type Buffer = glow::Buffer;
    type VertexArray = glow::VertexArray;
    type UniformLocation = glow::UniformLocation;

    fn version_string(&self) -> String {
        // SAFETY: GL_VERSION is a valid string parameter.
        unsafe { self.get_parameter_string(glow::VERSION) }
    }

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String> {
        // SAFETY: stage maps to a valid shader kind.
        unsafe { HasContext::create_shader(self, shader_kind(stage)) }
    }

    fn compile_shader(&self, shader: Self::Shader, source: &str) -> bool {
        // SAFETY: shader is a live object of this context.
        unsafe {
            self.shader_source(shader, source);
            HasContext::compile_shader(self, shader);
            self.get_shader_compile_status(shader)
        }
    }

    fn shader_info_log(&self, shader: Self::Shader) -> String {
        // SAFETY: shader is a live object of this context.
        unsafe { self.get_shader_info_log(shader) }
    }

    fn delete_shader(&self, shader: Self::Shader) {
        // SAFETY: shader is a live object of this context.
        unsafe { HasContext::delete_shader(self, shader) }
    }

    fn create_program(&self) -> Result<Self::Program, String> {
        // SAFETY: no arguments.
        unsafe { HasContext::create_program(self) }
    }

    fn attach_shader(&self, program: Self::Program, shader: Self::Shader) {
        // SAFETY: both names are live objects of this context.
        unsafe { HasContext::attach_shader(self, program, shader) }
    }

    fn detach_shader(&self, program: Self::Program, shader: Self::Shader) {
        // SAFETY: both names are live objects of this context.
        unsafe { HasContext::detach_shader(self, program, shader) }
    }

    fn link_program(&self, program: Self::Program) -> bool {
        // SAFETY: program is a live object of this context.
        unsafe {
            HasContext::link_program(self, program);
            self.get_program_link_status(program)
        }
    }

    fn program_info_log(&self, program: Self::Program) -> String {
        // SAFETY: program is a live object of this context.
        unsafe { self.get_program_info_log(program) }
    }

    fn delete_program(&self, program: Self::Program) {
        // SAFETY: program is a live object of this context.
        unsafe { HasContext::delete_program(self, program) }
    }

    fn use_program(&self, program: Option<Self::Program>) {
        // SAFETY: program is None or a linked program of this context.
        unsafe { HasContext::use_program(self, program) }
    }

    fn uniform_location(
        &self,
        program: Self::Program,
        name: &str,
    ) -> Option<Self::UniformLocation> {
        // SAFETY: program is a linked program of this context.
        unsafe { self.get_uniform_location(program, name) }
    }

    fn uniform_matrix4(&self, location: Option<&Self::UniformLocation>, columns: &[f32; 16]) {
        // SAFETY: the slice holds exactly 16 floats; a None location is ignored by GL.
        unsafe { self.uniform_matrix_4_f32_slice(location, false, columns) }
    }

    fn create_vertex_array(&self) -> Result<Self::VertexArray, String> {
        // SAFETY: no arguments.
        unsafe { HasContext::create_vertex_array(self) }
    }

    fn bind_vertex_array(&self, vertex_array: Option<Self::VertexArray>) {
        // SAFETY: vertex_array is None or a live object of this context.
        unsafe { HasContext::bind_vertex_array(self, vertex_array) }
    }

    fn delete_vertex_array(&self, vertex_array: Self::VertexArray) {
        // SAFETY: vertex_array is a live object of this context.
        unsafe { HasContext::delete_vertex_array(self, vertex_array) }
    }

    fn create_buffer(&self) -> Result<Self::Buffer, String> {
        // SAFETY: no arguments.
        unsafe { HasContext::create_buffer(self) }
    }

    fn bind_array_buffer(&self, buffer: Option<Self::Buffer>) {
        // SAFETY: buffer is None or a live object of this context.
        unsafe { self.bind_buffer(glow::ARRAY_BUFFER, buffer) }
    }

    fn upload_array_buffer(&self, data: &[u8]) {
        // SAFETY: a buffer is bound to ARRAY_BUFFER by the caller; GL copies the slice.
        unsafe { self.buffer_data_u8_slice(glow::ARRAY_BUFFER, data, glow::STATIC_DRAW) }
    }

    fn delete_buffer(&self, buffer: Self::Buffer) {
        // SAFETY: buffer is a live object of this context.
        unsafe { HasContext::delete_buffer(self, buffer) }
    }

    fn enable_vertex_attrib(&self, index: u32) {
        // SAFETY: a vertex array is bound by the caller.
        unsafe { self.enable_vertex_attrib_array(index) }
    }

    fn vertex_attrib_f32(&self, index: u32, components: i32, stride: i32, offset: i32) {
        // SAFETY: a vertex array and an ARRAY_BUFFER are bound by the caller.
        unsafe {
            self.vertex_attrib_pointer_f32(index, components, glow::FLOAT, false, stride, offset)
        }
    }

    fn set_clear_color(&self, rgba: [f32; 4]) {
        // SAFETY: plain state setter.
        unsafe { self.clear_color(rgba[0], rgba[1], rgba[2], rgba[3]) }
    }

    fn set_depth_test(&self, enabled: bool) {
        // SAFETY: plain capability toggle.
        unsafe {
            if enabled {
                self.enable(glow::DEPTH_TEST);
            } else {
                self.disable(glow::DEPTH_TEST);
            }
        }
    }

    fn clear_color_and_depth(&self) {
        // SAFETY: valid buffer bit mask.
        unsafe { self.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT) }
    }

    fn draw_triangles(&self, first: i32, count: i32) {
        // SAFETY: a program and a vertex array covering [first, first + count) are bound.
        unsafe { self.draw_arrays(glow::TRIANGLES, first, count) }
    }
}
