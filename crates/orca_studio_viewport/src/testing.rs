// SPDX-License-Identifier: MIT OR Apache-2.0
//! Recording [`GlApi`] fake used by the surface tests.

use crate::error::ShaderStage;
use crate::gl::GlApi;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// Kind of object handed out by [`RecordingGl`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Object {
    Shader(ShaderStage),
    Program,
    Buffer,
    VertexArray,
}

/// A GL call that changes state or draws
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ClearColor([f32; 4]),
    DepthTest(bool),
    Create(Object),
    Delete(Object),
    UseProgram(Option<u32>),
    BindVertexArray(Option<u32>),
    BindArrayBuffer(Option<u32>),
    Upload(Vec<u8>),
    EnableAttrib(u32),
    AttribPointer {
        index: u32,
        components: i32,
        stride: i32,
        offset: i32,
    },
    Uniform {
        name: String,
        columns: [f32; 16],
    },
    Clear,
    Draw {
        first: i32,
        count: i32,
    },
}

/// Fake context that hands out integer names and records every call.
#[derive(Debug, Default)]
pub struct RecordingGl {
    fail_compile: Option<ShaderStage>,
    fail_link: bool,
    fail_vertex_array: bool,
    fail_buffer: bool,
    next_name: Cell<u32>,
    live: RefCell<HashMap<u32, Object>>,
    calls: RefCell<Vec<Call>>,
}

impl RecordingGl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_compile(stage: ShaderStage) -> Self {
        Self {
            fail_compile: Some(stage),
            ..Self::default()
        }
    }

    pub fn failing_link() -> Self {
        Self {
            fail_link: true,
            ..Self::default()
        }
    }

    pub fn failing_vertex_array() -> Self {
        Self {
            fail_vertex_array: true,
            ..Self::default()
        }
    }

    pub fn failing_buffer() -> Self {
        Self {
            fail_buffer: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| predicate(c)).count()
    }

    pub fn created(&self, object: Object) -> usize {
        self.count(|c| *c == Call::Create(object))
    }

    pub fn live_objects(&self) -> usize {
        self.live.borrow().len()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn allocate(&self, object: Object) -> u32 {
        let name = self.next_name.get() + 1;
        self.next_name.set(name);
        self.live.borrow_mut().insert(name, object);
        self.record(Call::Create(object));
        name
    }

    fn release(&self, name: u32) {
        let removed = self.live.borrow_mut().remove(&name);
        match removed {
            Some(object) => self.record(Call::Delete(object)),
            None => panic!("deleted unknown or already deleted GL object {name}"),
        }
    }

    fn kind(&self, name: u32) -> Option<Object> {
        self.live.borrow().get(&name).copied()
    }
}

impl GlApi for RecordingGl {
    type Shader = u32;
    type Program = u32;
    type Buffer = u32;
    type VertexArray = u32;
    type UniformLocation = String;

    fn version_string(&self) -> String {
        "3.3.0 Recording".to_string()
    }

    fn create_shader(&self, stage: ShaderStage) -> Result<u32, String> {
        Ok(self.allocate(Object::Shader(stage)))
    }

    fn compile_shader(&self, shader: u32, source: &str) -> bool {
        assert!(source.starts_with("#version 330 core"));
        match self.kind(shader) {
            Some(Object::Shader(stage)) => self.fail_compile != Some(stage),
            other => panic!("compile on non-shader {other:?}"),
        }
    }

    fn shader_info_log(&self, _shader: u32) -> String {
        "0:1(1): error: syntax error".to_string()
    }

    fn delete_shader(&self, shader: u32) {
        self.release(shader);
    }

    fn create_program(&self) -> Result<u32, String> {
        Ok(self.allocate(Object::Program))
    }

    fn attach_shader(&self, _program: u32, _shader: u32) {}

    fn detach_shader(&self, _program: u32, _shader: u32) {}

    fn link_program(&self, _program: u32) -> bool {
        !self.fail_link
    }

    fn program_info_log(&self, _program: u32) -> String {
        "error: vertex output vColor not consumed".to_string()
    }

    fn delete_program(&self, program: u32) {
        self.release(program);
    }

    fn use_program(&self, program: Option<u32>) {
        self.record(Call::UseProgram(program));
    }

    fn uniform_location(&self, _program: u32, name: &str) -> Option<String> {
        Some(name.to_string())
    }

    fn uniform_matrix4(&self, location: Option<&String>, columns: &[f32; 16]) {
        if let Some(name) = location {
            self.record(Call::Uniform {
                name: name.clone(),
                columns: *columns,
            });
        }
    }

    fn create_vertex_array(&self) -> Result<u32, String> {
        if self.fail_vertex_array {
            return Err("out of memory".to_string());
        }
        Ok(self.allocate(Object::VertexArray))
    }

    fn bind_vertex_array(&self, vertex_array: Option<u32>) {
        self.record(Call::BindVertexArray(vertex_array));
    }

    fn delete_vertex_array(&self, vertex_array: u32) {
        self.release(vertex_array);
    }

    fn create_buffer(&self) -> Result<u32, String> {
        if self.fail_buffer {
            return Err("out of memory".to_string());
        }
        Ok(self.allocate(Object::Buffer))
    }

    fn bind_array_buffer(&self, buffer: Option<u32>) {
        self.record(Call::BindArrayBuffer(buffer));
    }

    fn upload_array_buffer(&self, data: &[u8]) {
        self.record(Call::Upload(data.to_vec()));
    }

    fn delete_buffer(&self, buffer: u32) {
        self.release(buffer);
    }

    fn enable_vertex_attrib(&self, index: u32) {
        self.record(Call::EnableAttrib(index));
    }

    fn vertex_attrib_f32(&self, index: u32, components: i32, stride: i32, offset: i32) {
        self.record(Call::AttribPointer {
            index,
            components,
            stride,
            offset,
        });
    }

    fn set_clear_color(&self, rgba: [f32; 4]) {
        self.record(Call::ClearColor(rgba));
    }

    fn set_depth_test(&self, enabled: bool) {
        self.record(Call::DepthTest(enabled));
    }

    fn clear_color_and_depth(&self) {
        self.record(Call::Clear);
    }

    fn draw_triangles(&self, first: i32, count: i32) {
        self.record(Call::Draw { first, count });
    }
}
