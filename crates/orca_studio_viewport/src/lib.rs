// SPDX-License-Identifier: MIT OR Apache-2.0
//! Orca Studio scene viewport.
//!
//! The viewport is a single rendering surface that draws a spinning,
//! per-face coloured cube with OpenGL 3.3 core:
//!
//! - [`SceneViewport`] owns the shader program, vertex buffer and vertex
//!   array and walks them through an explicit lifecycle
//!   (see [`SurfaceState`]).
//! - [`GlApi`] is the narrow capability interface the surface talks to.
//!   It is implemented for [`glow::Context`]; tests use a recording fake.
//! - [`FrameTicker`] is the redraw cadence. The surface holds no timing
//!   logic of its own; whoever owns the ticker calls
//!   [`SceneViewport::render_frame`] once per redraw.
//!
//! The host supplies the context (see [`SurfaceFormat`]) and forwards two
//! notifications: "context is current" ([`SceneViewport::initialize`]) and
//! "surface resized" ([`SceneViewport::resize`]).

pub mod error;
pub mod format;
pub mod geometry;
pub mod gl;
pub mod math;
pub mod shaders;
pub mod surface;
pub mod ticker;

#[cfg(test)]
mod testing;

pub use error::{Result, ShaderStage, ViewportError};
pub use format::SurfaceFormat;
pub use geometry::{Vertex, CUBE_VERTICES};
pub use gl::GlApi;
pub use surface::{SceneViewport, SurfaceState};
pub use ticker::FrameTicker;
