// SPDX-License-Identifier: MIT OR Apache-2.0
//! Viewport error types.

use thiserror::Error;

/// Programmable pipeline stage of a shader object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    /// Vertex shader
    Vertex,
    /// Fragment shader
    Fragment,
}

impl ShaderStage {
    /// Human readable stage name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Vertex => "vertex",
            Self::Fragment => "fragment",
        }
    }
}

/// Errors raised while bringing up or driving the rendering surface
#[derive(Debug, Error)]
pub enum ViewportError {
    /// A shader stage failed to compile
    #[error("Couldn't compile the {} shader: {log}", .stage.name())]
    ShaderCompile {
        /// Stage that failed
        stage: ShaderStage,
        /// Driver info log
        log: String,
    },

    /// The compiled stages failed to link
    #[error("Couldn't link the shader program: {0}")]
    ProgramLink(String),

    /// The driver refused to hand out an object name
    #[error("Failed to allocate {what}: {reason}")]
    Allocation {
        /// Kind of GL object
        what: &'static str,
        /// Driver message
        reason: String,
    },

    /// The surface failed earlier and rendering stays disabled
    #[error("Rendering is disabled for this surface after an earlier failure")]
    Disabled,
}

/// Result type for viewport operations
pub type Result<T> = std::result::Result<T, ViewportError>;
