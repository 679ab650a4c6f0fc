// SPDX-License-Identifier: MIT OR Apache-2.0
//! Pixel format and context version the viewport asks the host for.

/// Context requirements for the scene viewport.
///
/// The host window uses this to pick a framebuffer config and to create
/// the GL context before handing it to [`crate::SceneViewport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceFormat {
    /// Depth buffer size in bits
    pub depth_bits: u8,
    /// Requested GL major version
    pub major: u8,
    /// Requested GL minor version
    pub minor: u8,
    /// Request a core profile context
    pub core_profile: bool,
}

impl SurfaceFormat {
    /// 24-bit depth, OpenGL 3.3 core
    pub const DEFAULT: Self = Self {
        depth_bits: 24,
        major: 3,
        minor: 3,
        core_profile: true,
    };
}

impl Default for SurfaceFormat {
    fn default() -> Self {
        Self::DEFAULT
    }
}
