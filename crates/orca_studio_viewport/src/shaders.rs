// SPDX-License-Identifier: MIT OR Apache-2.0
//! Embedded GLSL sources for the cube program.

/// Vertex stage: transforms `aPos` by `projection * view * model`
pub const VERTEX_SOURCE: &str = r#"#version 330 core

layout (location = 0) in vec3 aPos;
layout (location = 1) in vec3 aColor;

uniform mat4 model;
uniform mat4 view;
uniform mat4 projection;

out vec3 vColor;

void main()
{
    gl_Position = projection * view * model * vec4(aPos, 1.0);
    vColor = aColor;
}
"#;

/// Fragment stage: passes the interpolated vertex colour through
pub const FRAGMENT_SOURCE: &str = r#"#version 330 core

in vec3 vColor;
out vec4 FragColor;

void main()
{
    FragColor = vec4(vColor, 1.0);
}
"#;

/// Name of the model matrix uniform
pub const MODEL_UNIFORM: &str = "model";
/// Name of the view matrix uniform
pub const VIEW_UNIFORM: &str = "view";
/// Name of the projection matrix uniform
pub const PROJECTION_UNIFORM: &str = "projection";
