// SPDX-License-Identifier: MIT OR Apache-2.0
//! Fixed cube geometry.

/// Interleaved vertex: position followed by colour
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Object-space position
    pub position: [f32; 3],
    /// Linear RGB colour
    pub color: [f32; 3],
}

impl Vertex {
    /// Attribute location of `aPos`
    pub const POSITION_LOCATION: u32 = 0;
    /// Attribute location of `aColor`
    pub const COLOR_LOCATION: u32 = 1;
    /// Byte distance between consecutive vertices
    pub const STRIDE: i32 = size_of::<Vertex>() as i32;
    /// Byte offset of the position attribute
    pub const POSITION_OFFSET: i32 = 0;
    /// Byte offset of the colour attribute
    pub const COLOR_OFFSET: i32 = size_of::<[f32; 3]>() as i32;

    const fn new(x: f32, y: f32, z: f32, color: [f32; 3]) -> Self {
        Self {
            position: [x, y, z],
            color,
        }
    }
}

const RED: [f32; 3] = [1.0, 0.0, 0.0];
const GREEN: [f32; 3] = [0.0, 1.0, 0.0];
const BLUE: [f32; 3] = [0.0, 0.0, 1.0];
const YELLOW: [f32; 3] = [1.0, 1.0, 0.0];
const CYAN: [f32; 3] = [0.0, 1.0, 1.0];
const MAGENTA: [f32; 3] = [1.0, 0.0, 1.0];

/// Number of vertices drawn per frame
pub const CUBE_VERTEX_COUNT: usize = 36;

/// Unit cube spanning [-1, 1], two triangles per face, one colour per face.
pub const CUBE_VERTICES: [Vertex; CUBE_VERTEX_COUNT] = [
    // +Z
    Vertex::new(-1.0, -1.0, 1.0, RED),
    Vertex::new(1.0, -1.0, 1.0, RED),
    Vertex::new(1.0, 1.0, 1.0, RED),
    Vertex::new(-1.0, -1.0, 1.0, RED),
    Vertex::new(1.0, 1.0, 1.0, RED),
    Vertex::new(-1.0, 1.0, 1.0, RED),
    // -Z
    Vertex::new(1.0, -1.0, -1.0, GREEN),
    Vertex::new(-1.0, -1.0, -1.0, GREEN),
    Vertex::new(-1.0, 1.0, -1.0, GREEN),
    Vertex::new(1.0, -1.0, -1.0, GREEN),
    Vertex::new(-1.0, 1.0, -1.0, GREEN),
    Vertex::new(1.0, 1.0, -1.0, GREEN),
    // +X
    Vertex::new(1.0, -1.0, 1.0, BLUE),
    Vertex::new(1.0, -1.0, -1.0, BLUE),
    Vertex::new(1.0, 1.0, -1.0, BLUE),
    Vertex::new(1.0, -1.0, 1.0, BLUE),
    Vertex::new(1.0, 1.0, -1.0, BLUE),
    Vertex::new(1.0, 1.0, 1.0, BLUE),
    // -X
    Vertex::new(-1.0, -1.0, -1.0, YELLOW),
    Vertex::new(-1.0, -1.0, 1.0, YELLOW),
    Vertex::new(-1.0, 1.0, 1.0, YELLOW),
    Vertex::new(-1.0, -1.0, -1.0, YELLOW),
    Vertex::new(-1.0, 1.0, 1.0, YELLOW),
    Vertex::new(-1.0, 1.0, -1.0, YELLOW),
    // +Y
    Vertex::new(-1.0, 1.0, 1.0, CYAN),
    Vertex::new(1.0, 1.0, 1.0, CYAN),
    Vertex::new(1.0, 1.0, -1.0, CYAN),
    Vertex::new(-1.0, 1.0, 1.0, CYAN),
    Vertex::new(1.0, 1.0, -1.0, CYAN),
    Vertex::new(-1.0, 1.0, -1.0, CYAN),
    // -Y
    Vertex::new(-1.0, -1.0, -1.0, MAGENTA),
    Vertex::new(1.0, -1.0, -1.0, MAGENTA),
    Vertex::new(1.0, -1.0, 1.0, MAGENTA),
    Vertex::new(-1.0, -1.0, -1.0, MAGENTA),
    Vertex::new(1.0, -1.0, 1.0, MAGENTA),
    Vertex::new(-1.0, -1.0, 1.0, MAGENTA),
];

/// Raw bytes of [`CUBE_VERTICES`] as uploaded to the vertex buffer
pub fn cube_bytes() -> &'static [u8] {
    bytemuck::cast_slice(&CUBE_VERTICES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_is_six_tightly_packed_floats() {
        assert_eq!(Vertex::STRIDE, 24);
        assert_eq!(Vertex::POSITION_OFFSET, 0);
        assert_eq!(Vertex::COLOR_OFFSET, 12);
        assert_eq!(cube_bytes().len(), 36 * 24);
    }

    #[test]
    fn test_each_face_is_two_triangles_of_one_colour() {
        for face in CUBE_VERTICES.chunks(6) {
            let color = face[0].color;
            assert!(face.iter().all(|v| v.color == color));

            // All six vertices lie on the same axis-aligned plane.
            let on_plane = (0..3).any(|axis| {
                let value = face[0].position[axis];
                value.abs() == 1.0 && face.iter().all(|v| v.position[axis] == value)
            });
            assert!(on_plane);
        }
    }

    #[test]
    fn test_positions_stay_inside_unit_cube() {
        assert!(CUBE_VERTICES
            .iter()
            .flat_map(|v| v.position)
            .all(|c| c == 1.0 || c == -1.0));
    }
}
