//! Vertex types for rendering.

use bytemuck::{Pod, Zeroable};

/// Standard vertex with position, normal, UV coordinates, and color.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coords: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub fn with_color(position: [f32; 3], normal: [f32; 3], tex_coords: [f32; 2], color: [f32; 4]) -> Self {
        Self {
            position,
            normal,
            tex_coords,
            color,
        }
    }

    /// Byte stride of one vertex in a vertex buffer.
    pub const fn stride() -> usize {
        std::mem::size_of::<Vertex>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_is_tightly_packed() {
        // 3 + 3 + 2 + 4 floats
        assert_eq!(Vertex::stride(), 12 * 4);
        let v = Vertex::with_color([1.0, 2.0, 3.0], [0.0, 1.0, 0.0], [0.5, 0.5], [1.0; 4]);
        let bytes: &[u8] = bytemuck::bytes_of(&v);
        assert_eq!(bytes.len(), Vertex::stride());
    }
}
