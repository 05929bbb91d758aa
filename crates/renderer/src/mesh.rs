//! CPU-side mesh data and primitive generation.

use crate::vertex::Vertex;

/// Mesh data before upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.indices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Byte size of the vertex and index buffers.
    pub fn byte_size(&self) -> usize {
        self.vertices.len() * Vertex::stride() + self.indices.len() * std::mem::size_of::<u32>()
    }

    /// Unit cube centered at origin, flat-shaded in one color.
    pub fn cube(color: [f32; 4]) -> Self {
        let v = |p: [f32; 3], n: [f32; 3], uv: [f32; 2]| Vertex::with_color(p, n, uv, color);
        let vertices = vec![
            // Front face
            v([-0.5, -0.5, 0.5], [0.0, 0.0, 1.0], [0.0, 1.0]),
            v([0.5, -0.5, 0.5], [0.0, 0.0, 1.0], [1.0, 1.0]),
            v([0.5, 0.5, 0.5], [0.0, 0.0, 1.0], [1.0, 0.0]),
            v([-0.5, 0.5, 0.5], [0.0, 0.0, 1.0], [0.0, 0.0]),
            // Back face
            v([0.5, -0.5, -0.5], [0.0, 0.0, -1.0], [0.0, 1.0]),
            v([-0.5, -0.5, -0.5], [0.0, 0.0, -1.0], [1.0, 1.0]),
            v([-0.5, 0.5, -0.5], [0.0, 0.0, -1.0], [1.0, 0.0]),
            v([0.5, 0.5, -0.5], [0.0, 0.0, -1.0], [0.0, 0.0]),
            // Top face
            v([-0.5, 0.5, 0.5], [0.0, 1.0, 0.0], [0.0, 1.0]),
            v([0.5, 0.5, 0.5], [0.0, 1.0, 0.0], [1.0, 1.0]),
            v([0.5, 0.5, -0.5], [0.0, 1.0, 0.0], [1.0, 0.0]),
            v([-0.5, 0.5, -0.5], [0.0, 1.0, 0.0], [0.0, 0.0]),
            // Bottom face
            v([-0.5, -0.5, -0.5], [0.0, -1.0, 0.0], [0.0, 1.0]),
            v([0.5, -0.5, -0.5], [0.0, -1.0, 0.0], [1.0, 1.0]),
            v([0.5, -0.5, 0.5], [0.0, -1.0, 0.0], [1.0, 0.0]),
            v([-0.5, -0.5, 0.5], [0.0, -1.0, 0.0], [0.0, 0.0]),
            // Right face
            v([0.5, -0.5, 0.5], [1.0, 0.0, 0.0], [0.0, 1.0]),
            v([0.5, -0.5, -0.5], [1.0, 0.0, 0.0], [1.0, 1.0]),
            v([0.5, 0.5, -0.5], [1.0, 0.0, 0.0], [1.0, 0.0]),
            v([0.5, 0.5, 0.5], [1.0, 0.0, 0.0], [0.0, 0.0]),
            // Left face
            v([-0.5, -0.5, -0.5], [-1.0, 0.0, 0.0], [0.0, 1.0]),
            v([-0.5, -0.5, 0.5], [-1.0, 0.0, 0.0], [1.0, 1.0]),
            v([-0.5, 0.5, 0.5], [-1.0, 0.0, 0.0], [1.0, 0.0]),
            v([-0.5, 0.5, -0.5], [-1.0, 0.0, 0.0], [0.0, 0.0]),
        ];

        #[rustfmt::skip]
        let indices = vec![
            0, 1, 2, 2, 3, 0,       // Front
            4, 5, 6, 6, 7, 4,       // Back
            8, 9, 10, 10, 11, 8,    // Top
            12, 13, 14, 14, 15, 12, // Bottom
            16, 17, 18, 18, 19, 16, // Right
            20, 21, 22, 22, 23, 20, // Left
        ];

        Self { vertices, indices }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_has_six_faces() {
        let cube = MeshData::cube([0.5, 0.5, 0.5, 1.0]);
        assert_eq!(cube.vertices.len(), 24);
        assert_eq!(cube.triangle_count(), 12);
        assert!(cube.vertices.iter().all(|v| v.color == [0.5, 0.5, 0.5, 1.0]));
        assert!(cube
            .vertices
            .iter()
            .all(|v| v.position.iter().all(|c| c.abs() == 0.5)));
    }

    #[test]
    fn empty_mesh_reports_empty() {
        assert!(MeshData::default().is_empty());
        assert!(!MeshData::cube([1.0; 4]).is_empty());
    }
}
