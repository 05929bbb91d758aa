//! Heightfield terrain chunks.
//!
//! **Seed-based determinism:** heights are a pure function of world-space
//! `(x, z)` and the world seed, never of chunk-local coordinates. The same
//! seed always produces the same height at every position regardless of chunk
//! load order, and neighbouring chunks meet without seams.

use bytemuck::{Pod, Zeroable};
use glam::{DVec3, Vec3};
use noise::NoiseFn;

use crate::chunk::ChunkCoord;
use crate::prng::hash_coords;
use crate::value_noise::FractalNoise;

/// Spatial frequency applied to world coordinates before sampling noise.
pub const TERRAIN_FREQUENCY: f64 = 0.01;
/// Octaves of the terrain height field.
pub const TERRAIN_OCTAVES: u32 = 5;
/// Amplitude falloff per octave.
pub const TERRAIN_PERSISTENCE: f64 = 0.5;
/// World units the sampling origin shifts per unit of seed.
const SEED_OFFSET_SCALE: f64 = 0.1;

const TERRAIN_NOISE: FractalNoise = FractalNoise::new(TERRAIN_OCTAVES, TERRAIN_PERSISTENCE);

/// Terrain height at a world position.
///
/// This is the single height function: chunk meshes and building placement
/// both go through it, so placed objects sit flush with the ground.
pub fn height_at(x: f64, z: f64, seed: u32, height_scale: f32) -> f32 {
    let offset = seed as f64 * SEED_OFFSET_SCALE;
    let n = TERRAIN_NOISE.get([(x + offset) * TERRAIN_FREQUENCY, (z + offset) * TERRAIN_FREQUENCY]);
    (n * height_scale as f64) as f32
}

/// Vertex colour for a height: dark green low, lighter and browner high.
pub fn height_color(height: f32, height_scale: f32) -> [f32; 4] {
    let n = (height + height_scale * 0.5) / height_scale;
    [0.3 + n * 0.4, 0.5 + n * 0.2, 0.35 - n * 0.1, 1.0]
}

/// Vertex for terrain mesh (includes height colour).
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct TerrainVertex {
    /// Chunk-local position; add [`TerrainChunk::origin`] for world space.
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
    pub color: [f32; 4],
}

/// Configuration for terrain generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainConfig {
    /// Edge length of a chunk in world units.
    pub chunk_size: f64,
    /// Quads per chunk edge.
    pub resolution: u32,
    /// Maximum height of terrain.
    pub height_scale: f32,
    /// World seed.
    pub seed: u32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            chunk_size: 200.0,
            resolution: 32,
            height_scale: 30.0,
            seed: 0,
        }
    }
}

/// One generated heightfield chunk.
#[derive(Debug, Clone)]
pub struct TerrainChunk {
    pub coord: ChunkCoord,
    /// World-space corner the mesh is placed at.
    pub origin: DVec3,
    /// `hash_coords(x, z, seed)`; also seeds the chunk's building stream.
    pub chunk_seed: u32,
    pub vertices: Vec<TerrainVertex>,
    pub indices: Vec<u32>,
    /// Heights, row-major by z then x, `(resolution + 1)²` entries.
    pub heightmap: Vec<f32>,
    pub config: TerrainConfig,
}

impl TerrainChunk {
    /// Generate the chunk at `coord`.
    ///
    /// Builds `resolution × resolution` quads over `chunk_size × chunk_size`
    /// world units. Normals are computed on a grid padded by one step on every
    /// side so edge normals include the neighbouring chunks' geometry.
    pub fn generate(coord: ChunkCoord, config: TerrainConfig) -> Self {
        let res = config.resolution.max(1) as usize;
        let verts_per_side = res + 1;
        let step = config.chunk_size / res as f64;
        let origin = coord.world_origin(config.chunk_size);

        let padded_res = verts_per_side + 2;
        let mut padded_vertices = Vec::with_capacity(padded_res * padded_res);

        for pz in 0..padded_res {
            for px in 0..padded_res {
                // px = 1 is the chunk's first column
                let local_x = (px as f64 - 1.0) * step;
                let local_z = (pz as f64 - 1.0) * step;
                let height = height_at(
                    origin.x + local_x,
                    origin.z + local_z,
                    config.seed,
                    config.height_scale,
                );

                padded_vertices.push(TerrainVertex {
                    position: [local_x as f32, height, local_z as f32],
                    normal: [0.0, 1.0, 0.0],
                    uv: [0.0, 0.0],
                    color: height_color(height, config.height_scale),
                });
            }
        }

        Self::calculate_normals(&mut padded_vertices, padded_res);

        let mut vertices = Vec::with_capacity(verts_per_side * verts_per_side);
        let mut heightmap = Vec::with_capacity(verts_per_side * verts_per_side);
        for z in 0..verts_per_side {
            for x in 0..verts_per_side {
                let mut v = padded_vertices[(z + 1) * padded_res + (x + 1)];
                v.uv = [x as f32 / res as f32, z as f32 / res as f32];
                heightmap.push(v.position[1]);
                vertices.push(v);
            }
        }

        let mut indices = Vec::with_capacity(res * res * 6);
        for z in 0..res {
            for x in 0..res {
                let top_left = (z * verts_per_side + x) as u32;
                let top_right = top_left + 1;
                let bottom_left = ((z + 1) * verts_per_side + x) as u32;
                let bottom_right = bottom_left + 1;

                indices.extend([top_left, bottom_left, top_right]);
                indices.extend([top_right, bottom_left, bottom_right]);
            }
        }

        log::trace!("generated terrain chunk {} ({} vertices)", coord, vertices.len());

        Self {
            coord,
            origin,
            chunk_seed: hash_coords(coord.x, coord.z, config.seed),
            vertices,
            indices,
            heightmap,
            config,
        }
    }

    /// Vertices per chunk edge.
    pub fn verts_per_side(&self) -> usize {
        self.config.resolution.max(1) as usize + 1
    }

    /// Height of grid vertex `(x, z)`.
    pub fn vertex_height(&self, x: usize, z: usize) -> f32 {
        self.heightmap[z * self.verts_per_side() + x]
    }

    /// World-space position of grid vertex `(x, z)`.
    pub fn vertex_world_position(&self, x: usize, z: usize) -> DVec3 {
        let p = self.vertices[z * self.verts_per_side() + x].position;
        self.origin + DVec3::new(p[0] as f64, p[1] as f64, p[2] as f64)
    }

    fn calculate_normals(vertices: &mut [TerrainVertex], resolution: usize) {
        // Calculate face normals and accumulate
        let mut normals: Vec<Vec3> = vec![Vec3::ZERO; vertices.len()];

        for z in 0..(resolution - 1) {
            for x in 0..(resolution - 1) {
                let i0 = z * resolution + x;
                let i1 = i0 + 1;
                let i2 = (z + 1) * resolution + x;
                let i3 = i2 + 1;

                let v0: Vec3 = vertices[i0].position.into();
                let v1: Vec3 = vertices[i1].position.into();
                let v2: Vec3 = vertices[i2].position.into();
                let v3: Vec3 = vertices[i3].position.into();

                let n1 = (v2 - v0).cross(v1 - v0).normalize_or_zero();
                normals[i0] += n1;
                normals[i2] += n1;
                normals[i1] += n1;

                let n2 = (v3 - v1).cross(v2 - v1).normalize_or_zero();
                normals[i1] += n2;
                normals[i2] += n2;
                normals[i3] += n2;
            }
        }

        for (vertex, n) in vertices.iter_mut().zip(normals) {
            let n = n.try_normalize().unwrap_or(Vec3::Y);
            vertex.normal = [n.x, n.y, n.z];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(seed: u32) -> TerrainConfig {
        TerrainConfig {
            chunk_size: 200.0,
            resolution: 16,
            height_scale: 30.0,
            seed,
        }
    }

    /// Same seed and chunk must produce identical heightmaps.
    #[test]
    fn terrain_deterministic_same_seed() {
        let a = TerrainChunk::generate(ChunkCoord::new(3, -4), config(98_765));
        let b = TerrainChunk::generate(ChunkCoord::new(3, -4), config(98_765));
        assert_eq!(a.heightmap, b.heightmap);
        assert_eq!(a.chunk_seed, b.chunk_seed);
    }

    /// Different seeds must produce different terrain.
    #[test]
    fn terrain_different_seed_different_heights() {
        let a = TerrainChunk::generate(ChunkCoord::new(0, 0), config(11_111));
        let b = TerrainChunk::generate(ChunkCoord::new(0, 0), config(22_222));
        assert_ne!(a.heightmap, b.heightmap);
    }

    #[test]
    fn mesh_has_expected_topology() {
        let chunk = TerrainChunk::generate(ChunkCoord::new(0, 0), config(1));
        assert_eq!(chunk.vertices.len(), 17 * 17);
        assert_eq!(chunk.indices.len(), 16 * 16 * 6);
        assert!(chunk.indices.iter().all(|&i| (i as usize) < chunk.vertices.len()));
        assert_eq!(chunk.origin, DVec3::ZERO);
    }

    #[test]
    fn heights_match_point_query() {
        let chunk = TerrainChunk::generate(ChunkCoord::new(-2, 5), config(42));
        for &(x, z) in &[(0, 0), (16, 0), (7, 9), (16, 16)] {
            let p = chunk.vertex_world_position(x, z);
            assert_eq!(chunk.vertex_height(x, z), height_at(p.x, p.z, 42, 30.0));
        }
    }

    #[test]
    fn shared_edges_agree_between_neighbours() {
        let here = TerrainChunk::generate(ChunkCoord::new(0, 0), config(42));
        let east = TerrainChunk::generate(ChunkCoord::new(1, 0), config(42));
        let north = TerrainChunk::generate(ChunkCoord::new(0, 1), config(42));
        for i in 0..=16 {
            assert_eq!(here.vertex_height(16, i), east.vertex_height(0, i));
            assert_eq!(here.vertex_height(i, 16), north.vertex_height(i, 0));
            let a = here.vertices[i * 17 + 16].normal;
            let b = east.vertices[i * 17].normal;
            for k in 0..3 {
                assert!((a[k] - b[k]).abs() < 1e-4, "edge normals diverge at row {}", i);
            }
        }
    }

    #[test]
    fn heights_stay_within_scale() {
        let chunk = TerrainChunk::generate(ChunkCoord::new(7, 7), config(5));
        assert!(chunk.heightmap.iter().all(|&h| (0.0..30.0).contains(&h)));
        assert!(chunk.vertices.iter().all(|v| v.normal[1] > 0.0));
    }

    #[test]
    fn color_brightens_with_height() {
        let low = height_color(0.0, 30.0);
        let high = height_color(29.0, 30.0);
        assert!((low[0] - 0.5).abs() < 1e-6);
        assert!(high[0] > low[0]);
        assert!(high[2] < low[2]);
    }

    #[test]
    fn chunk_seed_is_coordinate_hash() {
        let chunk = TerrainChunk::generate(ChunkCoord::new(2, 3), config(9));
        assert_eq!(chunk.chunk_seed, hash_coords(2, 3, 9));
    }
}
