//! Building placement: scatters box structures across a chunk.

use glam::{DVec3, Vec3};

use crate::chunk::ChunkCoord;
use crate::prng::{hash_coords, SeededRandom};
use crate::terrain::height_at;

/// Building materials: `#a0a0a0 #b0b0b0 #8a8a8a #c0c0c0 #909090`.
pub const BUILDING_PALETTE: [[f32; 4]; 5] = [
    [0.627, 0.627, 0.627, 1.0],
    [0.690, 0.690, 0.690, 1.0],
    [0.541, 0.541, 0.541, 1.0],
    [0.753, 0.753, 0.753, 1.0],
    [0.565, 0.565, 0.565, 1.0],
];

/// One placed building.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildingInstance {
    /// World-space centre; the base rests on the terrain.
    pub position: DVec3,
    /// Width, height, depth.
    pub scale: Vec3,
    /// Yaw in radians.
    pub rotation: f32,
    pub color: [f32; 4],
}

/// Inputs for placing buildings in a chunk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildingConfig {
    pub seed: u32,
    pub height_scale: f32,
    /// Takeoff point; no building lands within `exclusion_radius` of it.
    pub spawn_position: DVec3,
    pub exclusion_radius: f64,
}

/// Place the buildings of one chunk.
///
/// A single density draw picks the tier: above 0.7 yields 3–7 candidates,
/// above 0.4 yields 1–3, anything else an empty chunk. Candidates inside the
/// spawn exclusion zone are dropped after their position draw and nothing
/// else is drawn for them.
pub fn generate_buildings(coord: ChunkCoord, chunk_size: f64, config: &BuildingConfig) -> Vec<BuildingInstance> {
    let mut rng = SeededRandom::new(hash_coords(coord.x, coord.z, config.seed) as i64);

    let density = rng.next_f64();
    let count = if density > 0.7 {
        rng.int(3, 8)
    } else if density > 0.4 {
        rng.int(1, 4)
    } else {
        0
    };

    let origin = coord.world_origin(chunk_size);
    let mut buildings = Vec::with_capacity(count.max(0) as usize);

    for _ in 0..count {
        let world_x = origin.x + rng.range(0.0, chunk_size);
        let world_z = origin.z + rng.range(0.0, chunk_size);

        let dx = world_x - config.spawn_position.x;
        let dz = world_z - config.spawn_position.z;
        if (dx * dx + dz * dz).sqrt() < config.exclusion_radius {
            continue;
        }

        let ground = height_at(world_x, world_z, config.seed, config.height_scale) as f64;

        let width = rng.range(3.0, 8.0);
        let height = rng.range(8.0, 30.0);
        let depth = rng.range(3.0, 8.0);
        let rotation = rng.range(0.0, std::f64::consts::TAU);
        let color = BUILDING_PALETTE[rng.int(0, BUILDING_PALETTE.len() as i64) as usize];

        buildings.push(BuildingInstance {
            position: DVec3::new(world_x, ground + height / 2.0, world_z),
            scale: Vec3::new(width as f32, height as f32, depth as f32),
            rotation: rotation as f32,
            color,
        });
    }

    log::trace!("placed {} buildings in chunk {}", buildings.len(), coord);
    buildings
}
