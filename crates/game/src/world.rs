//! World streaming: keeps the window of chunks around the aircraft resident.
//!
//! Each resident chunk owns the scene handles of its terrain mesh and of its
//! building meshes. Records leave the map only by value through
//! [`ResidentChunk::release`], so every handle is released exactly once.

use std::collections::{HashMap, HashSet};

use engine_core::Transform;
use glam::{DVec3, Quat};
use procgen::{generate_buildings, BuildingConfig, BuildingInstance, ChunkCoord, TerrainChunk, TerrainConfig};
use renderer::{MeshData, MeshHandle, SceneBackend, SceneError, Vertex};

use crate::config::StreamingConfig;

/// What one streaming pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamReport {
    pub loaded: usize,
    pub evicted: usize,
    /// Chunks dropped because the world seed changed.
    pub flushed: usize,
    pub resident: usize,
}

/// A chunk currently materialized in the scene.
#[derive(Debug)]
pub struct ResidentChunk {
    pub terrain: TerrainChunk,
    pub buildings: Vec<BuildingInstance>,
    terrain_mesh: MeshHandle,
    building_meshes: Vec<MeshHandle>,
}

impl ResidentChunk {
    pub fn terrain_mesh(&self) -> MeshHandle {
        self.terrain_mesh
    }

    /// Every scene handle this chunk owns.
    pub fn mesh_handles(&self) -> impl Iterator<Item = MeshHandle> + '_ {
        std::iter::once(self.terrain_mesh).chain(self.building_meshes.iter().copied())
    }

    /// Release all owned meshes. Keeps going past a failure and reports the first.
    fn release<S: SceneBackend + ?Sized>(self, scene: &mut S) -> Result<(), SceneError> {
        let mut first_error = None;
        for handle in std::iter::once(self.terrain_mesh).chain(self.building_meshes) {
            if let Err(e) = scene.release(handle) {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

/// Terrain vertices as scene mesh data, in chunk-local space.
fn terrain_mesh_data(chunk: &TerrainChunk) -> MeshData {
    let vertices = chunk
        .vertices
        .iter()
        .map(|v| Vertex::with_color(v.position, v.normal, v.uv, v.color))
        .collect();
    MeshData::new(vertices, chunk.indices.clone())
}

fn building_transform(building: &BuildingInstance) -> Transform {
    Transform::from_scale_rotation_position(
        building.scale,
        Quat::from_rotation_y(building.rotation),
        building.position.as_vec3(),
    )
}

/// Owns every resident chunk and reconciles them with the aircraft position.
#[derive(Debug)]
pub struct WorldStreamer {
    config: StreamingConfig,
    chunks: HashMap<ChunkCoord, ResidentChunk>,
    /// Seed the resident chunks were generated with.
    last_seed: Option<u32>,
    generated: u64,
}

impl WorldStreamer {
    pub fn new(config: StreamingConfig) -> Self {
        Self {
            config,
            chunks: HashMap::new(),
            last_seed: None,
            generated: 0,
        }
    }

    pub fn config(&self) -> &StreamingConfig {
        &self.config
    }

    pub fn terrain_config(&self, seed: u32) -> TerrainConfig {
        TerrainConfig {
            chunk_size: self.config.chunk_size,
            resolution: self.config.resolution,
            height_scale: self.config.height_scale,
            seed,
        }
    }

    pub fn building_config(&self, seed: u32) -> BuildingConfig {
        BuildingConfig {
            seed,
            height_scale: self.config.height_scale,
            spawn_position: self.config.spawn_position,
            exclusion_radius: self.config.exclusion_radius,
        }
    }

    pub fn resident_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_resident(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    pub fn chunk(&self, coord: ChunkCoord) -> Option<&ResidentChunk> {
        self.chunks.get(&coord)
    }

    pub fn resident_coords(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.chunks.keys().copied()
    }

    /// Meshes held across all resident chunks.
    pub fn mesh_count(&self) -> usize {
        self.chunks.values().map(|c| 1 + c.building_meshes.len()).sum()
    }

    /// Chunks generated since creation.
    pub fn generated_total(&self) -> u64 {
        self.generated
    }

    pub fn last_seed(&self) -> Option<u32> {
        self.last_seed
    }

    /// The chunks that should be resident for an aircraft at `position`.
    pub fn needed(&self, position: DVec3) -> impl Iterator<Item = ChunkCoord> {
        ChunkCoord::from_world(position.x, position.z, self.config.chunk_size).window(self.config.render_distance)
    }

    /// One streaming pass.
    ///
    /// A seed different from the last one observed first drops every
    /// resident chunk. Then chunks outside the window around `position` are
    /// evicted and missing ones generated, so afterwards the resident set is
    /// exactly the window.
    pub fn update<S: SceneBackend + ?Sized>(
        &mut self,
        position: DVec3,
        seed: u32,
        scene: &mut S,
    ) -> Result<StreamReport, SceneError> {
        let mut report = StreamReport::default();

        if self.last_seed != Some(seed) {
            if let Some(previous) = self.last_seed {
                log::info!("world seed changed {} -> {}, flushing {} chunks", previous, seed, self.chunks.len());
            }
            report.flushed = self.flush(scene)?;
            self.last_seed = Some(seed);
        }

        let needed: HashSet<ChunkCoord> = self.needed(position).collect();

        let stale: Vec<ChunkCoord> = self.chunks.keys().filter(|c| !needed.contains(c)).copied().collect();
        for coord in stale {
            if let Some(chunk) = self.chunks.remove(&coord) {
                chunk.release(scene)?;
                log::trace!("evicted chunk {}", coord);
                report.evicted += 1;
            }
        }

        for coord in self.needed(position) {
            if self.chunks.contains_key(&coord) {
                continue;
            }
            let chunk = self.load(coord, seed, scene)?;
            self.chunks.insert(coord, chunk);
            report.loaded += 1;
        }

        report.resident = self.chunks.len();
        if report.loaded > 0 || report.evicted > 0 {
            log::debug!(
                "streaming: +{} -{} chunks, {} resident ({} generated total)",
                report.loaded,
                report.evicted,
                report.resident,
                self.generated
            );
        }
        Ok(report)
    }

    /// Release every resident chunk. Returns how many were dropped.
    pub fn flush<S: SceneBackend + ?Sized>(&mut self, scene: &mut S) -> Result<usize, SceneError> {
        let count = self.chunks.len();
        let mut first_error = None;
        for (_, chunk) in self.chunks.drain() {
            if let Err(e) = chunk.release(scene) {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(count), Err)
    }

    fn load<S: SceneBackend + ?Sized>(
        &mut self,
        coord: ChunkCoord,
        seed: u32,
        scene: &mut S,
    ) -> Result<ResidentChunk, SceneError> {
        let terrain = TerrainChunk::generate(coord, self.terrain_config(seed));
        let buildings = generate_buildings(coord, self.config.chunk_size, &self.building_config(seed));
        self.generated += 1;

        let terrain_mesh = scene.add_mesh(terrain_mesh_data(&terrain), Transform::from_position(terrain.origin.as_vec3()))?;
        let mut chunk = ResidentChunk {
            terrain,
            buildings: Vec::new(),
            terrain_mesh,
            building_meshes: Vec::with_capacity(buildings.len()),
        };
        for building in &buildings {
            match scene.add_mesh(MeshData::cube(building.color), building_transform(building)) {
                Ok(handle) => chunk.building_meshes.push(handle),
                Err(e) => {
                    // Give back what this chunk already uploaded.
                    if let Err(rollback) = chunk.release(scene) {
                        log::warn!("chunk {}: rollback after failed upload also failed: {}", coord, rollback);
                    }
                    return Err(e);
                }
            }
        }
        chunk.buildings = buildings;

        log::trace!("generated chunk {} with {} buildings", coord, chunk.buildings.len());
        Ok(chunk)
    }
}
