//! Scene seam between the simulation and a render backend.
//!
//! Every uploaded mesh is represented by a [`MeshHandle`]. The caller owns
//! the handle and must release it exactly once; the backend frees the
//! geometry and material behind it at that point.

use std::collections::HashMap;

use engine_core::{Transform, TransformRaw};
use thiserror::Error;

use crate::camera::ChaseCamera;
use crate::mesh::MeshData;

/// Opaque id of an uploaded mesh. Never reused within one scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshHandle(u64);

impl MeshHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SceneError {
    #[error("mesh handle {0:?} is not live (never uploaded or already released)")]
    UnknownHandle(MeshHandle),
    #[error("refusing to upload a mesh with no geometry")]
    EmptyMesh,
    #[error("render backend failure: {0}")]
    Backend(String),
}

/// What a render backend must provide.
pub trait SceneBackend {
    /// Upload a mesh placed by `transform`.
    fn add_mesh(&mut self, mesh: MeshData, transform: Transform) -> Result<MeshHandle, SceneError>;

    /// Dispose of a mesh and its material.
    fn release(&mut self, handle: MeshHandle) -> Result<(), SceneError>;

    /// Place the aircraft model.
    fn set_aircraft(&mut self, transform: &Transform);

    /// Update the view.
    fn set_camera(&mut self, camera: &ChaseCamera);
}

/// A mesh held by [`HeadlessScene`].
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub transform: Transform,
    pub instance: TransformRaw,
    pub triangles: usize,
    pub bytes: usize,
}

/// In-memory backend: keeps an arena of live meshes and counts traffic.
/// Used by the headless host and by tests to check that nothing leaks.
#[derive(Debug, Default)]
pub struct HeadlessScene {
    nodes: HashMap<MeshHandle, SceneNode>,
    next_id: u64,
    uploaded: u64,
    released: u64,
    aircraft: Transform,
    camera_eye: glam::Vec3,
    camera_target: glam::Vec3,
}

impl HeadlessScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of meshes currently uploaded.
    pub fn live_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn contains(&self, handle: MeshHandle) -> bool {
        self.nodes.contains_key(&handle)
    }

    pub fn node(&self, handle: MeshHandle) -> Option<&SceneNode> {
        self.nodes.get(&handle)
    }

    /// Total meshes ever uploaded.
    pub fn uploaded(&self) -> u64 {
        self.uploaded
    }

    /// Total meshes ever released.
    pub fn released(&self) -> u64 {
        self.released
    }

    /// Bytes of geometry currently held.
    pub fn live_bytes(&self) -> usize {
        self.nodes.values().map(|n| n.bytes).sum()
    }

    pub fn aircraft(&self) -> &Transform {
        &self.aircraft
    }

    /// Last camera eye and look-at point.
    pub fn camera(&self) -> (glam::Vec3, glam::Vec3) {
        (self.camera_eye, self.camera_target)
    }
}

impl SceneBackend for HeadlessScene {
    fn add_mesh(&mut self, mesh: MeshData, transform: Transform) -> Result<MeshHandle, SceneError> {
        if mesh.is_empty() {
            return Err(SceneError::EmptyMesh);
        }
        let handle = MeshHandle(self.next_id);
        self.next_id += 1;
        self.uploaded += 1;
        log::trace!("uploaded mesh {} ({} triangles)", handle.0, mesh.triangle_count());
        self.nodes.insert(
            handle,
            SceneNode {
                transform,
                instance: TransformRaw::from(&transform),
                triangles: mesh.triangle_count(),
                bytes: mesh.byte_size(),
            },
        );
        Ok(handle)
    }

    fn release(&mut self, handle: MeshHandle) -> Result<(), SceneError> {
        self.nodes.remove(&handle).ok_or(SceneError::UnknownHandle(handle))?;
        self.released += 1;
        log::trace!("released mesh {}", handle.0);
        Ok(())
    }

    fn set_aircraft(&mut self, transform: &Transform) {
        self.aircraft = *transform;
    }

    fn set_camera(&mut self, camera: &ChaseCamera) {
        self.camera_eye = camera.position();
        self.camera_target = camera.look_at();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn upload_and_release_exactly_once() {
        let mut scene = HeadlessScene::new();
        let a = scene.add_mesh(MeshData::cube([1.0; 4]), Transform::default()).unwrap();
        let b = scene
            .add_mesh(MeshData::cube([1.0; 4]), Transform::from_position(Vec3::X))
            .unwrap();
        assert_ne!(a, b);
        assert_eq!(scene.live_count(), 2);
        assert_eq!(scene.node(b).unwrap().instance.model[3], [1.0, 0.0, 0.0, 1.0]);

        scene.release(a).unwrap();
        assert_eq!(scene.release(a), Err(SceneError::UnknownHandle(a)));
        assert_eq!(scene.live_count(), 1);
        assert_eq!(scene.released(), 1);
        assert_eq!(scene.uploaded(), 2);
    }

    #[test]
    fn handles_are_never_reused() {
        let mut scene = HeadlessScene::new();
        let first = scene.add_mesh(MeshData::cube([1.0; 4]), Transform::default()).unwrap();
        scene.release(first).unwrap();
        let second = scene.add_mesh(MeshData::cube([1.0; 4]), Transform::default()).unwrap();
        assert!(second.id() > first.id());
    }

    #[test]
    fn empty_mesh_is_rejected() {
        let mut scene = HeadlessScene::new();
        assert_eq!(
            scene.add_mesh(MeshData::default(), Transform::default()),
            Err(SceneError::EmptyMesh)
        );
        assert_eq!(scene.live_count(), 0);
    }
}
