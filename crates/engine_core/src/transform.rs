//! Transform component and utilities for spatial positioning.

use bytemuck::{Pod, Zeroable};
use glam::{DVec3, EulerRot, Mat4, Quat, Vec3};

/// A 3D transform representing position, rotation, and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a new transform at the given position.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a new transform with position, rotation and scale.
    pub fn from_scale_rotation_position(scale: Vec3, rotation: Quat, position: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Aircraft pose from flight attitude (radians).
    ///
    /// The model's nose points along local `+Z`; after rotation it lines up with
    /// `(sin(yaw)cos(pitch), sin(pitch), cos(yaw)cos(pitch))`. Positive pitch
    /// raises the nose, roll banks about the nose axis.
    pub fn from_attitude(position: DVec3, pitch: f64, roll: f64, yaw: f64) -> Self {
        let rotation = Quat::from_euler(EulerRot::YXZ, yaw as f32, -pitch as f32, roll as f32);
        Self {
            position: position.as_vec3(),
            rotation,
            scale: Vec3::ONE,
        }
    }

    /// Create the model matrix for this transform.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Direction of the local `+Z` axis (aircraft nose).
    pub fn nose(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// Get the up direction (positive Y).
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }
}

/// Raw transform data for GPU upload (instance data).
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct TransformRaw {
    pub model: [[f32; 4]; 4],
}

impl From<&Transform> for TransformRaw {
    fn from(transform: &Transform) -> Self {
        Self {
            model: transform.to_matrix().to_cols_array_2d(),
        }
    }
}

impl From<Transform> for TransformRaw {
    fn from(transform: Transform) -> Self {
        Self::from(&transform)
    }
}
