//! Chase camera that trails the aircraft.

use glam::{Mat4, Quat, Vec3};

/// Eye offset behind and above the target, before yaw rotation.
pub const CHASE_OFFSET: Vec3 = Vec3::new(0.0, 3.0, -10.0);
/// Look-at offset ahead of the target, before yaw rotation.
pub const LOOK_AHEAD_OFFSET: Vec3 = Vec3::new(0.0, 1.0, 5.0);
/// Fraction of the remaining distance covered per follow step.
pub const CHASE_SMOOTHING: f32 = 0.1;

/// Third-person camera with configurable FOV and clipping planes.
///
/// The eye eases towards its ideal spot each step while the look-at point
/// snaps, so the view never lags the nose direction.
#[derive(Debug, Clone)]
pub struct ChaseCamera {
    position: Vec3,
    look_at: Vec3,
    pub offset: Vec3,
    pub look_offset: Vec3,
    pub smoothing: f32,
    /// Field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Aspect ratio (width / height).
    pub aspect: f32,
}

impl Default for ChaseCamera {
    fn default() -> Self {
        Self {
            position: CHASE_OFFSET,
            look_at: LOOK_AHEAD_OFFSET,
            offset: CHASE_OFFSET,
            look_offset: LOOK_AHEAD_OFFSET,
            smoothing: CHASE_SMOOTHING,
            fov_degrees: 60.0,
            near: 0.1,
            far: 5000.0,
            aspect: 16.0 / 9.0,
        }
    }
}

impl ChaseCamera {
    /// Camera already sitting at its ideal spot behind `target`.
    pub fn new(target: Vec3, yaw: f32) -> Self {
        let mut camera = Self::default();
        camera.snap(target, yaw);
        camera
    }

    fn ideal(&self, target: Vec3, yaw: f32) -> (Vec3, Vec3) {
        let heading = Quat::from_rotation_y(yaw);
        (target + heading * self.offset, target + heading * self.look_offset)
    }

    /// Ease towards the chase position for `target` flying at `yaw` radians.
    pub fn follow(&mut self, target: Vec3, yaw: f32) {
        let (eye, look_at) = self.ideal(target, yaw);
        self.position = self.position.lerp(eye, self.smoothing);
        self.look_at = look_at;
    }

    /// Jump straight to the chase position, e.g. after a reset.
    pub fn snap(&mut self, target: Vec3, yaw: f32) {
        let (eye, look_at) = self.ideal(target, yaw);
        self.position = eye;
        self.look_at = look_at;
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn look_at(&self) -> Vec3 {
        self.look_at
    }

    /// Get the view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.look_at, Vec3::Y)
    }

    /// Get the projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    /// Get the combined view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
