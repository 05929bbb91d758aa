//! Canonical aircraft/world snapshot and its run/reset lifecycle.

use engine_core::{FlightControls, Transform};
use glam::DVec3;
use rand::Rng;

use crate::flight_model::FlightModel;

/// Aircraft attitude in radians.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Attitude {
    pub pitch: f64,
    pub roll: f64,
    pub yaw: f64,
}

/// Aircraft and world state for one tick.
///
/// `altitude` mirrors `position.y` and `heading` mirrors `rotation.yaw`; the
/// integrator rewrites all of them together so a snapshot never disagrees
/// with itself.
#[derive(Debug, Clone, PartialEq)]
pub struct SimState {
    pub position: DVec3,
    pub rotation: Attitude,
    pub velocity: DVec3,
    /// `[0, 1]`.
    pub throttle: f64,
    /// Metres per second.
    pub speed: f64,
    pub altitude: f64,
    /// Degrees, `[0, 360)`.
    pub heading: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub world_seed: u32,
}

impl SimState {
    pub const INITIAL_POSITION: DVec3 = DVec3::new(0.0, 100.0, 0.0);
    pub const INITIAL_THROTTLE: f64 = 0.5;
    pub const INITIAL_SPEED: f64 = 50.0;
    pub const INITIAL_LATITUDE: f64 = 37.7749;
    pub const INITIAL_LONGITUDE: f64 = -122.4194;

    /// Default state over the world `world_seed`.
    pub fn initial(world_seed: u32) -> Self {
        Self {
            position: Self::INITIAL_POSITION,
            rotation: Attitude::default(),
            velocity: DVec3::ZERO,
            throttle: Self::INITIAL_THROTTLE,
            speed: Self::INITIAL_SPEED,
            altitude: Self::INITIAL_POSITION.y,
            heading: 0.0,
            latitude: Self::INITIAL_LATITUDE,
            longitude: Self::INITIAL_LONGITUDE,
            world_seed,
        }
    }

    /// Pose for the aircraft model.
    pub fn transform(&self) -> Transform {
        Transform::from_attitude(
            self.position,
            self.rotation.pitch,
            self.rotation.roll,
            self.rotation.yaw,
        )
    }
}

/// Integrator mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FlightMode {
    /// Ticks leave the state untouched.
    #[default]
    Idle,
    Running,
}

/// Owns the canonical [`SimState`] and the idle/running lifecycle.
#[derive(Debug)]
pub struct SimStateStore {
    state: SimState,
    mode: FlightMode,
}

impl SimStateStore {
    /// Idle store over a freshly drawn world seed.
    pub fn new() -> Self {
        Self::with_seed(procgen::random_world_seed(&mut rand::thread_rng()))
    }

    /// Idle store over a fixed world seed.
    pub fn with_seed(world_seed: u32) -> Self {
        Self {
            state: SimState::initial(world_seed),
            mode: FlightMode::Idle,
        }
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    pub fn mode(&self) -> FlightMode {
        self.mode
    }

    pub fn is_running(&self) -> bool {
        self.mode == FlightMode::Running
    }

    /// Idle → running. The state is kept as is.
    pub fn start(&mut self) {
        if self.mode != FlightMode::Running {
            log::info!("flight started (world seed {})", self.state.world_seed);
        }
        self.mode = FlightMode::Running;
    }

    /// Back to defaults over a new random world, and idle.
    pub fn reset(&mut self) {
        self.reset_with(&mut rand::thread_rng());
    }

    /// [`SimStateStore::reset`] drawing the new seed from `rng`.
    pub fn reset_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let seed = procgen::random_world_seed(rng);
        log::info!("simulation reset (world seed {} -> {})", self.state.world_seed, seed);
        self.state = SimState::initial(seed);
        self.mode = FlightMode::Idle;
    }

    /// Advance one tick and return the new state.
    pub fn tick(&mut self, model: &FlightModel, controls: &FlightControls, delta: f64) -> &SimState {
        self.state = model.update(self.mode, &self.state, controls, delta);
        &self.state
    }
}

impl Default for SimStateStore {
    fn default() -> Self {
        Self::new()
    }
}
