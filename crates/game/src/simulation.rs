//! Per-frame simulation tick: input, flight model, world streaming, camera
//! and scene, always in that order.

use std::time::Duration;

use engine_core::FlightControls;
use input::{ControlPoller, InputState};
use physics::{FlightMode, FlightModel, SimState, SimStateStore};
use rand::Rng;
use renderer::{ChaseCamera, SceneBackend, SceneError};

use crate::config::GameConfig;
use crate::hud::HudReadout;
use crate::world::{StreamReport, WorldStreamer};

/// Everything one flight session owns.
///
/// The host feeds key events through [`Simulation::input_mut`] and calls
/// [`Simulation::tick`] once per frame. Streaming runs whether or not the
/// flight has started, so the world is already there behind the start screen.
pub struct Simulation<S: SceneBackend> {
    store: SimStateStore,
    model: FlightModel,
    input: InputState,
    poller: ControlPoller,
    world: WorldStreamer,
    camera: ChaseCamera,
    scene: S,
    last_report: StreamReport,
    frames: u64,
}

impl<S: SceneBackend> Simulation<S> {
    pub fn new(config: &GameConfig, scene: S) -> Self {
        let store = match config.world_seed {
            Some(seed) => SimStateStore::with_seed(seed),
            None => SimStateStore::new(),
        };
        let camera = Self::camera_for(store.state());
        log::info!("new simulation over world seed {}", store.state().world_seed);
        Self {
            store,
            model: FlightModel,
            input: InputState::new(),
            poller: ControlPoller::default(),
            world: WorldStreamer::new(config.world.clone()),
            camera,
            scene,
            last_report: StreamReport::default(),
            frames: 0,
        }
    }

    fn camera_for(state: &SimState) -> ChaseCamera {
        ChaseCamera::new(state.position.as_vec3(), state.rotation.yaw as f32)
    }

    pub fn start(&mut self) {
        self.store.start();
    }

    /// Back to the initial state over a fresh world. The old world is
    /// flushed on the next tick.
    pub fn reset(&mut self) {
        self.reset_with(&mut rand::thread_rng());
    }

    pub fn reset_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.store.reset_with(rng);
        self.input.clear();
        self.camera = Self::camera_for(self.store.state());
    }

    /// Advance one frame of `delta` seconds.
    pub fn tick(&mut self, delta: f64) -> Result<StreamReport, SceneError> {
        let elapsed = Duration::try_from_secs_f64(delta).unwrap_or_default();
        let controls = self.poller.poll(&self.input, elapsed);

        let state = self.store.tick(&self.model, &controls, delta);
        let position = state.position;
        let yaw = state.rotation.yaw;
        let seed = state.world_seed;
        let pose = state.transform();

        self.last_report = self.world.update(position, seed, &mut self.scene)?;

        self.camera.follow(position.as_vec3(), yaw as f32);
        self.scene.set_aircraft(&pose);
        self.scene.set_camera(&self.camera);

        self.frames += 1;
        Ok(self.last_report)
    }

    /// Release every streamed mesh.
    pub fn shutdown(&mut self) -> Result<usize, SceneError> {
        self.world.flush(&mut self.scene)
    }

    pub fn state(&self) -> &SimState {
        self.store.state()
    }

    pub fn mode(&self) -> FlightMode {
        self.store.mode()
    }

    pub fn is_running(&self) -> bool {
        self.store.is_running()
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    /// Control snapshot used by the last tick.
    pub fn controls(&self) -> FlightControls {
        self.poller.latest()
    }

    pub fn world(&self) -> &WorldStreamer {
        &self.world
    }

    pub fn camera(&self) -> &ChaseCamera {
        &self.camera
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn last_report(&self) -> StreamReport {
        self.last_report
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn hud(&self) -> HudReadout {
        HudReadout::from_state(self.state())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use input::{ElementState, KeyCode};
    use rand::SeedableRng;
    use renderer::HeadlessScene;

    const DT: f64 = 1.0 / 60.0;

    fn sim(seed: u32) -> Simulation<HeadlessScene> {
        let config = GameConfig {
            world_seed: Some(seed),
            ..GameConfig::default()
        };
        Simulation::new(&config, HeadlessScene::new())
    }

    #[test]
    fn idle_tick_streams_world_but_holds_state() {
        let mut sim = sim(42);
        let before = sim.state().clone();
        let report = sim.tick(DT).unwrap();
        assert_eq!(report.resident, 49);
        assert!(sim.world().is_resident(procgen::ChunkCoord::new(0, 0)));
        assert_eq!(sim.state(), &before);
        assert_eq!(sim.scene().live_count(), sim.world().mesh_count());
    }

    #[test]
    fn held_keys_reach_the_flight_model() {
        let mut sim = sim(42);
        sim.start();
        sim.input_mut().process_keyboard(KeyCode::KeyW, ElementState::Pressed);
        sim.input_mut().process_keyboard(KeyCode::Space, ElementState::Pressed);
        for _ in 0..30 {
            sim.tick(DT).unwrap();
        }
        assert_eq!(sim.controls().pitch, 1.0);
        assert!(sim.state().rotation.pitch > 0.0);
        assert!(sim.state().throttle > 0.5);
    }

    #[test]
    fn scene_follows_aircraft() {
        let mut sim = sim(3);
        sim.start();
        for _ in 0..10 {
            sim.tick(DT).unwrap();
        }
        assert_eq!(sim.scene().aircraft(), &sim.state().transform());
        let (eye, target) = sim.scene().camera();
        assert_eq!(eye, sim.camera().position());
        assert_eq!(target, sim.camera().look_at());
        // Flying north: the camera trails south of the aircraft.
        assert!(eye.z < sim.state().position.z as f32);
    }

    #[test]
    fn reset_flushes_old_world_on_next_tick() {
        let mut sim = sim(42);
        sim.start();
        for _ in 0..60 {
            sim.tick(DT).unwrap();
        }

        let expected_seed = procgen::random_world_seed(&mut rand::rngs::StdRng::seed_from_u64(5));
        sim.reset_with(&mut rand::rngs::StdRng::seed_from_u64(5));
        assert_eq!(sim.mode(), FlightMode::Idle);
        assert_eq!(sim.state(), &SimState::initial(expected_seed));

        let report = sim.tick(DT).unwrap();
        if expected_seed != 42 {
            assert_eq!(report.flushed, 49);
        }
        assert_eq!(sim.world().last_seed(), Some(expected_seed));
        assert_eq!(report.resident, 49);
        assert_eq!(sim.scene().live_count(), sim.world().mesh_count());
    }

    #[test]
    fn shutdown_leaves_nothing_behind() {
        let mut sim = sim(11);
        sim.tick(DT).unwrap();
        assert_eq!(sim.shutdown().unwrap(), 49);
        assert_eq!(sim.scene().live_count(), 0);
        assert_eq!(sim.scene().uploaded(), sim.scene().released());
    }
}
