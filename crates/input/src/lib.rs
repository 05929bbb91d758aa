//! Keyboard input for flight controls.

use std::collections::HashSet;
use std::time::Duration;

use engine_core::{FlightControls, Time};

/// Polling cadence for control snapshots.
pub const POLL_INTERVAL: Duration = Duration::from_millis(16);

/// Keys that raise the nose.
pub const PITCH_UP_KEYS: [KeyCode; 2] = [KeyCode::KeyW, KeyCode::ArrowUp];
/// Keys that lower the nose.
pub const PITCH_DOWN_KEYS: [KeyCode; 2] = [KeyCode::KeyS, KeyCode::ArrowDown];
/// Keys that roll left.
pub const ROLL_LEFT_KEYS: [KeyCode; 2] = [KeyCode::KeyA, KeyCode::ArrowLeft];
/// Keys that roll right.
pub const ROLL_RIGHT_KEYS: [KeyCode; 2] = [KeyCode::KeyD, KeyCode::ArrowRight];
pub const YAW_LEFT_KEYS: [KeyCode; 1] = [KeyCode::KeyQ];
pub const YAW_RIGHT_KEYS: [KeyCode; 1] = [KeyCode::KeyE];
/// Keys that spool the engine up.
pub const THROTTLE_UP_KEYS: [KeyCode; 3] = [KeyCode::ShiftLeft, KeyCode::ShiftRight, KeyCode::Space];
/// Keys that spool the engine down.
pub const THROTTLE_DOWN_KEYS: [KeyCode; 3] = [KeyCode::ControlLeft, KeyCode::ControlRight, KeyCode::KeyX];

/// Tracks which keys are currently held.
#[derive(Debug, Default)]
pub struct InputState {
    /// Keys currently held down.
    keys_held: HashSet<KeyCode>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a keyboard event.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                self.keys_held.insert(key);
            }
            ElementState::Released => {
                self.keys_held.remove(&key);
            }
        }
    }

    /// Release everything (e.g. on focus loss).
    pub fn clear(&mut self) {
        self.keys_held.clear();
    }

    /// Check if a key is currently held.
    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    fn any_held(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|&k| self.is_key_held(k))
    }

    /// Resolve held keys into a control vector.
    ///
    /// Opposite keys on one axis do not cancel: the negative binding is
    /// evaluated after the positive one for pitch and throttle, the positive
    /// after the negative for roll and yaw, and the later one wins.
    pub fn flight_controls(&self) -> FlightControls {
        let mut controls = FlightControls::NEUTRAL;

        if self.any_held(&PITCH_UP_KEYS) {
            controls.pitch = 1.0;
        }
        if self.any_held(&PITCH_DOWN_KEYS) {
            controls.pitch = -1.0;
        }

        if self.any_held(&ROLL_LEFT_KEYS) {
            controls.roll = -1.0;
        }
        if self.any_held(&ROLL_RIGHT_KEYS) {
            controls.roll = 1.0;
        }

        if self.any_held(&YAW_LEFT_KEYS) {
            controls.yaw = -1.0;
        }
        if self.any_held(&YAW_RIGHT_KEYS) {
            controls.yaw = 1.0;
        }

        if self.any_held(&THROTTLE_UP_KEYS) {
            controls.throttle = 1.0;
        }
        if self.any_held(&THROTTLE_DOWN_KEYS) {
            controls.throttle = -1.0;
        }

        controls
    }
}

/// Samples [`InputState`] on a fixed cadence, independent of frame rate.
///
/// Only the latest snapshot is kept; the frame loop reads it once per tick.
#[derive(Debug)]
pub struct ControlPoller {
    clock: Time,
    latest: FlightControls,
    polls: u64,
}

impl Default for ControlPoller {
    fn default() -> Self {
        Self::new(POLL_INTERVAL)
    }
}

impl ControlPoller {
    pub fn new(interval: Duration) -> Self {
        let mut clock = Time::new();
        clock.set_fixed_timestep(interval);
        Self {
            clock,
            latest: FlightControls::NEUTRAL,
            polls: 0,
        }
    }

    /// Feed elapsed frame time; resamples `input` for every interval that
    /// elapsed. Returns the latest snapshot.
    pub fn poll(&mut self, input: &InputState, elapsed: Duration) -> FlightControls {
        self.clock.advance(elapsed);
        while self.clock.should_fixed_update() {
            let controls = input.flight_controls();
            if controls != self.latest {
                log::trace!("controls changed: {:?}", controls);
            }
            self.latest = controls;
            self.polls += 1;
        }
        self.latest
    }

    /// Most recent snapshot.
    pub fn latest(&self) -> FlightControls {
        self.latest
    }

    /// Number of samples taken so far.
    pub fn poll_count(&self) -> u64 {
        self.polls
    }
}

// Re-export for convenience
pub use winit::event::ElementState;
pub use winit::keyboard::KeyCode;
