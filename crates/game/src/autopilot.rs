//! Scripted key schedule for the headless host.
//!
//! Presses and releases keys on `InputState` exactly as a window's key
//! events would, so the flight goes through the normal input path.

use std::collections::HashSet;

use input::{ElementState, InputState, KeyCode};

/// Keys held from `start` seconds until the next step begins.
#[derive(Debug, Clone, Copy)]
pub struct ScriptStep {
    pub start: f64,
    pub keys: &'static [KeyCode],
}

/// Throttle up, climb, bank both ways, then let go.
pub const DEMO_FLIGHT: &[ScriptStep] = &[
    ScriptStep { start: 0.0, keys: &[KeyCode::Space] },
    ScriptStep { start: 2.0, keys: &[KeyCode::KeyW, KeyCode::Space] },
    ScriptStep { start: 4.0, keys: &[] },
    ScriptStep { start: 5.0, keys: &[KeyCode::KeyD, KeyCode::KeyE] },
    ScriptStep { start: 7.0, keys: &[KeyCode::KeyA] },
    ScriptStep { start: 9.0, keys: &[KeyCode::KeyA, KeyCode::KeyQ] },
    ScriptStep { start: 11.0, keys: &[KeyCode::KeyD] },
    ScriptStep { start: 13.0, keys: &[KeyCode::KeyS, KeyCode::KeyX] },
    ScriptStep { start: 14.5, keys: &[] },
];

#[derive(Debug)]
pub struct Autopilot {
    script: &'static [ScriptStep],
    held: HashSet<KeyCode>,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new(DEMO_FLIGHT)
    }
}

impl Autopilot {
    pub fn new(script: &'static [ScriptStep]) -> Self {
        Self {
            script,
            held: HashSet::new(),
        }
    }

    /// Keys the script wants held at `time` seconds.
    pub fn keys_at(&self, time: f64) -> &'static [KeyCode] {
        self.script
            .iter()
            .rev()
            .find(|step| step.start <= time)
            .map(|step| step.keys)
            .unwrap_or(&[])
    }

    /// Send press/release events so `input` matches the script at `time`.
    pub fn apply(&mut self, time: f64, input: &mut InputState) {
        let wanted: HashSet<KeyCode> = self.keys_at(time).iter().copied().collect();
        for &key in self.held.difference(&wanted) {
            input.process_keyboard(key, ElementState::Released);
        }
        for &key in wanted.difference(&self.held) {
            input.process_keyboard(key, ElementState::Pressed);
        }
        if wanted != self.held {
            log::debug!("autopilot at {:.1}s holds {:?}", time, wanted);
        }
        self.held = wanted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_latest_started_step() {
        let pilot = Autopilot::default();
        assert_eq!(pilot.keys_at(0.0), &[KeyCode::Space]);
        assert_eq!(pilot.keys_at(3.9), &[KeyCode::KeyW, KeyCode::Space]);
        assert!(pilot.keys_at(4.0).is_empty());
        assert!(pilot.keys_at(100.0).is_empty());
        assert!(Autopilot::new(&[]).keys_at(1.0).is_empty());
    }

    #[test]
    fn releases_keys_between_steps() {
        let mut pilot = Autopilot::default();
        let mut input = InputState::new();
        pilot.apply(2.5, &mut input);
        assert_eq!(input.flight_controls().pitch, 1.0);
        assert_eq!(input.flight_controls().throttle, 1.0);

        pilot.apply(6.0, &mut input);
        let controls = input.flight_controls();
        assert_eq!(controls.pitch, 0.0);
        assert_eq!(controls.throttle, 0.0);
        assert_eq!(controls.roll, 1.0);
        assert_eq!(controls.yaw, 1.0);

        pilot.apply(20.0, &mut input);
        assert!(input.flight_controls().is_neutral());
    }
}
