//! Simplified arcade flight model.
//!
//! Not an aerodynamic simulation: attitude follows the sticks directly, speed
//! chases a throttle-dependent target, and a small speed-squared lift term
//! fights gravity on the vertical axis.

use engine_core::FlightControls;
use glam::DVec3;

use crate::sim_state::{Attitude, FlightMode, SimState};

pub const METERS_PER_DEGREE_LAT: f64 = 111_320.0;
pub const PITCH_RATE: f64 = 0.8;
pub const ROLL_RATE: f64 = 1.2;
pub const YAW_RATE: f64 = 0.6;
pub const THROTTLE_RATE: f64 = 0.3;
pub const MIN_SPEED: f64 = 20.0;
pub const MAX_SPEED: f64 = 150.0;
pub const GRAVITY: f64 = 9.81;
pub const LIFT_COEFFICIENT: f64 = 0.15;
/// Floor for altitude; touching it costs speed instead of ending the flight.
pub const MIN_ALTITUDE: f64 = 5.0;
/// Longest step integrated in one tick, seconds.
pub const MAX_DELTA: f64 = 0.1;

pub const MAX_PITCH: f64 = std::f64::consts::FRAC_PI_3;
pub const MAX_ROLL: f64 = std::f64::consts::FRAC_PI_2;

const SPEED_EASING: f64 = 2.0;
const VERTICAL_ACCEL_GAIN: f64 = 10.0;
const GROUND_SPEED_PENALTY: f64 = 0.8;

/// Unit vector along the aircraft nose.
pub fn forward_vector(pitch: f64, yaw: f64) -> DVec3 {
    DVec3::new(yaw.sin() * pitch.cos(), pitch.sin(), yaw.cos() * pitch.cos())
}

/// Yaw in radians to a compass heading in `[0, 360)`.
pub fn heading_degrees(yaw: f64) -> f64 {
    let heading = yaw.to_degrees().rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if heading >= 360.0 {
        0.0
    } else {
        heading
    }
}

/// Flight dynamics integrator.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlightModel;

impl FlightModel {
    /// One tick. Idle mode returns `state` unchanged for any `delta`.
    pub fn update(&self, mode: FlightMode, state: &SimState, controls: &FlightControls, delta: f64) -> SimState {
        match mode {
            FlightMode::Idle => state.clone(),
            FlightMode::Running => self.integrate(state, controls, delta),
        }
    }

    /// Advance `state` by `delta` seconds (clamped to [`MAX_DELTA`]).
    pub fn integrate(&self, state: &SimState, controls: &FlightControls, delta: f64) -> SimState {
        let dt = delta.clamp(0.0, MAX_DELTA);

        let throttle = (state.throttle + controls.throttle * THROTTLE_RATE * dt).clamp(0.0, 1.0);

        let pitch = (state.rotation.pitch + controls.pitch * PITCH_RATE * dt).clamp(-MAX_PITCH, MAX_PITCH);
        let roll = (state.rotation.roll + controls.roll * ROLL_RATE * dt).clamp(-MAX_ROLL, MAX_ROLL);
        let yaw = state.rotation.yaw + controls.yaw * YAW_RATE * dt;

        let target_speed = MIN_SPEED + (MAX_SPEED - MIN_SPEED) * throttle;
        let mut speed = state.speed + (target_speed - state.speed) * SPEED_EASING * dt;

        let speed_factor = speed / MAX_SPEED;
        let lift = LIFT_COEFFICIENT * speed_factor * speed_factor;

        let mut velocity = forward_vector(pitch, yaw) * speed;
        velocity.y += (lift - GRAVITY) * dt * VERTICAL_ACCEL_GAIN;

        let mut position = state.position + velocity * dt;

        if position.y < MIN_ALTITUDE {
            position.y = MIN_ALTITUDE;
            speed = (speed * GROUND_SPEED_PENALTY).max(MIN_SPEED);
            log::debug!("ground contact at ({:.1}, {:.1}), speed {:.1}", position.x, position.z, speed);
        }

        let meters_per_degree_lon = METERS_PER_DEGREE_LAT * state.latitude.to_radians().cos();
        let latitude = state.latitude + velocity.z * dt / METERS_PER_DEGREE_LAT;
        let longitude = state.longitude + velocity.x * dt / meters_per_degree_lon;

        SimState {
            position,
            rotation: Attitude { pitch, roll, yaw },
            velocity,
            throttle,
            speed,
            altitude: position.y,
            heading: heading_degrees(yaw),
            latitude,
            longitude,
            world_seed: state.world_seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f64 = 1.0 / 60.0;

    fn running(state: &SimState, controls: &FlightControls, delta: f64) -> SimState {
        FlightModel.update(FlightMode::Running, state, controls, delta)
    }

    #[test]
    fn neutral_controls_hold_attitude_and_trim_speed() {
        let start = SimState::initial(1);
        let next = running(&start, &FlightControls::NEUTRAL, DT);
        assert_eq!(next.rotation, start.rotation);
        assert_eq!(next.throttle, start.throttle);
        // target speed at 50% throttle is 85; eases up from 50
        let expected = 50.0 + (85.0 - 50.0) * 2.0 * DT;
        assert!((next.speed - expected).abs() < 1e-12);
        assert!(next.position.z > start.position.z);
        assert_eq!(next.world_seed, 1);
    }

    #[test]
    fn delta_is_clamped() {
        let start = SimState::initial(1);
        let controls = FlightControls::new(0.3, 0.0, 0.0, 1.0);
        assert_eq!(running(&start, &controls, 5.0), running(&start, &controls, MAX_DELTA));
    }

    #[test]
    fn clamp_laws_hold_under_sustained_input() {
        let patterns = [
            FlightControls::new(1.0, 1.0, 1.0, 1.0),
            FlightControls::new(-1.0, -1.0, -1.0, -1.0),
            FlightControls::new(-1.0, 1.0, -1.0, 1.0),
            FlightControls::new(1.0, -1.0, 1.0, -1.0),
        ];
        for controls in patterns {
            let mut state = SimState::initial(9);
            for tick in 0..3_000 {
                let delta = if tick % 97 == 0 { 0.5 } else { DT };
                state = running(&state, &controls, delta);
                assert!((0.0..=1.0).contains(&state.throttle));
                assert!(state.rotation.pitch.abs() <= MAX_PITCH);
                assert!(state.rotation.roll.abs() <= MAX_ROLL);
                assert!((0.0..360.0).contains(&state.heading), "heading {}", state.heading);
                assert!(state.altitude >= MIN_ALTITUDE);
                assert_eq!(state.altitude, state.position.y);
                assert_eq!(state.heading, heading_degrees(state.rotation.yaw));
            }
        }
    }

    #[test]
    fn ground_contact_clamps_altitude_and_bleeds_speed() {
        let mut start = SimState::initial(1);
        start.position.y = 4.0;
        start.altitude = 4.0;
        start.velocity = DVec3::new(0.0, -10.0, 50.0);
        // throttle 0.5 targets exactly 85 m/s, so easing leaves speed unchanged
        start.speed = 85.0;

        let next = running(&start, &FlightControls::NEUTRAL, DT);
        assert_eq!(next.altitude, MIN_ALTITUDE);
        assert_eq!(next.position.y, MIN_ALTITUDE);
        assert_eq!(next.speed, (85.0_f64 * 0.8).max(MIN_SPEED));
    }

    #[test]
    fn ground_contact_never_drops_below_min_speed() {
        let mut start = SimState::initial(1);
        start.position.y = 5.0;
        start.throttle = 0.0;
        start.speed = MIN_SPEED;
        let next = running(&start, &FlightControls::new(-1.0, 0.0, 0.0, -1.0), DT);
        assert_eq!(next.altitude, MIN_ALTITUDE);
        assert_eq!(next.speed, MIN_SPEED);
    }

    #[test]
    fn heading_wraps_into_compass_range() {
        assert_eq!(heading_degrees(0.0), 0.0);
        assert!((heading_degrees(-std::f64::consts::FRAC_PI_2) - 270.0).abs() < 1e-9);
        assert!((heading_degrees(5.0 * std::f64::consts::PI) - 180.0).abs() < 1e-9);
        assert_eq!(heading_degrees(-1e-18), 0.0);
    }

    #[test]
    fn northward_flight_raises_latitude_only() {
        let start = SimState::initial(1);
        let next = running(&start, &FlightControls::NEUTRAL, DT);
        assert!(next.latitude > start.latitude);
        assert_eq!(next.longitude, start.longitude);
        let expected = start.latitude + next.velocity.z * DT / METERS_PER_DEGREE_LAT;
        assert!((next.latitude - expected).abs() < 1e-12);
    }

    #[test]
    fn eastward_flight_scales_longitude_by_latitude() {
        let mut start = SimState::initial(1);
        start.rotation.yaw = std::f64::consts::FRAC_PI_2;
        let next = running(&start, &FlightControls::NEUTRAL, DT);
        let per_degree = METERS_PER_DEGREE_LAT * start.latitude.to_radians().cos();
        let expected = start.longitude + next.velocity.x * DT / per_degree;
        assert!((next.longitude - expected).abs() < 1e-12);
        assert!(next.longitude > start.longitude);
    }

    #[test]
    fn vertical_velocity_includes_lift_deficit() {
        let start = SimState::initial(1);
        let next = running(&start, &FlightControls::NEUTRAL, DT);
        let factor = next.speed / MAX_SPEED;
        let expected = (LIFT_COEFFICIENT * factor * factor - GRAVITY) * DT * 10.0;
        assert!((next.velocity.y - expected).abs() < 1e-12);
        assert!(next.altitude < start.altitude);
    }
}
