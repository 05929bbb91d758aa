//! HUD readouts for flight telemetry.
//! Formats speed, altitude, heading, throttle and position from a `SimState`.

use std::fmt;

use physics::SimState;

/// Key reference shown next to the instruments.
pub const CONTROLS_HINT: &str = "W/S or Up/Down: pitch | A/D or Left/Right: roll | Q/E: yaw | \
                                 Shift/Space: throttle up | Ctrl/X: throttle down";

/// Nearest integer, halves rounded up (so -2.5 becomes -2).
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

pub fn format_speed(speed: f64) -> String {
    format!("{} m/s", round_half_up(speed))
}

pub fn format_altitude(altitude: f64) -> String {
    format!("{} m", round_half_up(altitude))
}

pub fn format_heading(heading: f64) -> String {
    format!("{}°", round_half_up(heading))
}

/// Throttle in `[0, 1]` as a percentage.
pub fn format_throttle(throttle: f64) -> String {
    format!("{}%", round_half_up(throttle * 100.0))
}

/// Four-decimal degrees with hemisphere letters, e.g. `37.7749°N, 122.4194°W`.
pub fn format_lat_lon(latitude: f64, longitude: f64) -> String {
    let ns = if latitude >= 0.0 { 'N' } else { 'S' };
    let ew = if longitude >= 0.0 { 'E' } else { 'W' };
    format!("{:.4}°{}, {:.4}°{}", latitude.abs(), ns, longitude.abs(), ew)
}

/// One frame of formatted instrument text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudReadout {
    pub speed: String,
    pub altitude: String,
    pub heading: String,
    pub throttle: String,
    pub position: String,
}

impl HudReadout {
    pub fn from_state(state: &SimState) -> Self {
        Self {
            speed: format_speed(state.speed),
            altitude: format_altitude(state.altitude),
            heading: format_heading(state.heading),
            throttle: format_throttle(state.throttle),
            position: format_lat_lon(state.latitude, state.longitude),
        }
    }
}

impl fmt::Display for HudReadout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SPD {} | ALT {} | HDG {} | THR {} | {}",
            self.speed, self.altitude, self.heading, self.throttle, self.position
        )
    }
}
