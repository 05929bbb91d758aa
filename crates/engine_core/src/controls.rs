//! Flight control input shared between the input and physics crates.

/// Per-tick control vector. Every axis is in `[-1, 1]`.
///
/// `throttle` is a rate command (spool up / spool down), not an absolute
/// throttle position.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlightControls {
    pub pitch: f64,
    pub roll: f64,
    pub yaw: f64,
    pub throttle: f64,
}

impl FlightControls {
    /// No input on any axis.
    pub const NEUTRAL: Self = Self {
        pitch: 0.0,
        roll: 0.0,
        yaw: 0.0,
        throttle: 0.0,
    };

    pub fn new(pitch: f64, roll: f64, yaw: f64, throttle: f64) -> Self {
        Self {
            pitch,
            roll,
            yaw,
            throttle,
        }
        .clamped()
    }

    /// Clamp every axis into `[-1, 1]`.
    pub fn clamped(self) -> Self {
        Self {
            pitch: self.pitch.clamp(-1.0, 1.0),
            roll: self.roll.clamp(-1.0, 1.0),
            yaw: self.yaw.clamp(-1.0, 1.0),
            throttle: self.throttle.clamp(-1.0, 1.0),
        }
    }

    /// True when no axis is deflected.
    pub fn is_neutral(&self) -> bool {
        *self == Self::NEUTRAL
    }
}
