//! Fixed-cadence frame clock.

use std::time::Duration;

/// Default cadence for fixed updates (input polling): 16 ms.
pub const DEFAULT_FIXED_TIMESTEP: Duration = Duration::from_millis(16);
/// Frames longer than this are reported as stalls.
const STALL_THRESHOLD: Duration = Duration::from_millis(250);

/// Accumulates frame time supplied by the host and releases it in fixed
/// steps through [`Time::should_fixed_update`].
#[derive(Debug)]
pub struct Time {
    /// Frames advanced so far.
    frame_count: u64,
    /// Fixed timestep for decoupled updates.
    fixed_timestep: Duration,
    /// Accumulated time for fixed updates.
    accumulator: Duration,
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl Time {
    pub fn new() -> Self {
        Self {
            frame_count: 0,
            fixed_timestep: DEFAULT_FIXED_TIMESTEP,
            accumulator: Duration::ZERO,
        }
    }

    /// Advance by an explicit frame duration.
    pub fn advance(&mut self, delta: Duration) {
        if delta > STALL_THRESHOLD {
            log::debug!("frame {} stalled for {:?}", self.frame_count, delta);
        }
        self.frame_count += 1;
        self.accumulator += delta;
    }

    /// Check if a fixed update should run and consume the time.
    pub fn should_fixed_update(&mut self) -> bool {
        if self.accumulator >= self.fixed_timestep {
            self.accumulator -= self.fixed_timestep;
            true
        } else {
            false
        }
    }

    /// Set the fixed timestep.
    pub fn set_fixed_timestep(&mut self, step: Duration) {
        self.fixed_timestep = step.max(Duration::from_micros(1));
    }
}
