//! Auto-calibration dwell detector over the bottom limit switch.
//!
//! The limit switches are the elevator's only absolute position
//! reference, so whenever the mechanism rests on the bottom switch long
//! enough, accumulated sensor drift beyond a tolerance is silently
//! zeroed out. The dwell window filters transient contact bounce, and
//! restarts after every correction so drift that keeps accumulating
//! during a long dwell is corrected again.

use lift_common::state::DwellState;

/// Action the controller must take after one calibration tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationAction {
    /// Nothing to do.
    None,
    /// Re-zero the position sensor and reset the target to 0.
    Rezero,
}

/// Tick-counted dwell detector.
#[derive(Debug, Clone)]
pub struct AutoCalibrator {
    state: DwellState,
    dwell_ticks: u64,
    required_ticks: u64,
    drift_tolerance: f64,
}

impl AutoCalibrator {
    /// Build from the configured dwell time and the tick period.
    pub fn new(dwell_time_s: f64, tick_period_s: f64, drift_tolerance: f64) -> Self {
        let required_ticks = if tick_period_s > 0.0 {
            (dwell_time_s / tick_period_s).ceil() as u64
        } else {
            u64::MAX
        };
        Self {
            state: DwellState::NotAtHome,
            dwell_ticks: 0,
            required_ticks,
            drift_tolerance,
        }
    }

    /// Current dwell state.
    #[inline]
    pub const fn state(&self) -> DwellState {
        self.state
    }

    /// Advance one tick with the logical bottom sensor and the current
    /// sensor position.
    pub fn tick(&mut self, bottom_tripped: bool, position: f64) -> CalibrationAction {
        if !bottom_tripped {
            // Instant reset on release, wherever we were.
            self.state = DwellState::NotAtHome;
            self.dwell_ticks = 0;
            return CalibrationAction::None;
        }

        match self.state {
            DwellState::NotAtHome => {
                // Just arrived — start the dwell window.
                self.state = DwellState::Arriving;
                self.dwell_ticks = 0;
                CalibrationAction::None
            }
            DwellState::Arriving | DwellState::Dwelling => {
                self.state = DwellState::Dwelling;
                self.dwell_ticks += 1;
                if self.dwell_ticks >= self.required_ticks
                    && position.abs() > self.drift_tolerance
                {
                    // Restart the window; drift may keep accumulating.
                    self.dwell_ticks = 0;
                    CalibrationAction::Rezero
                } else {
                    CalibrationAction::None
                }
            }
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
