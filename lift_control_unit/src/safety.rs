//! Travel-limit safety interlock.
//!
//! Evaluated first every tick, before any mode logic, and able to veto
//! whatever the controller or the on-device loop is commanding. The
//! override is strict: no control mode, torque assist included, can
//! bypass it.
//!
//! A fault only forces a stop while the applied output keeps pushing
//! further into the limit; backing out of a limit is always allowed.

use lift_common::state::TravelFault;

/// Sensor and output snapshot for one interlock evaluation.
#[derive(Debug, Clone, Copy)]
pub struct InterlockInput {
    /// Current sensor position [encoder units].
    pub position: f64,
    /// Output fraction the motor controller is applying.
    pub applied_output: f64,
    /// Logical top limit switch state.
    pub top_tripped: bool,
    /// Logical bottom limit switch state.
    pub bottom_tripped: bool,
}

/// Software travel bounds [encoder units].
#[derive(Debug, Clone, Copy)]
pub struct TravelBounds {
    /// Lowest allowed position.
    pub bottom: f64,
    /// Highest allowed position.
    pub top: f64,
}

/// Outcome of one interlock evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterlockEvaluation {
    /// All fault conditions present this tick, moving or not.
    pub faults: TravelFault,
    /// Output must be forced to zero this tick.
    pub force_stop: bool,
}

/// Evaluate the interlock for this tick.
pub fn evaluate(input: &InterlockInput, bounds: &TravelBounds) -> InterlockEvaluation {
    let mut faults = TravelFault::empty();
    if input.top_tripped {
        faults |= TravelFault::AT_TOP;
    }
    if input.position > bounds.top {
        faults |= TravelFault::ABOVE_SOFT_LIMIT;
    }
    if input.bottom_tripped {
        faults |= TravelFault::AT_BOTTOM;
    }
    if input.position < bounds.bottom {
        faults |= TravelFault::BELOW_SOFT_LIMIT;
    }

    let pushing_up = input.applied_output > 0.0
        && faults.intersects(TravelFault::AT_TOP | TravelFault::ABOVE_SOFT_LIMIT);
    let pushing_down = input.applied_output < 0.0
        && faults.intersects(TravelFault::AT_BOTTOM | TravelFault::BELOW_SOFT_LIMIT);

    InterlockEvaluation {
        faults,
        force_stop: pushing_up || pushing_down,
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
