//! Control-mode selection for a freshly written target.
//!
//! Torque assist only engages for upward moves with a large error —
//! that's where stiction and gravity both fight the mechanism. Descent
//! goes straight to the on-device loop under the soft gain slot; small
//! corrections use the default slot.

use lift_common::config::AssistConfig;
use lift_common::gains::{GainSlot, slot_for_error};

pub mod assist;
pub mod filter;

/// Entry decision for a new target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModeDecision {
    /// Bootstrap with a fixed open-loop output fraction.
    EngageAssist {
        /// Output fraction, signed toward the error.
        output: f64,
    },
    /// Hand the setpoint straight to the on-device loop.
    ClosedLoop {
        /// Gain slot, selected by error sign.
        slot: GainSlot,
    },
}

/// Choose the entry mode for a new target given the current error.
pub fn decide_mode(error: f64, config: &AssistConfig) -> ModeDecision {
    if error > 0.0 && error.abs() > config.engage_threshold {
        // Floor the fraction so it always breaks static friction.
        let magnitude = config.magnitude.max(config.min_magnitude);
        ModeDecision::EngageAssist {
            output: magnitude.copysign(error),
        }
    } else {
        ModeDecision::ClosedLoop {
            slot: slot_for_error(error),
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
