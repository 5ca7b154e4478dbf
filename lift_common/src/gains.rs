//! Feedback gain records and direction-keyed slot selection.
//!
//! The motor controller holds two fixed gain profiles: a default set for
//! ascent and small corrections, and a softer set for gravity-assisted
//! descent. The active profile is selected per move by the sign of the
//! position error — plain data, no hierarchy.

use serde::{Deserialize, Serialize};

/// Feedback gain slot on the motor controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum GainSlot {
    /// Default profile: upward moves and small corrections.
    Ascent = 0,
    /// Softer profile for downward moves (gravity does most of the work).
    Descent = 1,
}

/// Select the gain slot for a move by error sign.
///
/// Descent only for strictly negative error; zero error uses Ascent.
#[inline]
pub fn slot_for_error(error: f64) -> GainSlot {
    if error < 0.0 {
        GainSlot::Descent
    } else {
        GainSlot::Ascent
    }
}

/// One feedback gain record, loaded into a [`GainSlot`] at startup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PidGains {
    /// Proportional gain.
    #[serde(default)]
    pub kp: f64,
    /// Integral gain (0 = disabled).
    #[serde(default)]
    pub ki: f64,
    /// Derivative gain (0 = disabled).
    #[serde(default)]
    pub kd: f64,
    /// Velocity feed-forward gain.
    #[serde(default)]
    pub kff: f64,
}

impl PidGains {
    /// Competition-tuned ascent profile.
    pub const fn ascent_default() -> Self {
        Self {
            kp: 0.55,
            ki: 0.0,
            kd: 0.1,
            kff: 0.0,
        }
    }

    /// Competition-tuned descent profile.
    pub const fn descent_default() -> Self {
        Self {
            kp: 0.05,
            ki: 0.0,
            kd: 0.0,
            kff: 0.0,
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
