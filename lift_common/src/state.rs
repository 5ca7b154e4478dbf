//! Controller state enums and travel fault flags.
//!
//! All enums use `#[repr(u8)]` for compact layout and stable telemetry
//! encoding.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::gains::GainSlot;

// ─── Control Mode ───────────────────────────────────────────────────

/// Active control mode. Exactly one at a time.
///
/// `Idle` only at construction or after an explicit `stop()`. The two
/// closed-loop modes are terminal until the next target write or stop —
/// the on-device feedback loop runs on its own once given a setpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ControlMode {
    /// No output commanded.
    Idle = 0,
    /// Open-loop stiction-breaking output on a large upward move.
    TorqueAssist = 1,
    /// On-device position loop, ascent gain slot.
    ClosedLoopUp = 2,
    /// On-device position loop, descent gain slot.
    ClosedLoopDown = 3,
}

impl ControlMode {
    /// Convert from raw `u8`. Returns `None` for invalid values.
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Idle),
            1 => Some(Self::TorqueAssist),
            2 => Some(Self::ClosedLoopUp),
            3 => Some(Self::ClosedLoopDown),
            _ => None,
        }
    }

    /// The closed-loop mode matching a gain slot.
    #[inline]
    pub const fn closed_loop(slot: GainSlot) -> Self {
        match slot {
            GainSlot::Ascent => Self::ClosedLoopUp,
            GainSlot::Descent => Self::ClosedLoopDown,
        }
    }

    /// Whether the on-device feedback loop owns the output.
    #[inline]
    pub const fn is_closed_loop(self) -> bool {
        matches!(self, Self::ClosedLoopUp | Self::ClosedLoopDown)
    }
}

impl Default for ControlMode {
    fn default() -> Self {
        Self::Idle
    }
}

// ─── Dwell State ────────────────────────────────────────────────────

/// Auto-calibration dwell detector state over the bottom limit switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum DwellState {
    /// Bottom sensor not tripped.
    NotAtHome = 0,
    /// Sensor just reported tripped; dwell timer started.
    Arriving = 1,
    /// Sensor continuously tripped past the arrival tick.
    Dwelling = 2,
}

impl Default for DwellState {
    fn default() -> Self {
        Self::NotAtHome
    }
}

// ─── Travel Faults ──────────────────────────────────────────────────

bitflags! {
    /// Travel-limit fault flags.
    ///
    /// These are safety events, not errors: they force a stop when the
    /// output keeps pushing into the limit, and are otherwise visible
    /// only through telemetry.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
    pub struct TravelFault: u8 {
        /// Top limit switch tripped.
        const AT_TOP = 1 << 0;
        /// Position above the software top bound.
        const ABOVE_SOFT_LIMIT = 1 << 1;
        /// Bottom limit switch tripped.
        const AT_BOTTOM = 1 << 2;
        /// Position below the software bottom bound.
        const BELOW_SOFT_LIMIT = 1 << 3;
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
