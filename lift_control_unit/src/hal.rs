//! Hardware capability boundary.
//!
//! The controller reasons about an abstract motor-controller pair and
//! two logical limit switches. Capability calls never fail: transient
//! bad readings self-correct on the next tick, and fatal hardware
//! conditions belong to the adapter layer behind these traits.
//!
//! Electrical polarity is normalized here. The limit switches are wired
//! active-low (electrically low = pressed); [`ActiveLowSwitch`] inverts
//! at the boundary so control logic only ever sees logical
//! tripped/not-tripped.

use lift_common::gains::GainSlot;

pub mod mock;

/// Motor-controller capability for the elevator motor pair.
///
/// The closed-loop position controller runs on the device itself; this
/// trait hands it a setpoint and a gain slot, or an open-loop output
/// fraction, and reads back sensor state.
pub trait ElevatorDrive {
    /// Apply an open-loop output fraction in [-1, 1] to both motors.
    fn set_output(&mut self, fraction: f64);

    /// Hand a position setpoint [encoder units] to the on-device loop,
    /// running under the given gain slot.
    fn set_position_setpoint(&mut self, setpoint: f64, slot: GainSlot);

    /// Force the position sensor reading to `value` [encoder units].
    fn reset_position(&mut self, value: f64);

    /// Halt both motors.
    fn stop(&mut self);

    /// Current sensor position [encoder units].
    fn position(&self) -> f64;

    /// Current sensor velocity [encoder units/s]. Telemetry only.
    fn velocity(&self) -> f64;

    /// Bus voltage [V]. Telemetry and simulation only.
    fn bus_voltage(&self) -> f64;

    /// Output fraction the motor controller is actually applying.
    ///
    /// The safety interlock keys on the sign of this value, whichever
    /// mode produced it.
    fn applied_output(&self) -> f64;
}

/// Raw digital input as the wiring sees it: true = electrically high.
pub trait DigitalInput {
    /// Current electrical level.
    fn read(&self) -> bool;
}

/// Polarity adapter for active-low limit switches.
#[derive(Debug, Clone)]
pub struct ActiveLowSwitch<D> {
    input: D,
}

impl<D: DigitalInput> ActiveLowSwitch<D> {
    /// Wrap a raw digital input.
    pub fn new(input: D) -> Self {
        Self { input }
    }

    /// Logical sensor state: true = switch pressed.
    #[inline]
    pub fn tripped(&self) -> bool {
        !self.input.read()
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
