//! Per-tick telemetry snapshot.
//!
//! Published every tick to whatever sink the deployment wires in
//! (dashboard, log, test recorder). Write-only, one-way: nothing in the
//! control path reads it back.

use serde::Serialize;

use crate::levels::Level;
use crate::state::{ControlMode, TravelFault};

/// One tick's worth of elevator state for external consumers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
pub struct ElevatorTelemetry {
    /// Current sensor position [encoder units].
    pub position: f64,
    /// Current sensor velocity [encoder units/s].
    pub velocity: f64,
    /// Commanded target [encoder units].
    pub target: f64,
    /// Current height [inches], via the calibration table.
    pub height_in: f64,
    /// Target height [inches].
    pub target_height_in: f64,
    /// Named level the elevator currently sits at, if any.
    pub level: Option<Level>,
    /// Top limit switch tripped.
    pub at_top: bool,
    /// Bottom limit switch tripped.
    pub at_bottom: bool,
    /// Within the settle tolerance of the target.
    pub at_target: bool,
    /// Active control mode.
    pub mode: ControlMode,
    /// Low-pass-filtered position error [encoder units].
    pub filtered_error: f64,
    /// Travel fault flags from the last interlock evaluation.
    pub faults: TravelFault,
    /// Output fraction the motor controller is applying.
    pub applied_output: f64,
    /// Motor bus voltage [V].
    pub bus_voltage: f64,
}
