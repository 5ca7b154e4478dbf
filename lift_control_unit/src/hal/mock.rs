//! Shared-state test doubles for the hardware capability traits.
//!
//! Clones share interior state, so a test can keep a handle on the
//! drive or a switch line after handing them to the controller.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use lift_common::gains::GainSlot;

use super::{DigitalInput, ElevatorDrive};

/// Interior state of a [`MockDrive`].
#[derive(Debug, Clone, Default)]
pub struct DriveState {
    /// Sensor position [encoder units].
    pub position: f64,
    /// Sensor velocity [encoder units/s].
    pub velocity: f64,
    /// Bus voltage [V].
    pub bus_voltage: f64,
    /// Last open-loop output fraction (0 after `stop`).
    pub output: f64,
    /// Last position setpoint handed to the on-device loop.
    pub setpoint: Option<(f64, GainSlot)>,
    /// Number of `stop` calls.
    pub stop_count: u32,
    /// Number of `reset_position` calls.
    pub reset_count: u32,
}

/// Mock motor-controller pair.
#[derive(Debug, Clone, Default)]
pub struct MockDrive {
    state: Rc<RefCell<DriveState>>,
}

impl MockDrive {
    /// Handle on the shared interior state.
    pub fn state(&self) -> Rc<RefCell<DriveState>> {
        Rc::clone(&self.state)
    }

    /// Set the sensor position a subsequent read will report.
    pub fn set_position(&self, position: f64) {
        self.state.borrow_mut().position = position;
    }

    /// Set the applied output a subsequent read will report.
    pub fn set_applied_output(&self, output: f64) {
        self.state.borrow_mut().output = output;
    }
}

impl ElevatorDrive for MockDrive {
    fn set_output(&mut self, fraction: f64) {
        let mut state = self.state.borrow_mut();
        state.output = fraction;
        state.setpoint = None;
    }

    fn set_position_setpoint(&mut self, setpoint: f64, slot: GainSlot) {
        self.state.borrow_mut().setpoint = Some((setpoint, slot));
    }

    fn reset_position(&mut self, value: f64) {
        let mut state = self.state.borrow_mut();
        state.position = value;
        state.reset_count += 1;
    }

    fn stop(&mut self) {
        let mut state = self.state.borrow_mut();
        state.output = 0.0;
        state.setpoint = None;
        state.stop_count += 1;
    }

    fn position(&self) -> f64 {
        self.state.borrow().position
    }

    fn velocity(&self) -> f64 {
        self.state.borrow().velocity
    }

    fn bus_voltage(&self) -> f64 {
        self.state.borrow().bus_voltage
    }

    fn applied_output(&self) -> f64 {
        self.state.borrow().output
    }
}

/// Mock digital line. `set_level(false)` reads electrically low —
/// tripped, for an active-low switch.
#[derive(Debug, Clone)]
pub struct MockInput {
    level: Rc<Cell<bool>>,
}

impl MockInput {
    /// New line at the given electrical level.
    pub fn new(level: bool) -> Self {
        Self {
            level: Rc::new(Cell::new(level)),
        }
    }

    /// Drive the line to an electrical level.
    pub fn set_level(&self, level: bool) {
        self.level.set(level);
    }
}

impl DigitalInput for MockInput {
    fn read(&self) -> bool {
        self.level.get()
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
