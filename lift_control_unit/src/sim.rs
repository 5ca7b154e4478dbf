//! Simulation rig for running the controller without hardware.
//!
//! [`SimRig`] builds a set of handles sharing one plant state: a drive
//! that integrates commanded motion, two limit switches derived from
//! the simulated carriage position, and a [`SimulationHook`] the
//! controller calls at the end of each tick to advance the plant.
//! The switches present active-low electrical levels, matching the
//! real wiring, so the adapter inversion in [`crate::hal`] is
//! exercised in simulation too.

use std::cell::RefCell;
use std::rc::Rc;

use lift_common::gains::{GainSlot, PidGains};

use crate::hal::{DigitalInput, ElevatorDrive};

/// End-of-tick plant update. `velocity` is the controller's estimate of
/// the commanded velocity for this tick.
pub trait SimulationHook {
    fn iterate(&mut self, velocity: f64, bus_voltage: f64, dt: f64);
}

/// Hook that does nothing. Used on real hardware.
#[derive(Debug, Default)]
pub struct NoopHook;

impl SimulationHook for NoopHook {
    fn iterate(&mut self, _velocity: f64, _bus_voltage: f64, _dt: f64) {}
}

#[derive(Debug)]
struct RigState {
    position: f64,
    velocity: f64,
    bus_voltage: f64,
    output: f64,
    setpoint: Option<(f64, GainSlot)>,
    ascent: PidGains,
    descent: PidGains,
}

/// Simulated elevator plant.
pub struct SimRig {
    state: Rc<RefCell<RigState>>,
    top_threshold: f64,
    bottom_threshold: f64,
}

impl SimRig {
    pub fn new(ascent: PidGains, descent: PidGains, top_threshold: f64, bottom_threshold: f64) -> Self {
        Self {
            state: Rc::new(RefCell::new(RigState {
                position: 0.0,
                velocity: 0.0,
                bus_voltage: 12.0,
                output: 0.0,
                setpoint: None,
                ascent,
                descent,
            })),
            top_threshold,
            bottom_threshold,
        }
    }

    pub fn drive(&self) -> SimDrive {
        SimDrive { state: Rc::clone(&self.state) }
    }

    /// Active-low top limit switch.
    pub fn top_switch(&self) -> SimSwitch {
        SimSwitch {
            state: Rc::clone(&self.state),
            threshold: self.top_threshold,
            side: SwitchSide::Top,
        }
    }

    /// Active-low bottom limit switch.
    pub fn bottom_switch(&self) -> SimSwitch {
        SimSwitch {
            state: Rc::clone(&self.state),
            threshold: self.bottom_threshold,
            side: SwitchSide::Bottom,
        }
    }

    pub fn hook(&self) -> SimHook {
        SimHook { state: Rc::clone(&self.state) }
    }

    pub fn position(&self) -> f64 {
        self.state.borrow().position
    }

    /// Teleport the carriage. Test helper.
    pub fn set_position(&self, position: f64) {
        self.state.borrow_mut().position = position;
    }
}

/// Drive handle over the shared rig state.
pub struct SimDrive {
    state: Rc<RefCell<RigState>>,
}

impl ElevatorDrive for SimDrive {
    fn set_output(&mut self, output: f64) {
        let mut s = self.state.borrow_mut();
        s.setpoint = None;
        s.output = output.clamp(-1.0, 1.0);
    }

    fn set_position_setpoint(&mut self, setpoint: f64, slot: GainSlot) {
        self.state.borrow_mut().setpoint = Some((setpoint, slot));
    }

    fn reset_position(&mut self, value: f64) {
        self.state.borrow_mut().position = value;
    }

    fn stop(&mut self) {
        let mut s = self.state.borrow_mut();
        s.setpoint = None;
        s.output = 0.0;
        s.velocity = 0.0;
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
        let s = self.state.borrow();
        match s.setpoint {
            // Proportional-only plant model of the onboard loop.
            Some((setpoint, slot)) => {
                let kp = match slot {
                    GainSlot::Ascent => s.ascent.kp,
                    GainSlot::Descent => s.descent.kp,
                };
                (kp * (setpoint - s.position)).clamp(-1.0, 1.0)
            }
            None => s.output,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum SwitchSide {
    Top,
    Bottom,
}

/// Limit switch handle. Presents active-low levels: `read()` returns
/// `false` while the switch is pressed.
pub struct SimSwitch {
    state: Rc<RefCell<RigState>>,
    threshold: f64,
    side: SwitchSide,
}

impl DigitalInput for SimSwitch {
    fn read(&self) -> bool {
        let position = self.state.borrow().position;
        let tripped = match self.side {
            SwitchSide::Top => position >= self.threshold,
            SwitchSide::Bottom => position <= self.threshold,
        };
        !tripped
    }
}

/// Hook handle: stores the commanded velocity and integrates position.
pub struct SimHook {
    state: Rc<RefCell<RigState>>,
}

impl SimulationHook for SimHook {
    fn iterate(&mut self, velocity: f64, _bus_voltage: f64, dt: f64) {
        let mut s = self.state.borrow_mut();
        s.velocity = velocity;
        s.position += velocity * dt;
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
