//! Elevator controller.
//!
//! Owns the command surface (levels, heights, raw positions, stop,
//! manual zero) and the fixed-order tick pipeline:
//!
//!   1. read sensors
//!   2. safety interlock (may veto everything below)
//!   3. auto-calibration dwell detector
//!   4. mode step (torque assist bookkeeping and handoff)
//!   5. telemetry publication
//!   6. simulation hook
//!
//! The controller is generic over the motor drive and the two limit
//! switch inputs, so the same pipeline runs against real hardware, the
//! simulation rig, and the mock drive in tests.

use lift_common::config::LiftConfig;
use lift_common::error::LiftError;
use lift_common::gains::slot_for_error;
use lift_common::levels::Level;
use lift_common::state::{ControlMode, TravelFault};
use lift_common::telemetry::ElevatorTelemetry;
use tracing::{debug, info, warn};

use crate::calibrate::{AutoCalibrator, CalibrationAction};
use crate::control::assist::{AssistTick, TorqueAssist};
use crate::control::filter::ErrorFilter;
use crate::control::{decide_mode, ModeDecision};
use crate::hal::{ActiveLowSwitch, DigitalInput, ElevatorDrive};
use crate::safety::{self, InterlockInput, TravelBounds};
use crate::sim::SimulationHook;
use crate::telemetry::TelemetrySink;

/// Hybrid-mode elevator controller.
pub struct ElevatorController<D, T, B>
where
    D: ElevatorDrive,
    T: DigitalInput,
    B: DigitalInput,
{
    config: LiftConfig,
    drive: D,
    top_switch: ActiveLowSwitch<T>,
    bottom_switch: ActiveLowSwitch<B>,
    mode: ControlMode,
    target: f64,
    assist: TorqueAssist,
    error_filter: ErrorFilter,
    calibrator: AutoCalibrator,
    faults: TravelFault,
    sim_hook: Option<Box<dyn SimulationHook>>,
}

impl<D, T, B> ElevatorController<D, T, B>
where
    D: ElevatorDrive,
    T: DigitalInput,
    B: DigitalInput,
{
    /// Build a controller over the given drive and raw (active-low)
    /// switch inputs, then probe the bottom switch once: if the
    /// mechanism powers up resting on it, the sensor is zeroed
    /// immediately instead of waiting out a dwell window.
    pub fn new(config: LiftConfig, drive: D, top_switch: T, bottom_switch: B) -> Self {
        let assist = TorqueAssist::new(
            config.assist.timeout_s,
            config.controller.tick_period_s,
            config.controller.tolerance,
        );
        let error_filter = ErrorFilter::new(
            config.controller.filter_time_constant_s,
            config.controller.tick_period_s,
        );
        let calibrator = AutoCalibrator::new(
            config.auto_calibration.dwell_time_s,
            config.controller.tick_period_s,
            config.auto_calibration.drift_tolerance,
        );
        let mut controller = Self {
            config,
            drive,
            top_switch: ActiveLowSwitch::new(top_switch),
            bottom_switch: ActiveLowSwitch::new(bottom_switch),
            mode: ControlMode::Idle,
            target: 0.0,
            assist,
            error_filter,
            calibrator,
            faults: TravelFault::empty(),
            sim_hook: None,
        };
        if controller.auto_calibrate() {
            info!("startup probe found the carriage at the bottom switch, sensor zeroed");
        }
        controller
    }

    /// Attach an end-of-tick simulation hook.
    pub fn with_sim_hook(mut self, hook: Box<dyn SimulationHook>) -> Self {
        self.sim_hook = Some(hook);
        self
    }

    // ─── Commands ───────────────────────────────────────────────────

    /// Move to a named level.
    pub fn go_to_level(&mut self, level: Level) {
        let height = self.config.levels.height_of(level);
        info!(level = ?level, height_in = height, "level command");
        self.set_target_height(height);
    }

    /// Move to a level given by its index, rejecting out-of-range
    /// indices without touching any state.
    pub fn set_level(&mut self, index: u8) -> Result<(), LiftError> {
        let level = Level::from_index(index)?;
        self.go_to_level(level);
        Ok(())
    }

    /// Move to a carriage height, mapped through the calibration table.
    pub fn set_target_height(&mut self, height_in: f64) {
        let encoder = self.config.table.height_to_encoder(height_in);
        self.set_target_position(encoder);
    }

    /// Move to a raw encoder position. The entry point every other
    /// command funnels through: clamps to the software travel bounds,
    /// then picks the control mode for the move.
    pub fn set_target_position(&mut self, position: f64) {
        let target = position.clamp(
            self.config.controller.bottom_threshold,
            self.config.controller.top_threshold,
        );
        if target != position {
            debug!(requested = position, clamped = target, "target clamped to travel range");
        }
        self.target = target;

        let error = target - self.drive.position();
        match decide_mode(error, &self.config.assist) {
            ModeDecision::EngageAssist { output } => {
                // Prime with the raw error so the convergence exit
                // cannot fire on the first assist tick.
                self.error_filter.prime(error);
                self.assist.engage();
                self.drive.set_output(output);
                self.mode = ControlMode::TorqueAssist;
                info!(target, error, output, "torque assist engaged");
            }
            ModeDecision::ClosedLoop { slot } => {
                self.assist.cancel();
                self.drive.set_position_setpoint(target, slot);
                self.mode = ControlMode::closed_loop(slot);
                debug!(target, error, slot = ?slot, "closed-loop setpoint issued");
            }
        }
    }

    /// Halt output and drop to idle. The target is left in place so
    /// telemetry keeps reporting what was last commanded.
    pub fn stop(&mut self) {
        self.drive.stop();
        self.assist.cancel();
        self.mode = ControlMode::Idle;
        info!("stopped");
    }

    /// Manually declare the current position to be zero. Returns the
    /// position the sensor read before the reset.
    pub fn calibrate_zero(&mut self) -> f64 {
        let previous = self.drive.position();
        self.drive.reset_position(0.0);
        self.target = 0.0;
        info!(previous, "position sensor zeroed");
        previous
    }

    /// Zero the sensor if the bottom switch is currently pressed.
    /// Returns whether a reset happened.
    pub fn auto_calibrate(&mut self) -> bool {
        if self.bottom_switch.tripped() {
            self.calibrate_zero();
            true
        } else {
            false
        }
    }

    // ─── Queries ────────────────────────────────────────────────────

    /// Whether the raw position error is within the settle tolerance.
    /// Independent of mode.
    pub fn at_target(&self) -> bool {
        (self.target - self.drive.position()).abs() < self.config.controller.tolerance
    }

    /// The named level the carriage currently sits at, if any.
    pub fn current_level(&self) -> Option<Level> {
        let height = self.config.table.encoder_to_height(self.drive.position());
        self.config.levels.classify(height)
    }

    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn position(&self) -> f64 {
        self.drive.position()
    }

    pub fn faults(&self) -> TravelFault {
        self.faults
    }

    pub fn config(&self) -> &LiftConfig {
        &self.config
    }

    // ─── Tick pipeline ──────────────────────────────────────────────

    /// Run one control tick.
    pub fn tick(&mut self, telemetry: &mut dyn TelemetrySink) {
        let position = self.drive.position();
        let top_tripped = self.top_switch.tripped();
        let bottom_tripped = self.bottom_switch.tripped();

        // Safety interlock comes before everything else and reads the
        // output the motor controller is actually applying, so it also
        // vetoes motion commanded by the on-device loop.
        let evaluation = safety::evaluate(
            &InterlockInput {
                position,
                applied_output: self.drive.applied_output(),
                top_tripped,
                bottom_tripped,
            },
            &TravelBounds {
                bottom: self.config.controller.bottom_threshold,
                top: self.config.controller.top_threshold,
            },
        );
        self.faults = evaluation.faults;
        if evaluation.force_stop {
            warn!(position, faults = ?evaluation.faults, "travel interlock tripped, forcing stop");
            self.stop();
        }

        if self.calibrator.tick(bottom_tripped, position) == CalibrationAction::Rezero {
            let previous = self.calibrate_zero();
            info!(drift = previous, "auto-calibration corrected sensor drift");
        }

        let filtered = self.error_filter.apply(self.target - self.drive.position());

        if self.mode == ControlMode::TorqueAssist {
            if let AssistTick::Handoff(reason) = self.assist.tick(filtered) {
                let slot = slot_for_error(filtered);
                self.drive.set_position_setpoint(self.target, slot);
                self.mode = ControlMode::closed_loop(slot);
                info!(reason = ?reason, target = self.target, slot = ?slot, "assist handoff");
            }
        }

        telemetry.publish(&self.snapshot(filtered, top_tripped, bottom_tripped));

        if let Some(hook) = self.sim_hook.as_mut() {
            let dt = self.config.controller.tick_period_s;
            let velocity = (self.target - self.drive.position()) / dt;
            hook.iterate(velocity, self.drive.bus_voltage(), dt);
        }
    }

    fn snapshot(&self, filtered: f64, at_top: bool, at_bottom: bool) -> ElevatorTelemetry {
        let position = self.drive.position();
        ElevatorTelemetry {
            position,
            velocity: self.drive.velocity(),
            target: self.target,
            height_in: self.config.table.encoder_to_height(position),
            target_height_in: self.config.table.encoder_to_height(self.target),
            level: self.current_level(),
            at_top,
            at_bottom,
            at_target: (self.target - position).abs() < self.config.controller.tolerance,
            mode: self.mode,
            filtered_error: filtered,
            faults: self.faults,
            applied_output: self.drive.applied_output(),
            bus_voltage: self.drive.bus_voltage(),
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
