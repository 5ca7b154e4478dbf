//! Integration test: auto-calibration dwell detection in the pipeline.
//!
//! The mock drive holds position still while the bottom switch state is
//! scripted, so dwell windows and drift corrections can be counted
//! tick by tick.

use lift_common::config::LiftConfig;
use lift_common::state::DwellState;
use lift_control_unit::controller::ElevatorController;
use lift_control_unit::hal::mock::{MockDrive, MockInput};
use lift_control_unit::telemetry::NullSink;

// Raw switch inputs are active-low: true = released, false = pressed.
fn idle_controller(
    drive: MockDrive,
    bottom: MockInput,
) -> ElevatorController<MockDrive, MockInput, MockInput> {
    ElevatorController::new(LiftConfig::default(), drive, MockInput::new(true), bottom)
}

// ── Tests ───────────────────────────────────────────────────────────

#[test]
fn drift_is_corrected_exactly_once_after_full_dwell() {
    let drive = MockDrive::default();
    let bottom = MockInput::new(true);
    let mut controller = idle_controller(drive.clone(), bottom.clone());
    let mut sink = NullSink;

    // Carriage settles onto the switch with accumulated drift.
    drive.set_position(-0.8);
    bottom.set_level(false);

    // Arrival tick plus the 2 s window (100 ticks at 50 Hz).
    for _ in 0..100 {
        controller.tick(&mut sink);
    }
    assert_eq!(drive.state().borrow().reset_count, 0);

    controller.tick(&mut sink);
    assert_eq!(drive.state().borrow().reset_count, 1);
    assert_eq!(controller.position(), 0.0);
    assert_eq!(controller.target(), 0.0);

    // Drift is gone, so no further corrections while dwelling on.
    for _ in 0..300 {
        controller.tick(&mut sink);
    }
    assert_eq!(drive.state().borrow().reset_count, 1);
}

#[test]
fn drift_within_tolerance_is_left_alone() {
    let drive = MockDrive::default();
    let bottom = MockInput::new(true);
    let mut controller = idle_controller(drive.clone(), bottom.clone());
    let mut sink = NullSink;

    drive.set_position(-0.4);
    bottom.set_level(false);

    for _ in 0..300 {
        controller.tick(&mut sink);
    }
    assert_eq!(drive.state().borrow().reset_count, 0);
    assert_eq!(controller.position(), -0.4);
}

#[test]
fn switch_bounce_restarts_the_dwell_window() {
    let drive = MockDrive::default();
    let bottom = MockInput::new(true);
    let mut controller = idle_controller(drive.clone(), bottom.clone());
    let mut sink = NullSink;

    drive.set_position(-0.8);
    bottom.set_level(false);
    for _ in 0..60 {
        controller.tick(&mut sink);
    }

    // Transient release wipes the accumulated window.
    bottom.set_level(true);
    controller.tick(&mut sink);
    bottom.set_level(false);

    for _ in 0..100 {
        controller.tick(&mut sink);
    }
    assert_eq!(drive.state().borrow().reset_count, 0);

    controller.tick(&mut sink);
    assert_eq!(drive.state().borrow().reset_count, 1);
}

#[test]
fn startup_probe_zeros_immediately_when_resting_on_switch() {
    let drive = MockDrive::default();
    drive.set_position(-1.3);
    let controller = idle_controller(drive.clone(), MockInput::new(false));

    // No dwell needed at power-up.
    assert_eq!(drive.state().borrow().reset_count, 1);
    assert_eq!(controller.position(), 0.0);
}

#[test]
fn manual_zero_reports_previous_position_and_resets_target() {
    let drive = MockDrive::default();
    let mut controller = idle_controller(drive.clone(), MockInput::new(true));
    let mut sink = NullSink;

    drive.set_position(12.0);
    controller.set_target_position(20.0);
    controller.tick(&mut sink);

    let previous = controller.calibrate_zero();
    assert_eq!(previous, 12.0);
    assert_eq!(controller.position(), 0.0);
    assert_eq!(controller.target(), 0.0);
}

#[test]
fn dwell_state_machine_is_observable() {
    use lift_control_unit::calibrate::AutoCalibrator;

    let config = LiftConfig::default();
    let mut calibrator = AutoCalibrator::new(
        config.auto_calibration.dwell_time_s,
        config.controller.tick_period_s,
        config.auto_calibration.drift_tolerance,
    );

    assert_eq!(calibrator.state(), DwellState::NotAtHome);
    calibrator.tick(true, -0.8);
    assert_eq!(calibrator.state(), DwellState::Arriving);
    calibrator.tick(true, -0.8);
    assert_eq!(calibrator.state(), DwellState::Dwelling);
    calibrator.tick(false, -0.8);
    assert_eq!(calibrator.state(), DwellState::NotAtHome);
}
