//! Integration test: travel interlock across the tick pipeline.
//!
//! The interlock must veto motion driving further into a tripped limit
//! switch or past a soft bound, while leaving retreat moves alone, and
//! the fault flags must surface in telemetry either way.

use lift_common::config::LiftConfig;
use lift_common::state::{ControlMode, TravelFault};
use lift_control_unit::controller::ElevatorController;
use lift_control_unit::hal::mock::{MockDrive, MockInput};
use lift_control_unit::sim::SimRig;
use lift_control_unit::telemetry::RecordingSink;

// ── Helpers ─────────────────────────────────────────────────────────

struct MockHarness {
    controller: ElevatorController<MockDrive, MockInput, MockInput>,
    drive: MockDrive,
    top: MockInput,
    bottom: MockInput,
}

// Raw switch inputs are active-low: true = released, false = pressed.
fn mock_harness() -> MockHarness {
    let drive = MockDrive::default();
    let top = MockInput::new(true);
    let bottom = MockInput::new(true);
    let controller = ElevatorController::new(
        LiftConfig::default(),
        drive.clone(),
        top.clone(),
        bottom.clone(),
    );
    MockHarness {
        controller,
        drive,
        top,
        bottom,
    }
}

// ── Tests ───────────────────────────────────────────────────────────

#[test]
fn driving_up_into_top_switch_is_stopped() {
    let mut h = mock_harness();
    let mut sink = RecordingSink::new();

    h.controller.set_target_position(20.0);
    h.drive.set_applied_output(0.4);
    h.top.set_level(false);

    h.controller.tick(&mut sink);

    assert_eq!(h.controller.mode(), ControlMode::Idle);
    assert_eq!(h.drive.state().borrow().stop_count, 1);
    let frame = sink.last().unwrap();
    assert!(frame.faults.contains(TravelFault::AT_TOP));
    assert!(frame.at_top);
}

#[test]
fn retreating_down_from_top_switch_is_allowed() {
    let mut h = mock_harness();
    let mut sink = RecordingSink::new();

    h.drive.set_position(30.0);
    h.top.set_level(false);
    h.controller.set_target_position(5.0);
    assert_eq!(h.controller.mode(), ControlMode::ClosedLoopDown);

    // On-device loop pulls downward while the switch stays pressed.
    h.drive.set_applied_output(-0.5);
    for _ in 0..10 {
        h.controller.tick(&mut sink);
    }

    assert_eq!(h.controller.mode(), ControlMode::ClosedLoopDown);
    assert_eq!(h.drive.state().borrow().stop_count, 0);
    assert!(sink.last().unwrap().faults.contains(TravelFault::AT_TOP));
}

#[test]
fn driving_down_into_bottom_switch_is_stopped() {
    let mut h = mock_harness();
    let mut sink = RecordingSink::new();

    h.drive.set_position(3.0);
    h.controller.set_target_position(0.0);
    h.drive.set_applied_output(-0.2);
    h.bottom.set_level(false);

    h.controller.tick(&mut sink);

    assert_eq!(h.controller.mode(), ControlMode::Idle);
    assert_eq!(h.drive.state().borrow().stop_count, 1);
    assert!(sink.last().unwrap().faults.contains(TravelFault::AT_BOTTOM));
}

#[test]
fn soft_limits_mirror_the_switches() {
    let mut h = mock_harness();
    let mut sink = RecordingSink::new();

    // Above the upper soft bound, still pushing up.
    h.drive.set_position(38.0);
    h.drive.set_applied_output(0.3);
    h.controller.tick(&mut sink);
    assert!(sink
        .last()
        .unwrap()
        .faults
        .contains(TravelFault::ABOVE_SOFT_LIMIT));
    assert_eq!(h.drive.state().borrow().stop_count, 1);

    // Below the lower soft bound, still pushing down.
    h.drive.set_position(-6.0);
    h.drive.set_applied_output(-0.3);
    h.controller.tick(&mut sink);
    assert!(sink
        .last()
        .unwrap()
        .faults
        .contains(TravelFault::BELOW_SOFT_LIMIT));
    assert_eq!(h.drive.state().borrow().stop_count, 2);
}

#[test]
fn faults_report_without_stop_when_output_is_zero() {
    let mut h = mock_harness();
    let mut sink = RecordingSink::new();

    h.top.set_level(false);
    h.controller.tick(&mut sink);

    assert!(h.controller.faults().contains(TravelFault::AT_TOP));
    assert_eq!(h.drive.state().borrow().stop_count, 0);
}

#[test]
fn sim_ascent_into_low_top_switch_forces_stop() {
    // Rig with the top switch mounted inside the travel range, so the
    // assist phase drives straight into it.
    let config = LiftConfig::default();
    let rig = SimRig::new(
        config.gains.ascent,
        config.gains.descent,
        20.0,
        config.controller.bottom_threshold,
    );
    let mut controller = ElevatorController::new(
        config,
        rig.drive(),
        rig.top_switch(),
        rig.bottom_switch(),
    )
    .with_sim_hook(Box::new(rig.hook()));
    let mut sink = RecordingSink::new();

    controller.go_to_level(lift_common::levels::Level::Top);
    assert_eq!(controller.mode(), ControlMode::TorqueAssist);

    for _ in 0..10 {
        controller.tick(&mut sink);
    }

    assert_eq!(controller.mode(), ControlMode::Idle);
    assert!(sink
        .frames()
        .iter()
        .any(|f| f.faults.contains(TravelFault::AT_TOP)));
}
