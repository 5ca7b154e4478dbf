//! Telemetry publication.
//!
//! The controller publishes one [`ElevatorTelemetry`] frame per tick
//! through a [`TelemetrySink`]. Sinks decide what to do with frames:
//! drop them, emit them as structured log events, or record them for
//! inspection in tests.

use lift_common::telemetry::ElevatorTelemetry;
use tracing::trace;

/// Consumer of per-tick telemetry frames.
pub trait TelemetrySink {
    fn publish(&mut self, frame: &ElevatorTelemetry);
}

/// Discards every frame.
#[derive(Debug, Default)]
pub struct NullSink;

impl TelemetrySink for NullSink {
    fn publish(&mut self, _frame: &ElevatorTelemetry) {}
}

/// Emits each frame as a `trace!` event with the frame serialized to
/// JSON, so `--json` runs produce machine-readable telemetry.
#[derive(Debug, Default)]
pub struct TracingSink;

impl TelemetrySink for TracingSink {
    fn publish(&mut self, frame: &ElevatorTelemetry) {
        match serde_json::to_string(frame) {
            Ok(json) => trace!(target: "telemetry", frame = %json),
            Err(e) => trace!(target: "telemetry", error = %e, "serialization failed"),
        }
    }
}

/// Keeps every frame in memory. Test helper.
#[derive(Debug, Default)]
pub struct RecordingSink {
    frames: Vec<ElevatorTelemetry>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[ElevatorTelemetry] {
        &self.frames
    }

    pub fn last(&self) -> Option<&ElevatorTelemetry> {
        self.frames.last()
    }
}

impl TelemetrySink for RecordingSink {
    fn publish(&mut self, frame: &ElevatorTelemetry) {
        self.frames.push(*frame);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
