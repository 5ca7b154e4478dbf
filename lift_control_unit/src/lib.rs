//! # Lift Control Unit Library
//!
//! Fixed-cadence control loop for a competition-robot elevator. Each
//! tick reads sensors, runs the travel-limit safety interlock, updates
//! the auto-calibration dwell detector, steps the hybrid control-mode
//! state machine (open-loop torque assist bootstrapping into the
//! on-device position loop), and publishes a telemetry snapshot.
//!
//! ## Tick Order
//!
//! sensors → safety veto → auto-calibration → mode step → telemetry →
//! simulation hook. The interlock runs first and can veto whatever any
//! mode — torque assist included — is commanding.
//!
//! ## Boundaries
//!
//! Hardware is reached only through the capability traits in [`hal`];
//! telemetry leaves only through [`telemetry::TelemetrySink`]; the
//! simulation hook in [`sim`] is a no-op outside simulated deployments.

pub mod calibrate;
pub mod config;
pub mod control;
pub mod controller;
pub mod cycle;
pub mod hal;
pub mod safety;
pub mod sim;
pub mod telemetry;
