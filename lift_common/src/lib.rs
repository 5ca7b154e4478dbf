//! # Lift Common Library
//!
//! Shared types for the lift elevator control system: named levels,
//! the encoder↔height calibration table, feedback gain records,
//! controller state enums, configuration structures, and the telemetry
//! snapshot published every tick.
//!
//! Everything here is plain data. The control logic itself lives in
//! `lift_control_unit`.

pub mod calibration;
pub mod config;
pub mod error;
pub mod gains;
pub mod levels;
pub mod state;
pub mod telemetry;
