//! Configuration structures for the elevator control unit.
//!
//! All types deserialize from TOML with per-field defaults equal to the
//! competition-tuned values, so an empty file (or no file at all) yields
//! a runnable configuration. Numeric parameters carry `validate()`
//! bounds checks; validation failures are reported as strings and
//! wrapped by the loading layer.

use serde::{Deserialize, Serialize};

use crate::calibration::CalibrationTable;
use crate::gains::PidGains;
use crate::levels::LevelHeights;

// ─── Top-Level Config ───────────────────────────────────────────────

/// Top-level elevator configuration, loaded from `lift.toml`.
///
/// Immutable after startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LiftConfig {
    /// Tick cadence, tolerances and travel bounds.
    #[serde(default)]
    pub controller: ControllerConfig,
    /// Torque-assist bootstrap parameters.
    #[serde(default)]
    pub assist: AssistConfig,
    /// Auto-calibration dwell parameters.
    #[serde(default)]
    pub auto_calibration: AutoCalConfig,
    /// Feedback gain profiles per slot.
    #[serde(default)]
    pub gains: GainsConfig,
    /// Named level heights.
    #[serde(default)]
    pub levels: LevelHeights,
    /// Encoder↔height calibration table.
    #[serde(default)]
    pub table: CalibrationTable,
    /// Channel wiring, consumed by hardware adapters only.
    #[serde(default)]
    pub hardware: HardwareConfig,
}

impl LiftConfig {
    /// Validate all sections.
    pub fn validate(&self) -> Result<(), String> {
        self.controller.validate()?;
        self.assist.validate()?;
        self.auto_calibration.validate()?;
        self.levels.validate()?;
        self.table.validate().map_err(|e| e.to_string())?;
        self.hardware.validate()?;
        Ok(())
    }
}

// ─── Controller Config ──────────────────────────────────────────────

/// Tick cadence, settle tolerance, error filter, and software travel
/// bounds [encoder units].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Fixed tick period [s] (default: 0.02 = 50 Hz).
    #[serde(default = "default_tick_period")]
    pub tick_period_s: f64,
    /// Settle tolerance [encoder units].
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Software bottom travel bound [encoder units].
    #[serde(default = "default_bottom_threshold")]
    pub bottom_threshold: f64,
    /// Software top travel bound [encoder units].
    #[serde(default = "default_top_threshold")]
    pub top_threshold: f64,
    /// Error filter time constant [s].
    #[serde(default = "default_filter_tau")]
    pub filter_time_constant_s: f64,
    /// Status log interval [ticks], 0 disables status logs.
    #[serde(default = "default_status_interval")]
    pub status_interval: u64,
}

fn default_tick_period() -> f64 {
    0.02
}
fn default_tolerance() -> f64 {
    0.5
}
fn default_bottom_threshold() -> f64 {
    -5.0
}
fn default_top_threshold() -> f64 {
    37.5
}
fn default_filter_tau() -> f64 {
    0.1
}
fn default_status_interval() -> u64 {
    50
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            tick_period_s: default_tick_period(),
            tolerance: default_tolerance(),
            bottom_threshold: default_bottom_threshold(),
            top_threshold: default_top_threshold(),
            filter_time_constant_s: default_filter_tau(),
            status_interval: default_status_interval(),
        }
    }
}

impl ControllerConfig {
    /// Validate parameter bounds.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.tick_period_s > 0.0 && self.tick_period_s <= 1.0) {
            return Err(format!(
                "tick_period_s {} out of range (0, 1]",
                self.tick_period_s
            ));
        }
        if self.tolerance <= 0.0 {
            return Err(format!("tolerance {} must be > 0", self.tolerance));
        }
        if self.bottom_threshold >= self.top_threshold {
            return Err(format!(
                "bottom_threshold {} must be below top_threshold {}",
                self.bottom_threshold, self.top_threshold
            ));
        }
        if self.filter_time_constant_s < 0.0 {
            return Err(format!(
                "filter_time_constant_s {} must be >= 0",
                self.filter_time_constant_s
            ));
        }
        Ok(())
    }
}

// ─── Torque Assist Config ───────────────────────────────────────────

/// Open-loop bootstrap parameters for large upward moves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssistConfig {
    /// Configured assist output fraction.
    #[serde(default = "default_assist_magnitude")]
    pub magnitude: f64,
    /// Floor on the applied fraction — always enough to break stiction.
    #[serde(default = "default_min_assist")]
    pub min_magnitude: f64,
    /// Bound on the assist phase [s].
    #[serde(default = "default_assist_timeout")]
    pub timeout_s: f64,
    /// Error magnitude above which an upward move engages assist
    /// [encoder units].
    #[serde(default = "default_engage_threshold")]
    pub engage_threshold: f64,
}

fn default_assist_magnitude() -> f64 {
    0.4
}
fn default_min_assist() -> f64 {
    0.15
}
fn default_assist_timeout() -> f64 {
    1.0
}
fn default_engage_threshold() -> f64 {
    2.0
}

impl Default for AssistConfig {
    fn default() -> Self {
        Self {
            magnitude: default_assist_magnitude(),
            min_magnitude: default_min_assist(),
            timeout_s: default_assist_timeout(),
            engage_threshold: default_engage_threshold(),
        }
    }
}

impl AssistConfig {
    /// Validate parameter bounds.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.magnitude > 0.0 && self.magnitude <= 1.0) {
            return Err(format!("assist magnitude {} out of range (0, 1]", self.magnitude));
        }
        if !(self.min_magnitude > 0.0 && self.min_magnitude <= 1.0) {
            return Err(format!(
                "assist min_magnitude {} out of range (0, 1]",
                self.min_magnitude
            ));
        }
        if self.timeout_s <= 0.0 {
            return Err(format!("assist timeout_s {} must be > 0", self.timeout_s));
        }
        if self.engage_threshold <= 0.0 {
            return Err(format!(
                "assist engage_threshold {} must be > 0",
                self.engage_threshold
            ));
        }
        Ok(())
    }
}

// ─── Auto-Calibration Config ────────────────────────────────────────

/// Dwell detector parameters for silent re-zeroing at the bottom switch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AutoCalConfig {
    /// Continuous dwell required before a re-zero [s].
    #[serde(default = "default_dwell_time")]
    pub dwell_time_s: f64,
    /// Minimum |position| considered drift worth correcting
    /// [encoder units].
    #[serde(default = "default_drift_tolerance")]
    pub drift_tolerance: f64,
}

fn default_dwell_time() -> f64 {
    2.0
}
fn default_drift_tolerance() -> f64 {
    0.5
}

impl Default for AutoCalConfig {
    fn default() -> Self {
        Self {
            dwell_time_s: default_dwell_time(),
            drift_tolerance: default_drift_tolerance(),
        }
    }
}

impl AutoCalConfig {
    /// Validate parameter bounds.
    pub fn validate(&self) -> Result<(), String> {
        if self.dwell_time_s <= 0.0 {
            return Err(format!("dwell_time_s {} must be > 0", self.dwell_time_s));
        }
        if self.drift_tolerance <= 0.0 {
            return Err(format!(
                "drift_tolerance {} must be > 0",
                self.drift_tolerance
            ));
        }
        Ok(())
    }
}

// ─── Gains Config ───────────────────────────────────────────────────

/// Feedback gain profiles, one per [`crate::gains::GainSlot`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GainsConfig {
    /// Ascent (default) profile.
    #[serde(default = "PidGains::ascent_default")]
    pub ascent: PidGains,
    /// Descent profile.
    #[serde(default = "PidGains::descent_default")]
    pub descent: PidGains,
}

impl Default for GainsConfig {
    fn default() -> Self {
        Self {
            ascent: PidGains::ascent_default(),
            descent: PidGains::descent_default(),
        }
    }
}

// ─── Hardware Wiring Config ─────────────────────────────────────────

/// Channel identifiers and drive limits.
///
/// Purely wiring: consumed by the hardware adapter layer, never by the
/// control logic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HardwareConfig {
    /// Primary motor controller channel id.
    #[serde(default = "default_primary_motor")]
    pub primary_motor_id: u8,
    /// Secondary (follower) motor controller channel id.
    #[serde(default = "default_secondary_motor")]
    pub secondary_motor_id: u8,
    /// Top limit switch digital channel.
    #[serde(default = "default_top_limit_channel")]
    pub top_limit_channel: u8,
    /// Bottom limit switch digital channel.
    #[serde(default = "default_bottom_limit_channel")]
    pub bottom_limit_channel: u8,
    /// Smart current limit per motor [A].
    #[serde(default = "default_current_limit")]
    pub current_limit_amps: u16,
}

fn default_primary_motor() -> u8 {
    9
}
fn default_secondary_motor() -> u8 {
    10
}
fn default_top_limit_channel() -> u8 {
    0
}
fn default_bottom_limit_channel() -> u8 {
    1
}
fn default_current_limit() -> u16 {
    40
}

impl Default for HardwareConfig {
    fn default() -> Self {
        Self {
            primary_motor_id: default_primary_motor(),
            secondary_motor_id: default_secondary_motor(),
            top_limit_channel: default_top_limit_channel(),
            bottom_limit_channel: default_bottom_limit_channel(),
            current_limit_amps: default_current_limit(),
        }
    }
}

impl HardwareConfig {
    /// Validate wiring sanity.
    pub fn validate(&self) -> Result<(), String> {
        if self.primary_motor_id == self.secondary_motor_id {
            return Err(format!(
                "primary and secondary motor ids must differ (both {})",
                self.primary_motor_id
            ));
        }
        if self.top_limit_channel == self.bottom_limit_channel {
            return Err(format!(
                "top and bottom limit channels must differ (both {})",
                self.top_limit_channel
            ));
        }
        if self.current_limit_amps == 0 || self.current_limit_amps > 80 {
            return Err(format!(
                "current_limit_amps {} out of range [1, 80]",
                self.current_limit_amps
            ));
        }
        Ok(())
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
