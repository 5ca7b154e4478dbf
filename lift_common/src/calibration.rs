//! Piecewise-linear encoder↔height calibration table.
//!
//! The elevator's position sensor counts in its own units; operators and
//! level definitions speak inches. A small table of measured
//! (encoder, height) control points maps between the two. Lookups clamp
//! to the table's range and never extrapolate, and the two conversions
//! are exact inverses at the knot points.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One measured (encoder, height) control point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Knot {
    /// Sensor reading [encoder units].
    pub encoder: f64,
    /// Physical height [inches].
    pub height: f64,
}

/// Calibration table validation error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalibrationError {
    /// Fewer than two knots.
    #[error("calibration table needs at least 2 knots, got {0}")]
    TooFewKnots(usize),
    /// First knot is not the origin.
    #[error("first calibration knot must be (0, 0), got ({encoder}, {height})")]
    NonZeroOrigin { encoder: f64, height: f64 },
    /// Knots not strictly ascending in both columns.
    #[error("calibration knots must be strictly ascending, violated at index {0}")]
    NotAscending(usize),
}

/// Piecewise-linear calibration table, sorted ascending.
///
/// Invariants (checked by [`CalibrationTable::validate`]): at least two
/// knots, first knot `(0, 0)`, strictly ascending in both columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationTable {
    /// Control points, ascending in both columns.
    #[serde(default = "default_knots")]
    pub knots: Vec<Knot>,
}

fn default_knots() -> Vec<Knot> {
    vec![
        Knot { encoder: 0.0, height: 0.0 },
        Knot { encoder: 10.22, height: 29.0 },
        Knot { encoder: 22.0, height: 44.5 },
        Knot { encoder: 27.1, height: 63.0 },
    ]
}

impl Default for CalibrationTable {
    fn default() -> Self {
        Self {
            knots: default_knots(),
        }
    }
}

impl CalibrationTable {
    /// Check the table invariants.
    pub fn validate(&self) -> Result<(), CalibrationError> {
        if self.knots.len() < 2 {
            return Err(CalibrationError::TooFewKnots(self.knots.len()));
        }
        let first = self.knots[0];
        if first.encoder != 0.0 || first.height != 0.0 {
            return Err(CalibrationError::NonZeroOrigin {
                encoder: first.encoder,
                height: first.height,
            });
        }
        for (i, pair) in self.knots.windows(2).enumerate() {
            if pair[1].encoder <= pair[0].encoder || pair[1].height <= pair[0].height {
                return Err(CalibrationError::NotAscending(i + 1));
            }
        }
        Ok(())
    }

    /// Lowest and highest encoder values covered by the table.
    #[inline]
    pub fn encoder_range(&self) -> (f64, f64) {
        (
            self.knots[0].encoder,
            self.knots[self.knots.len() - 1].encoder,
        )
    }

    /// Lowest and highest heights covered by the table [inches].
    #[inline]
    pub fn height_range(&self) -> (f64, f64) {
        (self.knots[0].height, self.knots[self.knots.len() - 1].height)
    }

    /// Convert a physical height [inches] to encoder units.
    ///
    /// Pure interpolation; input is clamped to the table's height range.
    pub fn height_to_encoder(&self, height: f64) -> f64 {
        let (lo, hi) = self.height_range();
        let h = height.clamp(lo, hi);
        for pair in self.knots.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if h <= b.height {
                let t = (h - a.height) / (b.height - a.height);
                return a.encoder + t * (b.encoder - a.encoder);
            }
        }
        self.knots[self.knots.len() - 1].encoder
    }

    /// Convert an encoder reading to a physical height [inches].
    ///
    /// Pure interpolation; input is clamped to the table's encoder range.
    pub fn encoder_to_height(&self, encoder: f64) -> f64 {
        let (lo, hi) = self.encoder_range();
        let e = encoder.clamp(lo, hi);
        for pair in self.knots.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if e <= b.encoder {
                let t = (e - a.encoder) / (b.encoder - a.encoder);
                return a.height + t * (b.height - a.height);
            }
        }
        self.knots[self.knots.len() - 1].height
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
