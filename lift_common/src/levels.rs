//! Named elevator levels and height classification.

use serde::{Deserialize, Serialize};

use crate::error::LiftError;

/// The four named elevator levels, bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Level {
    /// Bottom level — the home position, at the bottom limit switch.
    Home = 0,
    /// First scoring level.
    Low = 1,
    /// Mid scoring level.
    Mid = 2,
    /// Top scoring level.
    Top = 3,
}

impl Level {
    /// Number of named levels.
    pub const COUNT: usize = 4;

    /// All levels, in ascending height order.
    pub const ALL: [Level; Self::COUNT] = [Self::Home, Self::Low, Self::Mid, Self::Top];

    /// Convert from a raw operator-facing index.
    ///
    /// Rejected with [`LiftError::InvalidLevel`] before any controller
    /// state is touched.
    #[inline]
    pub const fn from_index(index: u8) -> Result<Self, LiftError> {
        match index {
            0 => Ok(Self::Home),
            1 => Ok(Self::Low),
            2 => Ok(Self::Mid),
            3 => Ok(Self::Top),
            _ => Err(LiftError::InvalidLevel { index }),
        }
    }

    /// Raw index of this level.
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }
}

// ─── Level Heights ──────────────────────────────────────────────────

/// Nominal level heights and the classification band.
///
/// Heights are physical [inches]; the target resolver converts them to
/// encoder units through the calibration table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelHeights {
    /// Nominal height of each level [inches], indexed by [`Level`].
    #[serde(default = "default_heights")]
    pub heights_in: [f64; Level::COUNT],
    /// Half-width of the classification band [inches].
    #[serde(default = "default_band")]
    pub band_in: f64,
}

fn default_heights() -> [f64; Level::COUNT] {
    [0.0, 29.0, 44.5, 63.0]
}
fn default_band() -> f64 {
    1.0
}

impl Default for LevelHeights {
    fn default() -> Self {
        Self {
            heights_in: default_heights(),
            band_in: default_band(),
        }
    }
}

impl LevelHeights {
    /// Nominal height of a level [inches].
    #[inline]
    pub fn height_of(&self, level: Level) -> f64 {
        self.heights_in[level.index() as usize]
    }

    /// Classify a height against the named levels.
    ///
    /// Returns `None` between levels. If two bands overlap, the nearest
    /// level wins.
    pub fn classify(&self, height_in: f64) -> Option<Level> {
        let mut best: Option<(Level, f64)> = None;
        for level in Level::ALL {
            let distance = (height_in - self.height_of(level)).abs();
            if distance < self.band_in && best.is_none_or(|(_, d)| distance < d) {
                best = Some((level, distance));
            }
        }
        best.map(|(level, _)| level)
    }

    /// Validate height ordering and band width.
    pub fn validate(&self) -> Result<(), String> {
        if self.band_in <= 0.0 {
            return Err(format!("level band_in {} must be > 0", self.band_in));
        }
        if self.heights_in[0] != 0.0 {
            return Err(format!(
                "level 0 height must be 0 (home position), got {}",
                self.heights_in[0]
            ));
        }
        for pair in self.heights_in.windows(2) {
            if pair[1] <= pair[0] {
                return Err(format!(
                    "level heights must be strictly ascending, got {} after {}",
                    pair[1], pair[0]
                ));
            }
        }
        Ok(())
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
