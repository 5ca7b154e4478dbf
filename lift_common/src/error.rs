//! Shared error types for command entry points.

use thiserror::Error;

use crate::levels::Level;

/// Errors returned by elevator command entry points.
///
/// Rejected commands leave all controller state untouched — no motor
/// output change, no target write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LiftError {
    /// Level index outside the enumerated set.
    #[error("invalid level index {index} (valid: 0..={max})", max = Level::COUNT - 1)]
    InvalidLevel {
        /// The rejected raw index.
        index: u8,
    },
}
