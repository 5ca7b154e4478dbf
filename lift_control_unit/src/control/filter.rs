//! Single-pole low-pass filter over the raw position error.
//!
//! Settle/exit signal only — raw error always drives the control
//! decisions. `alpha = dt / (tau + dt)`; `tau = 0` passes the input
//! through unfiltered.

/// First-order IIR error filter.
#[derive(Debug, Clone)]
pub struct ErrorFilter {
    alpha: f64,
    value: f64,
}

impl ErrorFilter {
    /// `tau`: filter time constant [s]; `dt`: tick period [s].
    pub fn new(tau: f64, dt: f64) -> Self {
        let alpha = if tau > 0.0 && dt > 0.0 {
            dt / (tau + dt)
        } else {
            1.0
        };
        Self { alpha, value: 0.0 }
    }

    /// Advance one tick with the raw error; returns the filtered value.
    #[inline]
    pub fn apply(&mut self, raw: f64) -> f64 {
        self.value += self.alpha * (raw - self.value);
        self.value
    }

    /// Prime the filter to a known value.
    ///
    /// Used on assist engagement so a stale filter state cannot trigger
    /// an instant convergence exit.
    #[inline]
    pub fn prime(&mut self, value: f64) {
        self.value = value;
    }

    /// Last filtered value.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.value
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
