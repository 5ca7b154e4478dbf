//! Torque-assist bootstrap supervisor.
//!
//! Holds the fixed open-loop output for at most a configured time,
//! handing off to the on-device loop when EITHER the timer expires OR
//! the filtered error shows the move clearly converging. The dual exit
//! bounds worst-case assist duration and still allows an early handoff
//! once motion is established.
//!
//! Timers are tick counters, not wall-clock alarms: one increment per
//! controller tick.

/// Why the assist phase handed off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandoffReason {
    /// Bounded timer expired.
    Timeout,
    /// Filtered error dropped under twice the settle tolerance.
    Converged,
}

/// Result of one assist tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssistTick {
    /// Assist not engaged.
    Inactive,
    /// Still bootstrapping.
    InProgress,
    /// Phase over — caller must issue the closed-loop setpoint.
    Handoff(HandoffReason),
}

/// Tick-counted supervisor for the torque-assist phase.
#[derive(Debug, Clone)]
pub struct TorqueAssist {
    active: bool,
    elapsed_ticks: u64,
    timeout_ticks: u64,
    /// Filtered-error exit threshold: 2 × settle tolerance.
    exit_error: f64,
}

impl TorqueAssist {
    /// Build from the configured timeout and the tick period.
    pub fn new(timeout_s: f64, tick_period_s: f64, settle_tolerance: f64) -> Self {
        let timeout_ticks = if tick_period_s > 0.0 {
            (timeout_s / tick_period_s).ceil() as u64
        } else {
            u64::MAX
        };
        Self {
            active: false,
            elapsed_ticks: 0,
            timeout_ticks,
            exit_error: settle_tolerance * 2.0,
        }
    }

    /// Start the assist phase, restarting the timer.
    pub fn engage(&mut self) {
        self.active = true;
        self.elapsed_ticks = 0;
    }

    /// Cancel without handoff (explicit stop or safety veto).
    pub fn cancel(&mut self) {
        self.active = false;
        self.elapsed_ticks = 0;
    }

    /// Whether the assist phase is running.
    #[inline]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Ticks elapsed since engagement.
    #[inline]
    pub const fn elapsed_ticks(&self) -> u64 {
        self.elapsed_ticks
    }

    /// Advance one tick with the current filtered error.
    ///
    /// The timeout is checked before the convergence exit, matching the
    /// priority of the bound over the early handoff.
    pub fn tick(&mut self, filtered_error: f64) -> AssistTick {
        if !self.active {
            return AssistTick::Inactive;
        }
        self.elapsed_ticks += 1;

        if self.elapsed_ticks >= self.timeout_ticks {
            self.active = false;
            return AssistTick::Handoff(HandoffReason::Timeout);
        }
        if filtered_error.abs() < self.exit_error {
            self.active = false;
            return AssistTick::Handoff(HandoffReason::Converged);
        }
        AssistTick::InProgress
    }
}

// ─── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // 1s timeout at 50 Hz → 50 ticks.
    fn assist() -> TorqueAssist {
        TorqueAssist::new(1.0, 0.02, 0.5)
    }

    #[test]
    fn inactive_until_engaged() {
        let mut a = assist();
        assert_eq!(a.tick(100.0), AssistTick::Inactive);
        assert!(!a.is_active());
    }

    #[test]
    fn times_out_after_configured_ticks() {
        let mut a = assist();
        a.engage();
        for _ in 0..49 {
            assert_eq!(a.tick(100.0), AssistTick::InProgress);
        }
        assert_eq!(a.tick(100.0), AssistTick::Handoff(HandoffReason::Timeout));
        assert!(!a.is_active());
    }

    #[test]
    fn converges_early_below_twice_tolerance() {
        let mut a = assist();
        a.engage();
        assert_eq!(a.tick(5.0), AssistTick::InProgress);
        // 2 × 0.5 = 1.0 exit threshold.
        assert_eq!(a.tick(0.99), AssistTick::Handoff(HandoffReason::Converged));
    }

    #[test]
    fn exit_threshold_is_exclusive() {
        let mut a = assist();
        a.engage();
        assert_eq!(a.tick(1.0), AssistTick::InProgress);
        assert_eq!(a.tick(-0.5), AssistTick::Handoff(HandoffReason::Converged));
    }

    #[test]
    fn cancel_suppresses_handoff() {
        let mut a = assist();
        a.engage();
        a.cancel();
        assert_eq!(a.tick(0.0), AssistTick::Inactive);
    }

    #[test]
    fn reengage_restarts_timer() {
        let mut a = assist();
        a.engage();
        for _ in 0..40 {
            a.tick(100.0);
        }
        a.engage();
        assert_eq!(a.elapsed_ticks(), 0);
        for _ in 0..49 {
            assert_eq!(a.tick(100.0), AssistTick::InProgress);
        }
        assert_eq!(a.tick(100.0), AssistTick::Handoff(HandoffReason::Timeout));
    }
}
