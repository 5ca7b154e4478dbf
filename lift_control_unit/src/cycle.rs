//! Fixed-rate tick loop.
//!
//! Paces [`ElevatorController::tick`] at the configured period with a
//! plain sleep-based scheduler and keeps coarse timing statistics.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::controller::ElevatorController;
use crate::hal::{DigitalInput, ElevatorDrive};
use crate::telemetry::TelemetrySink;

/// Timing statistics for a finished run.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickStats {
    /// Total ticks executed.
    pub tick_count: u64,
    /// Duration of the last tick body [ns].
    pub last_tick_ns: u64,
    /// Worst tick body observed [ns].
    pub max_tick_ns: u64,
    /// Ticks whose body ran longer than the period.
    pub overruns: u64,
}

/// Sleep-paced runner around a controller.
pub struct TickRunner {
    period: Duration,
    status_interval: u64,
    running: Arc<AtomicBool>,
}

impl TickRunner {
    /// `running` is shared with the signal handler: clearing it stops
    /// the loop after the current tick.
    pub fn new(tick_period_s: f64, status_interval: u64, running: Arc<AtomicBool>) -> Self {
        Self {
            period: Duration::from_secs_f64(tick_period_s),
            status_interval,
            running,
        }
    }

    /// Run until `max_ticks` ticks have executed (0 = until the
    /// running flag clears). Returns the accumulated statistics.
    pub fn run<D, T, B>(
        &self,
        controller: &mut ElevatorController<D, T, B>,
        sink: &mut dyn TelemetrySink,
        max_ticks: u64,
    ) -> TickStats
    where
        D: ElevatorDrive,
        T: DigitalInput,
        B: DigitalInput,
    {
        let mut stats = TickStats::default();

        while self.running.load(Ordering::Relaxed)
            && (max_ticks == 0 || stats.tick_count < max_ticks)
        {
            let start = Instant::now();
            controller.tick(sink);
            let elapsed = start.elapsed();

            stats.tick_count += 1;
            stats.last_tick_ns = elapsed.as_nanos() as u64;
            stats.max_tick_ns = stats.max_tick_ns.max(stats.last_tick_ns);

            if self.status_interval > 0 && stats.tick_count % self.status_interval == 0 {
                info!(
                    tick = stats.tick_count,
                    position = controller.position(),
                    target = controller.target(),
                    mode = ?controller.mode(),
                    at_target = controller.at_target(),
                    "status"
                );
            }

            match self.period.checked_sub(elapsed) {
                Some(remaining) => thread::sleep(remaining),
                None => {
                    stats.overruns += 1;
                    warn!(
                        tick = stats.tick_count,
                        elapsed_us = elapsed.as_micros() as u64,
                        "tick overran its period"
                    );
                }
            }
        }

        debug!(
            ticks = stats.tick_count,
            max_tick_us = stats.max_tick_ns / 1_000,
            overruns = stats.overruns,
            "tick loop finished"
        );
        stats
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
