//! # Lift Control Unit
//!
//! Fixed-rate control loop for a cascade elevator. Runs the hybrid
//! torque-assist / closed-loop controller against the built-in
//! simulation rig: useful for tuning gains and exercising the safety
//! interlock and auto-calibration paths without hardware.

use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;
use lift_common::config::LiftConfig;
use lift_control_unit::config::load_config;
use lift_control_unit::controller::ElevatorController;
use lift_control_unit::cycle::TickRunner;
use lift_control_unit::sim::SimRig;
use lift_control_unit::telemetry::TracingSink;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

/// Lift Control Unit — elevator control loop
#[derive(Parser, Debug)]
#[command(name = "lift_control_unit")]
#[command(version)]
#[command(about = "Hybrid-mode elevator control loop with simulation rig")]
struct Args {
    /// Path to the configuration TOML. Built-in defaults when omitted.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Level to command at startup (0..=3).
    #[arg(short, long)]
    level: Option<u8>,

    /// Number of ticks to run (0 = run until interrupted).
    #[arg(short, long, default_value_t = 0)]
    ticks: u64,

    /// Enable verbose logging (DEBUG level).
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format.
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();
    setup_tracing(&args);

    info!("Lift Control Unit v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&args) {
        error!("FATAL: {e}");
        process::exit(1);
    }

    info!("Lift Control Unit shutdown complete");
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => {
            info!("No config file given, using built-in defaults");
            LiftConfig::default()
        }
    };

    info!(
        "Config OK: tick_period={}s, tolerance={}, levels={:?}",
        config.controller.tick_period_s, config.controller.tolerance, config.levels.heights_in,
    );

    let rig = SimRig::new(
        config.gains.ascent,
        config.gains.descent,
        config.controller.top_threshold,
        config.controller.bottom_threshold,
    );
    let mut controller = ElevatorController::new(
        config.clone(),
        rig.drive(),
        rig.top_switch(),
        rig.bottom_switch(),
    )
    .with_sim_hook(Box::new(rig.hook()));

    if let Some(index) = args.level {
        controller.set_level(index)?;
    }

    // Signal handler for graceful shutdown.
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        r.store(false, Ordering::SeqCst);
    })?;

    let runner = TickRunner::new(
        config.controller.tick_period_s,
        config.controller.status_interval,
        running,
    );
    let mut sink = TracingSink;
    let stats = runner.run(&mut controller, &mut sink, args.ticks);

    info!(
        "Run complete: {} ticks, max tick {}µs, {} overruns, final position {:.3}",
        stats.tick_count,
        stats.max_tick_ns / 1_000,
        stats.overruns,
        controller.position(),
    );

    Ok(())
}

fn setup_tracing(args: &Args) {
    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .init();
    }
}
