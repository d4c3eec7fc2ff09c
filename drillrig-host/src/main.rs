//! Drillrig - host runner
//!
//! Runs the rig controller against the simulated rig. Command tokens are
//! read from stdin, one per line; status lines are logged through
//! tracing.
//!
//! Besides the controller's commands, the runner understands:
//! - `show` to log the display contents
//! - `link-top`, `unlink-top`, `link-grab`, `unlink-grab` to script the
//!   simulated merge block partners
//! - `quit`

mod config;
mod status;
mod tasks;

use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use drillrig_core::Controller;
use drillrig_drivers::SimRig;
use tracing::{error, info};

use crate::config::{load_config, HostConfig};
use crate::status::TracingSink;
use crate::tasks::{TickOptions, DEFAULT_TICK_MS};

#[derive(Parser)]
#[command(
    name = "drillrig",
    about = "Drive the mining drill rig sequencer against a simulated rig",
    version
)]
struct Cli {
    /// Rig configuration (TOML); defaults are used when omitted
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Tick period in milliseconds
    #[arg(long, default_value_t = DEFAULT_TICK_MS)]
    tick_ms: u64,

    /// Simulated seconds per tick (defaults to the tick period)
    #[arg(long)]
    sim_dt: Option<f32>,

    /// Stop after this many ticks
    #[arg(long)]
    ticks: Option<u32>,

    /// Command token issued on the first tick
    #[arg(long)]
    command: Option<String>,

    /// Default log level; RUST_LOG overrides it
    #[arg(long, default_value = "info")]
    log_level: tracing::Level,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(cli.log_level.into()),
        )
        .with_target(true)
        .init();

    let config = match &cli.config {
        Some(path) => {
            load_config(path).with_context(|| format!("loading {}", path.display()))?
        }
        None => {
            info!("no config file given, using defaults");
            HostConfig::default()
        }
    };

    let mut rig = SimRig::new(&config.rig.devices, &config.sim.rig_config());
    rig.grab_merge.set_linked(config.sim.grab_linked);

    let mut ctrl = Controller::new(config.rig, rig, TracingSink::new());
    if let Some(fault) = ctrl.fault() {
        error!(%fault, "startup check failed");
        bail!("startup check failed: {fault}");
    }
    info!("all devices found");

    let (tx, rx) = mpsc::channel();
    if let Some(command) = cli.command {
        tx.send(command).context("queueing initial command")?;
    }
    tasks::spawn_stdin_reader(tx).context("starting command reader")?;

    let period = Duration::from_millis(cli.tick_ms);
    let opts = TickOptions {
        period,
        sim_dt_s: cli.sim_dt.unwrap_or(period.as_secs_f32()),
        max_ticks: cli.ticks,
    };
    info!(tick_ms = cli.tick_ms, sim_dt_s = opts.sim_dt_s, "controller running");

    let ticks = tasks::run(&mut ctrl, &rx, &opts);
    info!(
        ticks,
        phase = ctrl.phase().name(),
        status_lines = ctrl.sink().log().len(),
        "controller stopped"
    );
    Ok(())
}
