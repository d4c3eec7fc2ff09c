//! Tick loop
//!
//! Each tick:
//! - Takes at most one queued token
//! - Handles runner tokens locally, passes the rest to the controller
//! - Advances the simulation by one tick's worth of time

use std::sync::mpsc::{Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use drillrig_core::config::CouplerRole;
use drillrig_core::Controller;
use drillrig_drivers::SimRig;
use tracing::{debug, info};

use crate::status::TracingSink;

/// Default tick period, one game update of 100 frames at 60 Hz
pub const DEFAULT_TICK_MS: u64 = 1667;

/// Tick loop settings
#[derive(Debug, Clone)]
pub struct TickOptions {
    /// Wall-clock time between ticks
    pub period: Duration,
    /// Simulated seconds per tick
    pub sim_dt_s: f32,
    /// Stop after this many ticks
    pub max_ticks: Option<u32>,
}

impl Default for TickOptions {
    fn default() -> Self {
        let period = Duration::from_millis(DEFAULT_TICK_MS);
        Self {
            period,
            sim_dt_s: period.as_secs_f32(),
            max_ticks: None,
        }
    }
}

/// Tokens handled by the runner rather than the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    /// Leave the loop
    Quit,
    /// Log the display contents
    Show,
    /// Lock or release a simulated merge block partner
    Link { coupler: CouplerRole, linked: bool },
}

impl HostCommand {
    pub fn parse(token: &str) -> Option<Self> {
        let cmd = match token {
            "quit" => HostCommand::Quit,
            "show" => HostCommand::Show,
            "link-top" => HostCommand::Link {
                coupler: CouplerRole::Top,
                linked: true,
            },
            "unlink-top" => HostCommand::Link {
                coupler: CouplerRole::Top,
                linked: false,
            },
            "link-grab" => HostCommand::Link {
                coupler: CouplerRole::Grab,
                linked: true,
            },
            "unlink-grab" => HostCommand::Link {
                coupler: CouplerRole::Grab,
                linked: false,
            },
            _ => return None,
        };
        Some(cmd)
    }
}

/// Run ticks until `quit` or the tick limit
///
/// Returns the number of ticks run.
pub fn run(
    ctrl: &mut Controller<SimRig, TracingSink>,
    commands: &Receiver<String>,
    opts: &TickOptions,
) -> u32 {
    let mut ticks = 0u32;
    let mut next = Instant::now();
    let mut input_open = true;

    loop {
        if opts.max_ticks.is_some_and(|max| ticks >= max) {
            info!(ticks, "tick limit reached");
            break;
        }

        let token = if input_open {
            match commands.try_recv() {
                Ok(token) => Some(token),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => {
                    debug!("command input disconnected");
                    input_open = false;
                    None
                }
            }
        } else {
            None
        };

        let token = match token.as_deref().map(|t| (t, HostCommand::parse(t))) {
            Some((_, Some(HostCommand::Quit))) => {
                info!("quit requested");
                break;
            }
            Some((_, Some(cmd))) => {
                apply_host_command(ctrl, cmd);
                None
            }
            Some((t, None)) => Some(t),
            None => None,
        };

        ctrl.tick_str(token);
        ctrl.registry_mut().step(opts.sim_dt_s);
        ticks += 1;

        next += opts.period;
        match next.checked_duration_since(Instant::now()) {
            Some(wait) => thread::sleep(wait),
            // Fell behind; don't try to catch up with a burst of ticks
            None => next = Instant::now(),
        }
    }

    ticks
}

fn apply_host_command(ctrl: &mut Controller<SimRig, TracingSink>, cmd: HostCommand) {
    match cmd {
        HostCommand::Quit => {}
        HostCommand::Show => {
            info!(target: "drillrig::display", "\n{}", ctrl.sink().render());
        }
        HostCommand::Link { coupler, linked } => {
            let rig = ctrl.registry_mut();
            let merge = match coupler {
                CouplerRole::Top => &mut rig.top_merge,
                CouplerRole::Grab => &mut rig.grab_merge,
            };
            merge.set_linked(linked);
            info!(coupler = ?coupler, linked, "merge block link changed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drillrig_core::config::RigConfig;
    use drillrig_core::state::Phase;
    use drillrig_core::traits::LinearActuator;
    use std::sync::mpsc;

    fn controller() -> Controller<SimRig, TracingSink> {
        Controller::new(RigConfig::default(), SimRig::with_defaults(), TracingSink::new())
    }

    fn fast(max_ticks: u32) -> TickOptions {
        TickOptions {
            period: Duration::ZERO,
            sim_dt_s: 1.0,
            max_ticks: Some(max_ticks),
        }
    }

    #[test]
    fn test_parse_host_commands() {
        assert_eq!(HostCommand::parse("quit"), Some(HostCommand::Quit));
        assert_eq!(
            HostCommand::parse("unlink-grab"),
            Some(HostCommand::Link {
                coupler: CouplerRole::Grab,
                linked: false
            })
        );
        assert_eq!(HostCommand::parse("start-drill-sequence"), None);
    }

    #[test]
    fn test_stops_at_tick_limit() {
        let mut ctrl = controller();
        let (_tx, rx) = mpsc::channel::<String>();
        assert_eq!(run(&mut ctrl, &rx, &fast(5)), 5);
        assert_eq!(ctrl.ticks(), 5);
        assert_eq!(ctrl.phase(), Phase::Idle);
    }

    #[test]
    fn test_retract_runs_to_idle() {
        let mut ctrl = controller();
        ctrl.registry_mut().top_piston.set_position(4.0);
        let (tx, rx) = mpsc::channel();
        tx.send("retract".to_string()).unwrap();
        drop(tx);

        run(&mut ctrl, &rx, &fast(3));
        assert_eq!(ctrl.phase(), Phase::Idle);
        assert!(ctrl.sink().log().lines().any(|l| l == "Starting Retract"));
        // Stop composite retracts the top piston all the way
        assert_eq!(ctrl.registry().top_piston.position(), 0.0);
    }

    #[test]
    fn test_one_token_per_tick() {
        let mut ctrl = controller();
        let (tx, rx) = mpsc::channel();
        for token in ["bogus", "start-conveyor-sequence"] {
            tx.send(token.to_string()).unwrap();
        }

        run(&mut ctrl, &rx, &fast(1));
        assert_eq!(ctrl.phase(), Phase::Idle);
        assert_eq!(ctrl.sink().log().last(), Some("Ignoring unknown command 'bogus'"));

        run(&mut ctrl, &rx, &fast(1));
        assert_eq!(ctrl.phase(), Phase::PrintConveyor);
    }

    #[test]
    fn test_runner_tokens_stay_local() {
        let mut ctrl = controller();
        let (tx, rx) = mpsc::channel();
        for token in ["link-grab", "show", "quit", "stop"] {
            tx.send(token.to_string()).unwrap();
        }

        assert_eq!(run(&mut ctrl, &rx, &fast(10)), 2);
        assert!(ctrl.registry().grab_merge.is_linked());
        assert!(!ctrl.sink().log().lines().any(|l| l.contains("unknown")));
        // "stop" is still queued
        assert_eq!(rx.try_recv().as_deref(), Ok("stop"));
    }
}
