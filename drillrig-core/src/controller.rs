//! Top-level controller
//!
//! The controller is driven by an external scheduler, one call per tick.
//! Each tick it:
//! - Handles the tick's command, if any
//! - Runs the sequencer exactly once for the current phase
//! - Issues the resulting actions through the device facade
//! - Refreshes the status header

use core::fmt;

use crate::config::{device_name, ConfigError, DeviceName, RigConfig};
use crate::facade::DeviceFacade;
use crate::sequencer::{stop_actions, Outcome, Sequencer, SequencerState};
use crate::state::{Command, Phase};
use crate::traits::{DeviceKind, DeviceRegistry, StatusHeader, StatusSink};

/// Startup failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RigError {
    /// A configured device name did not resolve
    MissingDevice { kind: DeviceKind, name: DeviceName },
    /// Configuration failed validation
    InvalidConfig(ConfigError),
}

impl fmt::Display for RigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RigError::MissingDevice { kind, name } => {
                write!(f, "missing {} '{}'", kind.as_str(), name)
            }
            RigError::InvalidConfig(err) => write!(f, "invalid config: {}", err),
        }
    }
}

impl From<ConfigError> for RigError {
    fn from(err: ConfigError) -> Self {
        RigError::InvalidConfig(err)
    }
}

/// Tick-driven rig controller
pub struct Controller<R, S> {
    config: RigConfig,
    facade: DeviceFacade<R, S>,
    sequencer: Sequencer,
    /// Startup failure; while set, sequences cannot be started
    fault: Option<RigError>,
    ticks: u32,
}

impl<R: DeviceRegistry, S: StatusSink> Controller<R, S> {
    /// Create a controller and check that every configured device exists
    ///
    /// A failed check is reported to the sink and kept as [`fault`]; the
    /// controller stays idle until [`check_devices`] passes.
    ///
    /// [`fault`]: Controller::fault
    /// [`check_devices`]: Controller::check_devices
    pub fn new(config: RigConfig, registry: R, sink: S) -> Self {
        let mut ctrl = Self {
            config,
            facade: DeviceFacade::new(registry, sink),
            sequencer: Sequencer::new(),
            fault: None,
            ticks: 0,
        };
        let _ = ctrl.check_devices();
        ctrl.refresh_header();
        ctrl
    }

    /// Validate the configuration and resolve every configured device
    pub fn check_devices(&mut self) -> Result<(), RigError> {
        let result = self.resolve_all();
        match &result {
            Ok(()) => {
                if self.fault.take().is_some() {
                    self.facade.report(format_args!("All devices found"));
                }
            }
            Err(err) => {
                self.facade.report(format_args!("Startup failed: {}", err));
                self.sequencer.set_phase(Phase::Idle);
                self.fault = Some(err.clone());
            }
        }
        result
    }

    fn resolve_all(&mut self) -> Result<(), RigError> {
        self.config.validate()?;
        for (kind, name) in self.config.devices.required() {
            if !self.facade.registry_mut().contains(kind, name) {
                return Err(RigError::MissingDevice {
                    kind,
                    name: device_name(name),
                });
            }
        }
        Ok(())
    }

    /// Startup failure, if any
    pub fn fault(&self) -> Option<&RigError> {
        self.fault.as_ref()
    }

    /// Active configuration
    pub fn config(&self) -> &RigConfig {
        &self.config
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.sequencer.phase()
    }

    /// Current phase and step
    pub fn state(&self) -> SequencerState {
        self.sequencer.state()
    }

    /// Place the sequencer at a given phase and step
    ///
    /// Used to resume after a restart.
    pub fn set_state(&mut self, state: SequencerState) {
        self.sequencer = Sequencer::with_state(state);
        self.refresh_header();
    }

    /// Number of ticks processed
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Access the registry
    pub fn registry(&self) -> &R {
        self.facade.registry()
    }

    /// Mutable access to the registry
    pub fn registry_mut(&mut self) -> &mut R {
        self.facade.registry_mut()
    }

    /// Access the status sink
    pub fn sink(&self) -> &S {
        self.facade.sink()
    }

    /// Mutable access to the status sink
    pub fn sink_mut(&mut self) -> &mut S {
        self.facade.sink_mut()
    }

    /// Run one tick with a raw command token
    ///
    /// Unrecognized tokens are reported and otherwise ignored.
    pub fn tick_str(&mut self, token: Option<&str>) {
        let command = match token {
            Some(token) => {
                let command = Command::parse(token);
                if command.is_none() {
                    self.facade
                        .report(format_args!("Ignoring unknown command '{}'", token));
                }
                command
            }
            None => None,
        };
        self.tick(command);
    }

    /// Run one tick
    pub fn tick(&mut self, command: Option<Command>) {
        if let Some(command) = command {
            self.handle_command(command);
        }

        let outcome = {
            let mut sensors = self.facade.sensors(&self.config);
            self.sequencer.advance(&self.config, &mut sensors)
        };
        self.issue(&outcome);

        self.ticks = self.ticks.wrapping_add(1);
        self.refresh_header();
    }

    /// Stop-all composite
    ///
    /// Shuts off both fabricators and the welders, retracts the top piston
    /// and forces the phase to idle without waiting on any guard.
    pub fn stop(&mut self) {
        self.sequencer.set_phase(Phase::Idle);
        let outcome = stop_actions(&self.config);
        self.issue(&outcome);
        self.refresh_header();
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::StartDrill => self.begin(Phase::PrintDrill),
            Command::StartConveyor => self.begin(Phase::PrintConveyor),
            Command::Retract => self.begin(Phase::Retract),
            Command::Stop => self.stop(),
            Command::Pause => {
                self.sequencer.set_phase(Phase::Idle);
                self.facade.report(format_args!("Paused"));
            }
            Command::ResetLog => {
                self.facade.sink_mut().reset();
            }
        }
    }

    fn begin(&mut self, phase: Phase) {
        if let Some(fault) = &self.fault {
            self.facade
                .report(format_args!("Cannot start {}: {}", phase.name(), fault));
            return;
        }
        self.sequencer.set_phase(phase);
        self.facade.report(format_args!("Starting {}", phase.name()));
    }

    fn issue(&mut self, outcome: &Outcome) {
        if let Some(note) = outcome.note {
            self.facade.report(format_args!("{}", note));
        }
        for action in &outcome.actions {
            self.facade.apply(&self.config.devices, action);
        }
    }

    fn refresh_header(&mut self) {
        let state = self.sequencer.state();
        self.facade.sink_mut().set_header(StatusHeader {
            phase: state.phase,
            step: state.step,
            running: state.phase.is_running(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::phase::{CONVEYOR_STEPS, DRILL_STEPS};
    use crate::status::StatusLog;
    use crate::testing::FakeRegistry;
    use proptest::prelude::*;

    fn controller() -> Controller<FakeRegistry, StatusLog> {
        Controller::new(RigConfig::default(), FakeRegistry::new(), StatusLog::new())
    }

    #[test]
    fn test_startup_ok() {
        let ctrl = controller();
        assert!(ctrl.fault().is_none());
        assert_eq!(ctrl.phase(), Phase::Idle);
        assert!(ctrl.sink().is_empty());
    }

    #[test]
    fn test_missing_device_blocks_start() {
        let mut registry = FakeRegistry::new();
        registry.hide("[MINE] Merge Grab");
        let mut ctrl = Controller::new(RigConfig::default(), registry, StatusLog::new());

        assert_eq!(
            ctrl.fault(),
            Some(&RigError::MissingDevice {
                kind: DeviceKind::Coupler,
                name: device_name("[MINE] Merge Grab"),
            })
        );
        assert_eq!(
            ctrl.sink().last(),
            Some("Startup failed: missing coupler '[MINE] Merge Grab'")
        );

        ctrl.tick(Some(Command::StartConveyor));
        assert_eq!(ctrl.phase(), Phase::Idle);
        assert_eq!(ctrl.registry().top.velocity, 0.0);

        ctrl.registry_mut().hidden.clear();
        assert_eq!(ctrl.check_devices(), Ok(()));
        ctrl.tick(Some(Command::StartConveyor));
        assert_eq!(ctrl.state(), SequencerState { phase: Phase::PrintConveyor, step: 1 });
    }

    #[test]
    fn test_invalid_config_is_a_fault() {
        let mut config = RigConfig::default();
        config.motion.top_speed = -1.0;
        let ctrl = Controller::new(config, FakeRegistry::new(), StatusLog::new());
        assert_eq!(
            ctrl.fault(),
            Some(&RigError::InvalidConfig(ConfigError::InvalidSpeed("top_speed")))
        );
    }

    #[test]
    fn test_no_command_continues_phase() {
        let mut ctrl = controller();
        ctrl.tick(Some(Command::StartConveyor));
        assert_eq!(ctrl.state().step, 1);

        // Pistons not in place yet: step 1 holds
        ctrl.tick(None);
        ctrl.tick(None);
        assert_eq!(ctrl.state(), SequencerState { phase: Phase::PrintConveyor, step: 1 });
        assert_eq!(ctrl.ticks(), 3);
    }

    #[test]
    fn test_unknown_command_leaves_phase() {
        let mut ctrl = controller();
        ctrl.tick_str(Some("start-conveyor-sequence"));
        ctrl.tick_str(Some("launch"));
        assert_eq!(ctrl.phase(), Phase::PrintConveyor);
        assert!(ctrl
            .sink()
            .lines()
            .any(|l| l == "Ignoring unknown command 'launch'"));

        ctrl.tick_str(Some("STOP"));
        assert_eq!(ctrl.phase(), Phase::PrintConveyor);
    }

    #[test]
    fn test_drill_skipped_with_string_held() {
        let mut ctrl = controller();
        ctrl.registry_mut().grab_merge.connected = false;

        ctrl.tick(Some(Command::StartDrill));

        assert_eq!(ctrl.state(), SequencerState::start(Phase::PrintConveyor));
        let reg = ctrl.registry();
        assert_eq!(reg.top.velocity, 0.0);
        assert_eq!(reg.grab.velocity, 0.0);
        assert!(!reg.drill.enabled);
        assert!(!reg.welders.members[0].enabled);
    }

    #[test]
    fn test_stop_composite() {
        let mut ctrl = controller();
        ctrl.set_state(SequencerState { phase: Phase::PrintConveyor, step: 7 });
        {
            let reg = ctrl.registry_mut();
            reg.drill.enabled = true;
            reg.conveyor.enabled = true;
            reg.welders.members[0].enabled = true;
            reg.top.velocity = 0.1;
        }

        ctrl.tick(Some(Command::Stop));

        assert_eq!(ctrl.phase(), Phase::Idle);
        let reg = ctrl.registry();
        assert!(!reg.drill.enabled);
        assert!(!reg.conveyor.enabled);
        assert!(!reg.welders.members[0].enabled);
        assert_eq!(reg.top.velocity, -5.0);
        assert!(!ctrl.sink().header().running);
    }

    #[test]
    fn test_pause_leaves_hardware() {
        let mut ctrl = controller();
        ctrl.set_state(SequencerState { phase: Phase::PrintConveyor, step: 8 });
        ctrl.registry_mut().top.velocity = 0.1;

        ctrl.tick(Some(Command::Pause));

        assert_eq!(ctrl.phase(), Phase::Idle);
        assert_eq!(ctrl.registry().top.velocity, 0.1);
    }

    #[test]
    fn test_retract_runs_to_idle() {
        let mut ctrl = controller();
        ctrl.registry_mut().top_merge.enabled = true;

        ctrl.tick(Some(Command::Retract));
        assert_eq!(ctrl.phase(), Phase::Complete);
        assert_eq!(ctrl.registry().top.velocity, -5.0);
        assert!(ctrl.registry().grab_merge.enabled);
        assert!(!ctrl.registry().top_merge.enabled);

        ctrl.tick(None);
        assert_eq!(ctrl.phase(), Phase::Idle);
    }

    #[test]
    fn test_reset_log_keeps_header() {
        let mut ctrl = controller();
        ctrl.tick(Some(Command::StartConveyor));
        assert!(!ctrl.sink().is_empty());

        ctrl.set_state(SequencerState { phase: Phase::PrintConveyor, step: 11 });
        ctrl.tick(Some(Command::ResetLog));

        // Only this tick's lines survive
        let lines: Vec<&str> = ctrl.sink().lines().collect();
        assert_eq!(lines.first(), Some(&"Piston [MINE] Piston Top at 0m, target 9.9m: moving"));
        assert_eq!(lines.last(), Some(&"Waiting for top piston to extend"));
        assert_eq!(ctrl.sink().header().phase, Phase::PrintConveyor);
        assert_eq!(ctrl.sink().header().step, 11);
    }

    #[test]
    fn test_header_tracks_state() {
        let mut ctrl = controller();
        ctrl.tick(Some(Command::StartConveyor));
        let header = ctrl.sink().header();
        assert_eq!(header.phase, Phase::PrintConveyor);
        assert_eq!(header.step, 1);
        assert!(header.running);
    }

    fn any_state() -> impl Strategy<Value = SequencerState> {
        prop_oneof![
            Just(SequencerState::start(Phase::Idle)),
            Just(SequencerState::start(Phase::Retract)),
            Just(SequencerState::start(Phase::Complete)),
            (0..DRILL_STEPS).prop_map(|step| SequencerState { phase: Phase::PrintDrill, step }),
            (0..CONVEYOR_STEPS).prop_map(|step| SequencerState { phase: Phase::PrintConveyor, step }),
        ]
    }

    proptest! {
        #[test]
        fn prop_stop_always_idles(
            state in any_state(),
            top in 0.0f32..10.0,
            grab_connected in any::<bool>(),
        ) {
            let mut ctrl = controller();
            ctrl.registry_mut().top.position = top;
            ctrl.registry_mut().grab_merge.connected = grab_connected;
            ctrl.set_state(state);

            ctrl.tick(Some(Command::Stop));

            prop_assert_eq!(ctrl.state(), SequencerState::start(Phase::Idle));
            prop_assert!(!ctrl.registry().drill.enabled);
            prop_assert!(!ctrl.registry().conveyor.enabled);
            prop_assert_eq!(ctrl.registry().top.velocity, -5.0);
        }
    }
}
