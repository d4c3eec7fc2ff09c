//! Step-indexed state machine
//!
//! Two phases run stepped programs:
//!
//! - drill: check for an attached drill, print the drill section, push
//!   it down
//! - conveyor: reset the pistons, grab the string, print a conveyor
//!   section, connect it, release and push down, then loop
//!
//! Retract and Complete are single-action phases. Every step either
//! advances, holds (guard unmet, retried next tick), or jumps to another
//! phase. When the step index reaches the end of a program the wrap to
//! conveyor step 0 happens in the same tick.

use crate::config::{ActuatorRole, CouplerRole, FabricatorRole, RigConfig};
use crate::state::Phase;

use super::action::{stop_actions, Action, Outcome};
use super::sensors::SensorView;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Phase plus step index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SequencerState {
    /// Active phase
    pub phase: Phase,
    /// Step within the phase's program (always 0 for single-action phases)
    pub step: u8,
}

impl SequencerState {
    /// Start of `phase`
    pub const fn start(phase: Phase) -> Self {
        Self { phase, step: 0 }
    }
}

/// What a step decided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Move to the next step
    Advance,
    /// Stay on this step
    Hold,
    /// Leave for another phase at step 0
    Enter(Phase),
}

/// Phase sequencer
#[derive(Debug, Clone, Default)]
pub struct Sequencer {
    state: SequencerState,
}

impl Sequencer {
    /// Create an idle sequencer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sequencer at a specific phase and step
    pub fn with_state(state: SequencerState) -> Self {
        Self { state }
    }

    /// Current phase and step
    pub fn state(&self) -> SequencerState {
        self.state
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Current step index
    pub fn step(&self) -> u8 {
        self.state.step
    }

    /// Switch phase, restarting its program
    pub fn set_phase(&mut self, phase: Phase) {
        self.state = SequencerState::start(phase);
    }

    /// Run one tick of the active phase
    ///
    /// Reads whatever the current step's guard needs from `sensors` and
    /// returns the actions to issue. Never blocks.
    pub fn advance<V>(&mut self, config: &RigConfig, sensors: &mut V) -> Outcome
    where
        V: SensorView + ?Sized,
    {
        match self.state.phase {
            Phase::Idle => Outcome::default(),
            Phase::PrintDrill => {
                let (step, outcome) = drill_step(self.state.step, config, sensors);
                self.finish(step);
                outcome
            }
            Phase::PrintConveyor => {
                let (step, outcome) = conveyor_step(self.state.step, config, sensors);
                self.finish(step);
                outcome
            }
            Phase::Retract => {
                let mut outcome = Outcome::noted("Retracting top piston and parking");
                outcome.push(Action::Retract {
                    actuator: ActuatorRole::Top,
                    speed: config.motion.retract_speed,
                });
                outcome.push(Action::SetCoupler {
                    coupler: CouplerRole::Grab,
                    enabled: true,
                });
                outcome.push(Action::SetCoupler {
                    coupler: CouplerRole::Top,
                    enabled: false,
                });
                self.set_phase(Phase::Complete);
                outcome
            }
            Phase::Complete => {
                self.set_phase(Phase::Idle);
                stop_actions(config)
            }
        }
    }

    /// Apply a step decision
    fn finish(&mut self, step: Step) {
        match step {
            Step::Hold => {}
            Step::Enter(phase) => self.set_phase(phase),
            Step::Advance => {
                let next = self.state.step.saturating_add(1);
                if next >= self.state.phase.step_count() {
                    // End of program: both programs continue with conveyor
                    self.set_phase(Phase::PrintConveyor);
                } else {
                    self.state.step = next;
                }
            }
        }
    }
}

fn drill_step<V>(step: u8, config: &RigConfig, sensors: &mut V) -> (Step, Outcome)
where
    V: SensorView + ?Sized,
{
    let motion = &config.motion;

    match step {
        0 => {
            let outcome = Outcome::noted("Checking if a drill section is already held");
            if sensors.coupler_detachable(CouplerRole::Grab) {
                (Step::Enter(Phase::PrintConveyor), outcome)
            } else {
                (Step::Advance, outcome)
            }
        }
        1 => {
            let mut outcome = Outcome::noted("Enabling drill projector and welders");
            outcome.push(Action::SetFabricator {
                fabricator: FabricatorRole::Drill,
                enabled: true,
            });
            outcome.push(Action::SetTools { enabled: true });
            (Step::Advance, outcome)
        }
        2 => {
            let check = config.sequence.drill_section_check;
            let mut outcome = Outcome::noted("Checking if drill section is complete");
            if sensors.fabrication_complete(check) {
                (Step::Advance, outcome)
            } else {
                outcome.push(Action::SetFabricator {
                    fabricator: check,
                    enabled: false,
                });
                outcome.push(Action::SetTools { enabled: false });
                (Step::Hold, outcome)
            }
        }
        3 => {
            let mut outcome = Outcome::noted("Extending top piston to connect drill section");
            outcome.push(Action::Extend {
                actuator: ActuatorRole::Top,
                limit: motion.top_extend_limit,
                speed: motion.top_speed,
            });
            (Step::Advance, outcome)
        }
        4 => {
            let outcome = Outcome::noted("Waiting for top piston to extend");
            if sensors.actuator_at(ActuatorRole::Top, motion.top_extend_limit) {
                (Step::Advance, outcome)
            } else {
                (Step::Hold, outcome)
            }
        }
        _ => (
            Step::Enter(Phase::PrintConveyor),
            Outcome::noted("Drill section placed"),
        ),
    }
}

fn conveyor_step<V>(step: u8, config: &RigConfig, sensors: &mut V) -> (Step, Outcome)
where
    V: SensorView + ?Sized,
{
    let motion = &config.motion;

    match step {
        0 => {
            let mut outcome = Outcome::noted("Moving pistons to starting positions");
            outcome.push(Action::Retract {
                actuator: ActuatorRole::Top,
                speed: motion.retract_speed,
            });
            outcome.push(Action::Extend {
                actuator: ActuatorRole::Grab,
                limit: motion.grab_extend_limit,
                speed: motion.grab_speed,
            });
            (Step::Advance, outcome)
        }
        1 => {
            let mut outcome = Outcome::noted("Checking piston start positions");
            let ready = sensors.actuator_at(ActuatorRole::Grab, motion.grab_extend_limit)
                && sensors.actuator_at(ActuatorRole::Top, 0.0);
            if ready {
                outcome.push(Action::SetCoupler {
                    coupler: CouplerRole::Top,
                    enabled: true,
                });
                (Step::Advance, outcome)
            } else {
                (Step::Hold, outcome)
            }
        }
        2 => {
            let mut outcome = Outcome::noted("Ensuring grab merge block is on");
            outcome.push(Action::SetCoupler {
                coupler: CouplerRole::Grab,
                enabled: true,
            });
            (Step::Advance, outcome)
        }
        3 => {
            let outcome = Outcome::noted("Checking grab merge block");
            if sensors.coupler_detachable(CouplerRole::Grab) {
                (Step::Advance, outcome)
            } else {
                (Step::Hold, outcome)
            }
        }
        4 => {
            let mut outcome = Outcome::noted("Switching from drill to conveyor projector");
            outcome.push(Action::SetFabricator {
                fabricator: FabricatorRole::Drill,
                enabled: false,
            });
            outcome.push(Action::SetFabricator {
                fabricator: FabricatorRole::Conveyor,
                enabled: true,
            });
            (Step::Advance, outcome)
        }
        5 => {
            // Re-enables the drill projector right after step 4 turned it
            // off; the installed rig runs this way
            let mut outcome = Outcome::noted("Enabling drill projector and welders");
            outcome.push(Action::SetFabricator {
                fabricator: FabricatorRole::Drill,
                enabled: true,
            });
            outcome.push(Action::SetTools { enabled: true });
            (Step::Advance, outcome)
        }
        6 => {
            let mut outcome = Outcome::noted("Checking if conveyor section is complete");
            if sensors.fabrication_complete(FabricatorRole::Conveyor) {
                (Step::Advance, outcome)
            } else {
                outcome.push(Action::SetFabricator {
                    fabricator: FabricatorRole::Conveyor,
                    enabled: false,
                });
                outcome.push(Action::SetTools { enabled: false });
                (Step::Hold, outcome)
            }
        }
        7 => {
            let mut outcome = Outcome::noted("Lowering top piston onto the string");
            outcome.push(Action::Extend {
                actuator: ActuatorRole::Top,
                limit: motion.top_connect_limit,
                speed: motion.drill_speed,
            });
            (Step::Advance, outcome)
        }
        8 => {
            let outcome = Outcome::noted("Waiting for top piston to connect");
            if sensors.actuator_at(ActuatorRole::Top, motion.top_connect_limit) {
                (Step::Advance, outcome)
            } else {
                (Step::Hold, outcome)
            }
        }
        9 => {
            let mut outcome = Outcome::noted("Disengaging grab merge block");
            outcome.push(Action::SetCoupler {
                coupler: CouplerRole::Grab,
                enabled: false,
            });
            (Step::Advance, outcome)
        }
        10 => {
            let mut outcome = Outcome::noted("Extending top piston deeper");
            outcome.push(Action::Extend {
                actuator: ActuatorRole::Top,
                limit: motion.top_extend_limit,
                speed: motion.top_speed,
            });
            (Step::Advance, outcome)
        }
        11 => {
            let outcome = Outcome::noted("Waiting for top piston to extend");
            if sensors.actuator_at(ActuatorRole::Top, motion.top_extend_limit) {
                (Step::Advance, outcome)
            } else {
                (Step::Hold, outcome)
            }
        }
        12 => {
            let mut outcome = Outcome::noted("Reconnecting grab merge block");
            outcome.push(Action::SetCoupler {
                coupler: CouplerRole::Grab,
                enabled: true,
            });
            (Step::Advance, outcome)
        }
        _ => (
            Step::Enter(Phase::PrintConveyor),
            Outcome::noted("Restarting conveyor cycle"),
        ),
    }
}
