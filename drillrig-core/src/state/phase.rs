//! Rig phases

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Length of the drill section program
pub const DRILL_STEPS: u8 = 5;

/// Length of the conveyor section program
pub const CONVEYOR_STEPS: u8 = 13;

/// Rig phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Phase {
    /// Nothing to do
    #[default]
    Idle,
    /// Printing and attaching the drill head section
    PrintDrill,
    /// Printing conveyor sections and pushing the string down (loops)
    PrintConveyor,
    /// Pulling the top piston back and parking the couplers
    Retract,
    /// Sequence finished, everything is shut down on the next tick
    Complete,
}

impl Phase {
    /// Name shown in the status header
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Idle => "Idle",
            Phase::PrintDrill => "Print drill",
            Phase::PrintConveyor => "Print conveyor",
            Phase::Retract => "Retract",
            Phase::Complete => "Complete",
        }
    }

    /// Number of steps in this phase's program
    ///
    /// Single-action phases have no steps.
    pub fn step_count(&self) -> u8 {
        match self {
            Phase::PrintDrill => DRILL_STEPS,
            Phase::PrintConveyor => CONVEYOR_STEPS,
            Phase::Idle | Phase::Retract | Phase::Complete => 0,
        }
    }

    /// Check if this phase drives hardware
    pub fn is_running(&self) -> bool {
        !matches!(self, Phase::Idle)
    }
}
