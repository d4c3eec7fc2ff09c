//! Device actions produced by the sequencer

use heapless::Vec;

use crate::config::{ActuatorRole, CouplerRole, FabricatorRole, RigConfig};

/// Maximum actions issued in a single tick
pub const MAX_ACTIONS: usize = 4;

/// A single commanded setpoint
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Extend an actuator up to `limit` at `speed`
    Extend {
        actuator: ActuatorRole,
        limit: f32,
        speed: f32,
    },
    /// Retract an actuator at `speed`
    Retract { actuator: ActuatorRole, speed: f32 },
    /// Enable or disable a coupler
    SetCoupler { coupler: CouplerRole, enabled: bool },
    /// Enable or disable a fabricator
    SetFabricator {
        fabricator: FabricatorRole,
        enabled: bool,
    },
    /// Enable or disable the welders in the tool group
    SetTools { enabled: bool },
}

/// Result of one sequencer tick
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Outcome {
    /// Actions to issue, in order
    pub actions: Vec<Action, MAX_ACTIONS>,
    /// Status line describing the step that ran
    pub note: Option<&'static str>,
}

impl Outcome {
    /// Outcome with a note and no actions yet
    pub fn noted(note: &'static str) -> Self {
        Self {
            actions: Vec::new(),
            note: Some(note),
        }
    }

    /// Queue an action
    ///
    /// No step issues more than [`MAX_ACTIONS`] actions.
    pub fn push(&mut self, action: Action) {
        let _ = self.actions.push(action);
    }

    /// Check if any hardware was commanded
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Stop-all composite: both fabricators off, welders off, top piston back
pub fn stop_actions(config: &RigConfig) -> Outcome {
    let mut outcome = Outcome::noted("Stopping all systems");
    outcome.push(Action::SetFabricator {
        fabricator: FabricatorRole::Drill,
        enabled: false,
    });
    outcome.push(Action::SetFabricator {
        fabricator: FabricatorRole::Conveyor,
        enabled: false,
    });
    outcome.push(Action::SetTools { enabled: false });
    outcome.push(Action::Retract {
        actuator: ActuatorRole::Top,
        speed: config.motion.retract_speed,
    });
    outcome
}
