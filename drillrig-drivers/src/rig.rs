//! Simulated rig
//!
//! Owns one simulated device per configured role and resolves them by
//! name. [`SimRig::step`] advances the physics:
//!
//! - pistons move by their commanded velocity
//! - enabled projectors are built up while welders are on
//! - releasing the grab merge block pushes the finished section away, so
//!   both projectors start a fresh copy of their blueprint
//!
//! Merge block links are not simulated; drive them with
//! [`SimMergeBlock::set_linked`].

use drillrig_core::config::{device_name, DeviceNames};
use drillrig_core::traits::{
    Coupler, DeviceRegistry, Fabricator, LinearActuator, ToolGroup,
};

use crate::merge::SimMergeBlock;
use crate::piston::{SimPiston, SimPistonConfig};
use crate::projector::SimProjector;
use crate::welder::{SimBlock, SimWelderGroup};

/// Simulation parameters
#[derive(Debug, Clone)]
pub struct SimRigConfig {
    /// Geometry shared by both pistons
    pub piston: SimPistonConfig,
    /// Pieces in the drill head blueprint
    pub drill_units: u32,
    /// Pieces in the conveyor section blueprint
    pub conveyor_units: u32,
    /// Pieces built per second by each active welder
    pub weld_rate: f32,
    /// Welders in the group
    pub welders: usize,
}

impl Default for SimRigConfig {
    fn default() -> Self {
        Self {
            piston: SimPistonConfig::default(),
            drill_units: 12,
            conveyor_units: 8,
            weld_rate: 1.0,
            welders: 4,
        }
    }
}

/// Simulated rig
#[derive(Debug, Clone)]
pub struct SimRig {
    names: DeviceNames,
    weld_rate: f32,
    pub top_piston: SimPiston,
    pub grab_piston: SimPiston,
    pub top_merge: SimMergeBlock,
    pub grab_merge: SimMergeBlock,
    pub drill_projector: SimProjector,
    pub conveyor_projector: SimProjector,
    pub welders: SimWelderGroup,
    /// Grab merge enable state at the previous step
    grab_was_enabled: bool,
    /// Display is installed
    pub display: bool,
}

impl SimRig {
    /// Build every device named in `names`
    pub fn new(names: &DeviceNames, config: &SimRigConfig) -> Self {
        let mut blocks = [SimBlock::welder(); crate::welder::MAX_GROUP_MEMBERS];
        let welders = config.welders.min(blocks.len().saturating_sub(1));
        // One non-tool block rides along in the group
        blocks[welders] = SimBlock::other();

        Self {
            names: names.clone(),
            weld_rate: config.weld_rate,
            top_piston: SimPiston::new(names.top_actuator.clone(), config.piston.clone()),
            grab_piston: SimPiston::new(names.grab_actuator.clone(), config.piston.clone()),
            top_merge: SimMergeBlock::new(names.top_coupler.clone()),
            grab_merge: SimMergeBlock::new(names.grab_coupler.clone()),
            drill_projector: SimProjector::new(names.drill_fabricator.clone(), config.drill_units),
            conveyor_projector: SimProjector::new(
                names.conveyor_fabricator.clone(),
                config.conveyor_units,
            ),
            welders: SimWelderGroup::new(names.tool_group.clone(), &blocks[..=welders]),
            grab_was_enabled: false,
            display: true,
        }
    }

    /// Rig built with default names and parameters
    pub fn with_defaults() -> Self {
        Self::new(&DeviceNames::default(), &SimRigConfig::default())
    }

    /// Remove the display (for startup failure scenarios)
    pub fn without_display(mut self) -> Self {
        self.display = false;
        self.names.display = device_name("");
        self
    }

    /// Advance the simulation by `dt_s` seconds
    pub fn step(&mut self, dt_s: f32) {
        self.top_piston.update(dt_s);
        self.grab_piston.update(dt_s);

        let work = self.welders.active_welders() as f32 * self.weld_rate * dt_s;
        if work > 0.0 {
            self.drill_projector.weld(work);
            self.conveyor_projector.weld(work);
        }

        let grab_enabled = self.grab_merge.is_enabled();
        if self.grab_was_enabled && !grab_enabled {
            self.drill_projector.reload();
            self.conveyor_projector.reload();
        }
        self.grab_was_enabled = grab_enabled;
    }
}

impl DeviceRegistry for SimRig {
    fn actuator(&mut self, name: &str) -> Option<&mut dyn LinearActuator> {
        if self.top_piston.name() == name {
            Some(&mut self.top_piston)
        } else if self.grab_piston.name() == name {
            Some(&mut self.grab_piston)
        } else {
            None
        }
    }

    fn coupler(&mut self, name: &str) -> Option<&mut dyn Coupler> {
        if self.top_merge.name() == name {
            Some(&mut self.top_merge)
        } else if self.grab_merge.name() == name {
            Some(&mut self.grab_merge)
        } else {
            None
        }
    }

    fn fabricator(&mut self, name: &str) -> Option<&mut dyn Fabricator> {
        if self.drill_projector.name() == name {
            Some(&mut self.drill_projector)
        } else if self.conveyor_projector.name() == name {
            Some(&mut self.conveyor_projector)
        } else {
            None
        }
    }

    fn tool_group(&mut self, name: &str) -> Option<&mut dyn ToolGroup> {
        if self.welders.name() == name {
            Some(&mut self.welders)
        } else {
            None
        }
    }

    fn has_display(&self, name: &str) -> bool {
        self.display && self.names.display.as_str() == name
    }
}
