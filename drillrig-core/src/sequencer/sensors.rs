//! Read side of the sequencer
//!
//! The sequencer asks only the questions its current step needs, so reads
//! happen lazily through [`SensorView`]. At runtime the device facade
//! answers them; [`SensorSnapshot`] answers them from fixed values.

use crate::config::{ActuatorRole, CouplerRole, FabricatorRole, MotionConfig};

/// Sensor queries used by step guards
pub trait SensorView {
    /// Actuator is within tolerance of `limit`
    fn actuator_at(&mut self, actuator: ActuatorRole, limit: f32) -> bool;

    /// Coupler is *not* physically connected
    ///
    /// The drill program treats this as "the drill string is already held".
    fn coupler_detachable(&mut self, coupler: CouplerRole) -> bool;

    /// Fabricator is projecting with nothing left to build
    fn fabrication_complete(&mut self, fabricator: FabricatorRole) -> bool;
}

/// Fixed sensor values
#[derive(Debug, Clone, PartialEq)]
pub struct SensorSnapshot {
    pub top_position: f32,
    pub grab_position: f32,
    pub top_coupler_connected: bool,
    pub grab_coupler_connected: bool,
    pub drill_complete: bool,
    pub conveyor_complete: bool,
    /// Tolerance used for limit checks
    pub motion: MotionConfig,
}

impl Default for SensorSnapshot {
    fn default() -> Self {
        Self {
            top_position: 0.0,
            grab_position: 0.0,
            top_coupler_connected: false,
            grab_coupler_connected: false,
            drill_complete: false,
            conveyor_complete: false,
            motion: MotionConfig::default(),
        }
    }
}

impl SensorView for SensorSnapshot {
    fn actuator_at(&mut self, actuator: ActuatorRole, limit: f32) -> bool {
        let position = match actuator {
            ActuatorRole::Top => self.top_position,
            ActuatorRole::Grab => self.grab_position,
        };
        self.motion.at_limit(position, limit)
    }

    fn coupler_detachable(&mut self, coupler: CouplerRole) -> bool {
        match coupler {
            CouplerRole::Top => !self.top_coupler_connected,
            CouplerRole::Grab => !self.grab_coupler_connected,
        }
    }

    fn fabrication_complete(&mut self, fabricator: FabricatorRole) -> bool {
        match fabricator {
            FabricatorRole::Drill => self.drill_complete,
            FabricatorRole::Conveyor => self.conveyor_complete,
        }
    }
}
