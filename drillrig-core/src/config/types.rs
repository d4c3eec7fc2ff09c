//! Configuration type definitions
//!
//! Defaults match the installed rig. Every struct deserializes with
//! missing fields falling back to these defaults.

use core::fmt;

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::traits::DeviceKind;

/// Maximum device name length
pub const MAX_NAME_LEN: usize = 32;

/// Device name as stored in the configuration
pub type DeviceName = String<MAX_NAME_LEN>;

/// Build a device name, leaving it empty if it does not fit
pub fn device_name(name: &str) -> DeviceName {
    let mut s = String::new();
    let _ = s.push_str(name);
    s
}

/// Linear actuators driven by the sequencer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ActuatorRole {
    /// Pushes the drill string down
    Top,
    /// Holds the string while the top piston resets
    Grab,
}

/// Couplers driven by the sequencer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CouplerRole {
    /// Coupler on the top piston head
    Top,
    /// Coupler on the grab piston head
    Grab,
}

/// Fabricators driven by the sequencer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FabricatorRole {
    /// Projects the drill head section
    Drill,
    /// Projects conveyor sections
    Conveyor,
}

/// Role to device name mapping
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DeviceNames {
    pub top_actuator: DeviceName,
    pub grab_actuator: DeviceName,
    pub tool_group: DeviceName,
    pub drill_fabricator: DeviceName,
    pub conveyor_fabricator: DeviceName,
    pub top_coupler: DeviceName,
    pub grab_coupler: DeviceName,
    pub display: DeviceName,
}

impl Default for DeviceNames {
    fn default() -> Self {
        Self {
            top_actuator: device_name("[MINE] Piston Top"),
            grab_actuator: device_name("[MINE] Piston Grab"),
            tool_group: device_name("[MINE] Welder Top"),
            drill_fabricator: device_name("[MINE] Projector Top"),
            conveyor_fabricator: device_name("[MINE] Projector Conveyor"),
            top_coupler: device_name("[MINE] Merge Top"),
            grab_coupler: device_name("[MINE] Merge Grab"),
            display: device_name("[MINE] LCD Screen"),
        }
    }
}

impl DeviceNames {
    /// Name of the actuator playing `role`
    pub fn actuator(&self, role: ActuatorRole) -> &str {
        match role {
            ActuatorRole::Top => self.top_actuator.as_str(),
            ActuatorRole::Grab => self.grab_actuator.as_str(),
        }
    }

    /// Name of the coupler playing `role`
    pub fn coupler(&self, role: CouplerRole) -> &str {
        match role {
            CouplerRole::Top => self.top_coupler.as_str(),
            CouplerRole::Grab => self.grab_coupler.as_str(),
        }
    }

    /// Name of the fabricator playing `role`
    pub fn fabricator(&self, role: FabricatorRole) -> &str {
        match role {
            FabricatorRole::Drill => self.drill_fabricator.as_str(),
            FabricatorRole::Conveyor => self.conveyor_fabricator.as_str(),
        }
    }

    /// Every configured device with the kind it must resolve to
    pub fn required(&self) -> [(DeviceKind, &str); 8] {
        [
            (DeviceKind::Actuator, self.top_actuator.as_str()),
            (DeviceKind::Actuator, self.grab_actuator.as_str()),
            (DeviceKind::ToolGroup, self.tool_group.as_str()),
            (DeviceKind::Fabricator, self.drill_fabricator.as_str()),
            (DeviceKind::Fabricator, self.conveyor_fabricator.as_str()),
            (DeviceKind::Coupler, self.top_coupler.as_str()),
            (DeviceKind::Coupler, self.grab_coupler.as_str()),
            (DeviceKind::Display, self.display.as_str()),
        ]
    }
}

/// Motion setpoints (metres and metres per second)
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MotionConfig {
    /// Top piston speed for repositioning
    pub top_speed: f32,
    /// Grab piston extend speed
    pub grab_speed: f32,
    /// Top piston retract speed
    pub retract_speed: f32,
    /// Top piston speed while pushing the string into rock
    pub drill_speed: f32,
    /// Top piston full extension
    pub top_extend_limit: f32,
    /// Top piston position where a new section meets the string
    pub top_connect_limit: f32,
    /// Grab piston extension where it holds the string
    pub grab_extend_limit: f32,
    /// Tolerance for "actuator at limit"
    pub limit_epsilon: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            top_speed: 5.0,
            grab_speed: 2.0,
            retract_speed: 5.0,
            drill_speed: 0.1,
            top_extend_limit: 9.9,
            top_connect_limit: 2.5,
            grab_extend_limit: 2.3,
            limit_epsilon: 0.01,
        }
    }
}

impl MotionConfig {
    /// Check if `position` is within tolerance of `limit`
    pub fn at_limit(&self, position: f32, limit: f32) -> bool {
        within_tolerance(position, limit, self.limit_epsilon)
    }
}

/// `|position - limit| <= tolerance`
pub fn within_tolerance(position: f32, limit: f32, tolerance: f32) -> bool {
    let diff = position - limit;
    diff <= tolerance && diff >= -tolerance
}

/// Sequencing options
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SequenceConfig {
    /// Fabricator polled (and shut off on failure) while waiting for the
    /// drill section to finish
    ///
    /// The drill program enables the drill fabricator but the installed
    /// rig has always polled the conveyor fabricator here, so that stays
    /// the default until the wiring is confirmed.
    pub drill_section_check: FabricatorRole,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            drill_section_check: FabricatorRole::Conveyor,
        }
    }
}

/// Complete rig configuration
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RigConfig {
    pub devices: DeviceNames,
    pub motion: MotionConfig,
    pub sequence: SequenceConfig,
}

/// Configuration validation error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A speed is zero or negative
    InvalidSpeed(&'static str),
    /// A travel limit is negative
    InvalidLimit(&'static str),
    /// Limit tolerance is negative
    InvalidEpsilon,
    /// A device name is empty (or was too long to store)
    EmptyName(DeviceKind),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidSpeed(field) => write!(f, "{} must be positive", field),
            ConfigError::InvalidLimit(field) => write!(f, "{} must not be negative", field),
            ConfigError::InvalidEpsilon => write!(f, "limit_epsilon must not be negative"),
            ConfigError::EmptyName(kind) => write!(f, "empty {} name", kind.as_str()),
        }
    }
}

impl RigConfig {
    /// Validate setpoints and names
    pub fn validate(&self) -> Result<(), ConfigError> {
        let m = &self.motion;
        let speeds = [
            ("top_speed", m.top_speed),
            ("grab_speed", m.grab_speed),
            ("retract_speed", m.retract_speed),
            ("drill_speed", m.drill_speed),
        ];
        for (field, speed) in speeds {
            // NaN fails this check too
            if !(speed > 0.0) {
                return Err(ConfigError::InvalidSpeed(field));
            }
        }

        let limits = [
            ("top_extend_limit", m.top_extend_limit),
            ("top_connect_limit", m.top_connect_limit),
            ("grab_extend_limit", m.grab_extend_limit),
        ];
        for (field, limit) in limits {
            if !(limit >= 0.0) {
                return Err(ConfigError::InvalidLimit(field));
            }
        }

        if !(m.limit_epsilon >= 0.0) {
            return Err(ConfigError::InvalidEpsilon);
        }

        for (kind, name) in self.devices.required() {
            if name.is_empty() {
                return Err(ConfigError::EmptyName(kind));
            }
        }

        Ok(())
    }
}
