//! Device registry trait
//!
//! The registry owns every device. Lookups are by name and may fail; an
//! absent device is not an error at this level, callers decide what an
//! absent device means.

use super::{Coupler, Fabricator, LinearActuator, ToolGroup};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Kind of device a name is expected to resolve to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DeviceKind {
    Actuator,
    Coupler,
    Fabricator,
    ToolGroup,
    Display,
}

impl DeviceKind {
    /// Human-readable kind name
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceKind::Actuator => "actuator",
            DeviceKind::Coupler => "coupler",
            DeviceKind::Fabricator => "fabricator",
            DeviceKind::ToolGroup => "tool group",
            DeviceKind::Display => "display",
        }
    }
}

/// Name-based access to the rig's devices
pub trait DeviceRegistry {
    /// Look up a linear actuator
    fn actuator(&mut self, name: &str) -> Option<&mut dyn LinearActuator>;

    /// Look up a coupler
    fn coupler(&mut self, name: &str) -> Option<&mut dyn Coupler>;

    /// Look up a fabricator
    fn fabricator(&mut self, name: &str) -> Option<&mut dyn Fabricator>;

    /// Look up a tool group
    fn tool_group(&mut self, name: &str) -> Option<&mut dyn ToolGroup>;

    /// Check whether a display with this name exists
    fn has_display(&self, name: &str) -> bool;

    /// Check whether `name` resolves to a device of `kind`
    fn contains(&mut self, kind: DeviceKind, name: &str) -> bool {
        match kind {
            DeviceKind::Actuator => self.actuator(name).is_some(),
            DeviceKind::Coupler => self.coupler(name).is_some(),
            DeviceKind::Fabricator => self.fabricator(name).is_some(),
            DeviceKind::ToolGroup => self.tool_group(name).is_some(),
            DeviceKind::Display => self.has_display(name),
        }
    }
}
