//! Device facade
//!
//! Typed pass-through over the device registry. Each operation looks the
//! device up by name, applies the setpoint, and writes exactly one status
//! line. A name that does not resolve is reported and otherwise ignored:
//! commands become no-ops and queries answer `false`, so a missing device
//! stalls the guard that depends on it instead of failing the tick.

use core::fmt::{self, Write};

use crate::config::{
    within_tolerance, ActuatorRole, CouplerRole, DeviceNames, FabricatorRole, RigConfig,
};
use crate::sequencer::{Action, SensorView};
use crate::status::log::LogLine;
use crate::traits::{DeviceRegistry, StatusSink};

/// Registry plus status sink
#[derive(Debug)]
pub struct DeviceFacade<R, S> {
    registry: R,
    sink: S,
}

impl<R: DeviceRegistry, S: StatusSink> DeviceFacade<R, S> {
    /// Wrap a registry and a sink
    pub fn new(registry: R, sink: S) -> Self {
        Self { registry, sink }
    }

    /// Access the registry
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Mutable access to the registry
    pub fn registry_mut(&mut self) -> &mut R {
        &mut self.registry
    }

    /// Access the status sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the status sink
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Take the registry and sink back
    pub fn into_parts(self) -> (R, S) {
        (self.registry, self.sink)
    }

    /// Write one formatted status line
    ///
    /// Output past the line length is dropped.
    pub fn report(&mut self, args: fmt::Arguments<'_>) {
        let mut line = LogLine::new();
        let _ = line.write_fmt(args);
        self.sink.write_line(&line);
    }

    /// Extend an actuator up to `limit` at `speed`
    pub fn extend_actuator(&mut self, name: &str, limit: f32, speed: f32) {
        match self.registry.actuator(name) {
            Some(actuator) => {
                actuator.set_max_limit(limit);
                actuator.set_velocity(speed);
                self.report(format_args!(
                    "Extending piston {} to {}m at {}m/s",
                    name, limit, speed
                ));
            }
            None => self.missing("Piston", name),
        }
    }

    /// Retract an actuator at `speed`
    pub fn retract_actuator(&mut self, name: &str, speed: f32) {
        match self.registry.actuator(name) {
            Some(actuator) => {
                actuator.set_velocity(-speed);
                self.report(format_args!("Retracting piston {} at {}m/s", name, speed));
            }
            None => self.missing("Piston", name),
        }
    }

    /// Check if an actuator is within `tolerance` of `limit`
    pub fn is_actuator_at_limit(&mut self, name: &str, limit: f32, tolerance: f32) -> bool {
        let position = match self.registry.actuator(name) {
            Some(actuator) => actuator.position(),
            None => {
                self.missing("Piston", name);
                return false;
            }
        };
        let reached = within_tolerance(position, limit, tolerance);
        self.report(format_args!(
            "Piston {} at {}m, target {}m: {}",
            name,
            position,
            limit,
            if reached { "reached" } else { "moving" }
        ));
        reached
    }

    /// Check if a coupler is free of its partner
    ///
    /// True when the coupler is *not* physically connected.
    pub fn is_coupler_detachable(&mut self, name: &str) -> bool {
        let connected = match self.registry.coupler(name) {
            Some(coupler) => coupler.is_connected(),
            None => {
                self.missing("Merge block", name);
                return false;
            }
        };
        self.report(format_args!(
            "Merge block {} is {}",
            name,
            if connected { "locked" } else { "free" }
        ));
        !connected
    }

    /// Enable or disable a coupler
    pub fn set_coupler(&mut self, name: &str, enabled: bool) {
        match self.registry.coupler(name) {
            Some(coupler) => {
                coupler.set_enabled(enabled);
                self.report(format_args!(
                    "Merge block {} is now {}",
                    name,
                    on_off(enabled)
                ));
            }
            None => self.missing("Merge block", name),
        }
    }

    /// Check if a fabricator is projecting with nothing left to build
    pub fn is_fabrication_complete(&mut self, name: &str) -> bool {
        let complete = match self.registry.fabricator(name) {
            Some(fabricator) => fabricator.is_complete(),
            None => {
                self.missing("Projector", name);
                return false;
            }
        };
        self.report(format_args!(
            "Projection on {} is complete: {}",
            name, complete
        ));
        complete
    }

    /// Enable or disable a fabricator
    pub fn set_fabricator_active(&mut self, name: &str, enabled: bool) {
        match self.registry.fabricator(name) {
            Some(fabricator) => {
                fabricator.set_enabled(enabled);
                self.report(format_args!("Projector {} is now {}", name, on_off(enabled)));
            }
            None => self.missing("Projector", name),
        }
    }

    /// Enable or disable every welder in a group
    ///
    /// Non-welder members are skipped.
    pub fn set_tool_group_active(&mut self, name: &str, enabled: bool) {
        match self.registry.tool_group(name) {
            Some(group) => {
                let toggled = group.set_tools_enabled(enabled);
                self.report(format_args!(
                    "Welders in group {} are now {} ({})",
                    name,
                    on_off(enabled),
                    toggled
                ));
            }
            None => self.report(format_args!("No group found with name {}", name)),
        }
    }

    /// Issue one sequencer action against the configured devices
    pub fn apply(&mut self, names: &DeviceNames, action: &Action) {
        match *action {
            Action::Extend {
                actuator,
                limit,
                speed,
            } => self.extend_actuator(names.actuator(actuator), limit, speed),
            Action::Retract { actuator, speed } => {
                self.retract_actuator(names.actuator(actuator), speed)
            }
            Action::SetCoupler { coupler, enabled } => {
                self.set_coupler(names.coupler(coupler), enabled)
            }
            Action::SetFabricator {
                fabricator,
                enabled,
            } => self.set_fabricator_active(names.fabricator(fabricator), enabled),
            Action::SetTools { enabled } => {
                self.set_tool_group_active(names.tool_group.as_str(), enabled)
            }
        }
    }

    /// Answer sequencer guards from the configured devices
    pub fn sensors<'a>(&'a mut self, config: &'a RigConfig) -> RigSensors<'a, R, S> {
        RigSensors {
            facade: self,
            config,
        }
    }

    fn missing(&mut self, what: &str, name: &str) {
        self.report(format_args!("{} {} not found", what, name));
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "enabled"
    } else {
        "disabled"
    }
}

/// [`SensorView`] backed by real devices
pub struct RigSensors<'a, R, S> {
    facade: &'a mut DeviceFacade<R, S>,
    config: &'a RigConfig,
}

impl<R: DeviceRegistry, S: StatusSink> SensorView for RigSensors<'_, R, S> {
    fn actuator_at(&mut self, actuator: ActuatorRole, limit: f32) -> bool {
        let name = self.config.devices.actuator(actuator);
        self.facade
            .is_actuator_at_limit(name, limit, self.config.motion.limit_epsilon)
    }

    fn coupler_detachable(&mut self, coupler: CouplerRole) -> bool {
        let name = self.config.devices.coupler(coupler);
        self.facade.is_coupler_detachable(name)
    }

    fn fabrication_complete(&mut self, fabricator: FabricatorRole) -> bool {
        let name = self.config.devices.fabricator(fabricator);
        self.facade.is_fabrication_complete(name)
    }
}
