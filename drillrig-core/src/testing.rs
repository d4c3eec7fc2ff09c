//! In-memory devices for unit tests

use std::string::String;
use std::vec::Vec;

use crate::config::DeviceNames;
use crate::traits::{
    Coupler, DeviceRegistry, Fabricator, GroupMember, LinearActuator, MemberKind, ToolGroup,
};

#[derive(Debug, Default)]
pub struct FakeActuator {
    pub name: String,
    pub position: f32,
    pub velocity: f32,
    pub max_limit: f32,
}

impl LinearActuator for FakeActuator {
    fn name(&self) -> &str {
        &self.name
    }
    fn position(&self) -> f32 {
        self.position
    }
    fn velocity(&self) -> f32 {
        self.velocity
    }
    fn set_velocity(&mut self, velocity: f32) {
        self.velocity = velocity;
    }
    fn max_limit(&self) -> f32 {
        self.max_limit
    }
    fn set_max_limit(&mut self, limit: f32) {
        self.max_limit = limit;
    }
}

#[derive(Debug, Default)]
pub struct FakeCoupler {
    pub name: String,
    pub connected: bool,
    pub enabled: bool,
}

impl Coupler for FakeCoupler {
    fn name(&self) -> &str {
        &self.name
    }
    fn is_connected(&self) -> bool {
        self.connected
    }
    fn is_enabled(&self) -> bool {
        self.enabled
    }
    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

#[derive(Debug, Default)]
pub struct FakeFabricator {
    pub name: String,
    pub projecting: bool,
    pub remaining: u32,
    pub enabled: bool,
}

impl Fabricator for FakeFabricator {
    fn name(&self) -> &str {
        &self.name
    }
    fn is_projecting(&self) -> bool {
        self.projecting
    }
    fn remaining_units(&self) -> u32 {
        self.remaining
    }
    fn is_enabled(&self) -> bool {
        self.enabled
    }
    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

#[derive(Debug)]
pub struct FakeMember {
    pub kind: MemberKind,
    pub enabled: bool,
}

impl GroupMember for FakeMember {
    fn kind(&self) -> MemberKind {
        self.kind
    }
    fn is_enabled(&self) -> bool {
        self.enabled
    }
    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

#[derive(Debug, Default)]
pub struct FakeGroup {
    pub name: String,
    pub members: Vec<FakeMember>,
}

impl ToolGroup for FakeGroup {
    fn name(&self) -> &str {
        &self.name
    }
    fn member_count(&self) -> usize {
        self.members.len()
    }
    fn member_mut(&mut self, index: usize) -> Option<&mut dyn GroupMember> {
        self.members
            .get_mut(index)
            .map(|m| m as &mut dyn GroupMember)
    }
}

/// Every default-named device, with a list of names to hide
#[derive(Debug, Default)]
pub struct FakeRegistry {
    pub top: FakeActuator,
    pub grab: FakeActuator,
    pub top_merge: FakeCoupler,
    pub grab_merge: FakeCoupler,
    pub drill: FakeFabricator,
    pub conveyor: FakeFabricator,
    pub welders: FakeGroup,
    pub display: String,
    pub hidden: Vec<String>,
}

impl FakeRegistry {
    pub fn new() -> Self {
        let names = DeviceNames::default();
        let named = |s: &str| String::from(s);
        Self {
            top: FakeActuator {
                name: named(&names.top_actuator),
                ..Default::default()
            },
            grab: FakeActuator {
                name: named(&names.grab_actuator),
                ..Default::default()
            },
            top_merge: FakeCoupler {
                name: named(&names.top_coupler),
                ..Default::default()
            },
            grab_merge: FakeCoupler {
                name: named(&names.grab_coupler),
                ..Default::default()
            },
            drill: FakeFabricator {
                name: named(&names.drill_fabricator),
                ..Default::default()
            },
            conveyor: FakeFabricator {
                name: named(&names.conveyor_fabricator),
                ..Default::default()
            },
            welders: FakeGroup {
                name: named(&names.tool_group),
                members: vec![
                    FakeMember { kind: MemberKind::Welder, enabled: false },
                    FakeMember { kind: MemberKind::Other, enabled: false },
                    FakeMember { kind: MemberKind::Welder, enabled: false },
                ],
            },
            display: named(&names.display),
            hidden: Vec::new(),
        }
    }

    /// Make a device name stop resolving
    pub fn hide(&mut self, name: &str) {
        self.hidden.push(String::from(name));
    }

    fn visible(&self, name: &str) -> bool {
        !self.hidden.iter().any(|h| h == name)
    }
}

impl DeviceRegistry for FakeRegistry {
    fn actuator(&mut self, name: &str) -> Option<&mut dyn LinearActuator> {
        if !self.visible(name) {
            return None;
        }
        if self.top.name == name {
            Some(&mut self.top)
        } else if self.grab.name == name {
            Some(&mut self.grab)
        } else {
            None
        }
    }

    fn coupler(&mut self, name: &str) -> Option<&mut dyn Coupler> {
        if !self.visible(name) {
            return None;
        }
        if self.top_merge.name == name {
            Some(&mut self.top_merge)
        } else if self.grab_merge.name == name {
            Some(&mut self.grab_merge)
        } else {
            None
        }
    }

    fn fabricator(&mut self, name: &str) -> Option<&mut dyn Fabricator> {
        if !self.visible(name) {
            return None;
        }
        if self.drill.name == name {
            Some(&mut self.drill)
        } else if self.conveyor.name == name {
            Some(&mut self.conveyor)
        } else {
            None
        }
    }

    fn tool_group(&mut self, name: &str) -> Option<&mut dyn ToolGroup> {
        if self.visible(name) && self.welders.name == name {
            Some(&mut self.welders)
        } else {
            None
        }
    }

    fn has_display(&self, name: &str) -> bool {
        self.visible(name) && self.display == name
    }
}
