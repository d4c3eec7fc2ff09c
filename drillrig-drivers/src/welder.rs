//! Simulated welder group

use drillrig_core::config::DeviceName;
use drillrig_core::traits::{GroupMember, MemberKind, ToolGroup};
use heapless::Vec;

/// Maximum blocks in a group
pub const MAX_GROUP_MEMBERS: usize = 16;

/// A block inside a group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SimBlock {
    pub kind: MemberKind,
    pub enabled: bool,
}

impl SimBlock {
    /// Disabled welder
    pub const fn welder() -> Self {
        Self {
            kind: MemberKind::Welder,
            enabled: false,
        }
    }

    /// Disabled non-tool block
    pub const fn other() -> Self {
        Self {
            kind: MemberKind::Other,
            enabled: false,
        }
    }
}

impl GroupMember for SimBlock {
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

/// Simulated group of blocks
#[derive(Debug, Clone)]
pub struct SimWelderGroup {
    name: DeviceName,
    members: Vec<SimBlock, MAX_GROUP_MEMBERS>,
}

impl SimWelderGroup {
    /// Create a group from its members (extra members are dropped)
    pub fn new(name: DeviceName, members: &[SimBlock]) -> Self {
        let mut group = Self {
            name,
            members: Vec::new(),
        };
        for member in members.iter().take(MAX_GROUP_MEMBERS) {
            let _ = group.members.push(*member);
        }
        group
    }

    /// All members
    pub fn members(&self) -> &[SimBlock] {
        &self.members
    }

    /// Number of enabled welders
    pub fn active_welders(&self) -> usize {
        self.members
            .iter()
            .filter(|m| m.kind == MemberKind::Welder && m.enabled)
            .count()
    }
}

impl ToolGroup for SimWelderGroup {
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
