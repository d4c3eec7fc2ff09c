//! Tool group trait
//!
//! A tool group is a named, unordered collection of blocks. Only members
//! of the tool kind respond to toggling; everything else in the group is
//! left alone.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Kind of a block inside a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MemberKind {
    /// Welding tool
    #[default]
    Welder,
    /// Any other block (lights, sensors, ...)
    Other,
}

/// A single block inside a tool group
pub trait GroupMember {
    /// What kind of block this is
    fn kind(&self) -> MemberKind;

    /// Commanded state
    fn is_enabled(&self) -> bool;

    /// Enable or disable the block
    fn set_enabled(&mut self, enabled: bool);
}

/// Named collection of blocks toggled together
pub trait ToolGroup {
    /// Group name as registered
    fn name(&self) -> &str;

    /// Number of members in the group
    fn member_count(&self) -> usize;

    /// Access a member by index
    fn member_mut(&mut self, index: usize) -> Option<&mut dyn GroupMember>;

    /// Enable or disable every welder in the group
    ///
    /// Returns the number of members that were toggled.
    fn set_tools_enabled(&mut self, enabled: bool) -> usize {
        let mut toggled = 0;
        for i in 0..self.member_count() {
            if let Some(member) = self.member_mut(i) {
                if member.kind() == MemberKind::Welder {
                    member.set_enabled(enabled);
                    toggled += 1;
                }
            }
        }
        toggled
    }
}
