//! Simulated merge block
//!
//! The physical link is scripted by whoever drives the simulation; the
//! block only reports it while enabled.

use drillrig_core::config::DeviceName;
use drillrig_core::traits::Coupler;

/// Simulated merge block
#[derive(Debug, Clone)]
pub struct SimMergeBlock {
    name: DeviceName,
    enabled: bool,
    linked: bool,
}

impl SimMergeBlock {
    /// Create a disabled, unlinked block
    pub fn new(name: DeviceName) -> Self {
        Self {
            name,
            enabled: false,
            linked: false,
        }
    }

    /// Set whether a partner is in place and locked
    pub fn set_linked(&mut self, linked: bool) {
        self.linked = linked;
    }

    /// Partner is in place, regardless of enable state
    pub fn is_linked(&self) -> bool {
        self.linked
    }
}

impl Coupler for SimMergeBlock {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_connected(&self) -> bool {
        self.enabled && self.linked
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}
