//! Simulated projector
//!
//! While enabled the projector shows a blueprint of `blueprint_units`
//! pieces. Welding consumes pieces; fractional progress carries over
//! between updates.

use drillrig_core::config::DeviceName;
use drillrig_core::traits::Fabricator;

/// Simulated projector
#[derive(Debug, Clone)]
pub struct SimProjector {
    name: DeviceName,
    enabled: bool,
    blueprint_units: u32,
    remaining: u32,
    progress: f32,
}

impl SimProjector {
    /// Create a disabled projector with a fresh blueprint
    pub fn new(name: DeviceName, blueprint_units: u32) -> Self {
        Self {
            name,
            enabled: false,
            blueprint_units,
            remaining: blueprint_units,
            progress: 0.0,
        }
    }

    /// Start a new copy of the blueprint
    pub fn reload(&mut self) {
        self.remaining = self.blueprint_units;
        self.progress = 0.0;
    }

    /// Apply `amount` units of welding work
    ///
    /// Does nothing unless the projector is enabled.
    pub fn weld(&mut self, amount: f32) {
        if !self.is_projecting() || self.remaining == 0 {
            return;
        }
        self.progress += amount;
        while self.progress >= 1.0 && self.remaining > 0 {
            self.progress -= 1.0;
            self.remaining -= 1;
        }
        if self.remaining == 0 {
            self.progress = 0.0;
        }
    }
}

impl Fabricator for SimProjector {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_projecting(&self) -> bool {
        self.enabled && self.blueprint_units > 0
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
