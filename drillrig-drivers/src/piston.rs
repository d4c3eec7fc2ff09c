//! Simulated piston
//!
//! Position is integrated from the commanded velocity on every
//! [`SimPiston::update`] and clamped to `[min_position, max_limit]`, with
//! `max_limit` itself capped by the physical travel.
//!
//! ```ignore
//! let mut piston = SimPiston::new(device_name("Piston"), SimPistonConfig::default());
//! piston.set_max_limit(2.5);
//! piston.set_velocity(1.0);
//! piston.update(3.0); // parked at 2.5
//! ```

use drillrig_core::config::DeviceName;
use drillrig_core::traits::LinearActuator;

/// Piston geometry
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SimPistonConfig {
    /// Fully retracted position (m)
    pub min_position: f32,
    /// Physical travel (m); limits above this are capped
    pub travel: f32,
}

impl Default for SimPistonConfig {
    fn default() -> Self {
        Self {
            min_position: 0.0,
            travel: 10.0,
        }
    }
}

/// Simulated piston
#[derive(Debug, Clone)]
pub struct SimPiston {
    name: DeviceName,
    config: SimPistonConfig,
    position: f32,
    velocity: f32,
    max_limit: f32,
}

impl SimPiston {
    /// Create a retracted, stopped piston
    pub fn new(name: DeviceName, config: SimPistonConfig) -> Self {
        Self {
            name,
            position: config.min_position,
            velocity: 0.0,
            max_limit: config.travel,
            config,
        }
    }

    /// Place the piston at `position` (clamped to travel)
    pub fn set_position(&mut self, position: f32) {
        self.position = position.clamp(self.config.min_position, self.config.travel);
    }

    /// Upper bound actually enforced
    fn upper(&self) -> f32 {
        self.max_limit.min(self.config.travel)
    }

    /// Advance the simulation by `dt_s` seconds
    pub fn update(&mut self, dt_s: f32) {
        let upper = self.upper();
        let next = self.position + self.velocity * dt_s;
        self.position = next.clamp(self.config.min_position, upper.max(self.config.min_position));
    }

    /// Check if the piston can move no further in its commanded direction
    pub fn is_parked(&self) -> bool {
        if self.velocity > 0.0 {
            self.position >= self.upper()
        } else if self.velocity < 0.0 {
            self.position <= self.config.min_position
        } else {
            true
        }
    }
}

impl LinearActuator for SimPiston {
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
        self.max_limit = limit.clamp(self.config.min_position, self.config.travel);
    }
}
