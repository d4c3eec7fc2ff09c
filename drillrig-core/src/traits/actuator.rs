//! Linear actuator trait
//!
//! A linear actuator (piston) extends or retracts along one axis. The
//! controller commands a velocity and an upper travel limit; position is
//! reported back by the hardware.

/// Linear actuator with position feedback
pub trait LinearActuator {
    /// Device name as registered
    fn name(&self) -> &str;

    /// Current extension in metres
    fn position(&self) -> f32;

    /// Commanded velocity in m/s
    ///
    /// Positive extends, negative retracts.
    fn velocity(&self) -> f32;

    /// Set the commanded velocity in m/s
    fn set_velocity(&mut self, velocity: f32);

    /// Upper travel limit in metres
    fn max_limit(&self) -> f32;

    /// Set the upper travel limit in metres
    fn set_max_limit(&mut self, limit: f32);

    /// Check if the actuator is moving outward
    fn is_extending(&self) -> bool {
        self.velocity() > 0.0
    }
}
