//! Coupler (merge block) trait

/// A mating connector that can be commanded on/off and reports whether it
/// is physically locked to its partner
pub trait Coupler {
    /// Device name as registered
    fn name(&self) -> &str;

    /// Physically mated with its partner
    fn is_connected(&self) -> bool;

    /// Commanded state
    fn is_enabled(&self) -> bool;

    /// Enable or disable the coupler
    fn set_enabled(&mut self, enabled: bool);
}
