//! Fabricator (projector) trait

/// A device that lays out a structure which is then built up piece by
/// piece by the tool group
pub trait Fabricator {
    /// Device name as registered
    fn name(&self) -> &str;

    /// A blueprint is currently projected
    fn is_projecting(&self) -> bool;

    /// Work units still to be built
    fn remaining_units(&self) -> u32;

    /// Commanded state
    fn is_enabled(&self) -> bool;

    /// Enable or disable the fabricator
    fn set_enabled(&mut self, enabled: bool);

    /// Projection is active and nothing is left to build
    fn is_complete(&self) -> bool {
        self.is_projecting() && self.remaining_units() == 0
    }
}
