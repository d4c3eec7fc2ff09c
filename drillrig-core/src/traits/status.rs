//! Status reporting trait

use crate::state::Phase;

/// Fixed status fields shown above the scrolling log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusHeader {
    /// Active phase
    pub phase: Phase,
    /// Step index within the phase
    pub step: u8,
    /// A sequence is in progress
    pub running: bool,
}

impl Default for StatusHeader {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            step: 0,
            running: false,
        }
    }
}

/// Append-only sink for human-readable status lines
pub trait StatusSink {
    /// Append one line
    fn write_line(&mut self, line: &str);

    /// Clear accumulated lines, keeping the header
    fn reset(&mut self);

    /// Update the header fields
    fn set_header(&mut self, header: StatusHeader);
}
