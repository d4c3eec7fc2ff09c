//! Phase and command definitions
//!
//! Exactly one phase is active at a time. Phases only change through the
//! sequencer or through an external command.

pub mod command;
pub mod phase;

pub use command::Command;
pub use phase::Phase;
