//! Configuration types
//!
//! Board-agnostic rig configuration: which named devices play which role,
//! and the motion setpoints used by the sequencer.

pub mod types;

pub use types::*;
