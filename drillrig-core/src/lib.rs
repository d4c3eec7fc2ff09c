//! Board-agnostic core logic for the drilling rig controller
//!
//! This crate contains all sequencing logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (actuator, coupler, fabricator, tool group)
//! - Phase and command definitions
//! - Phase sequencer (the step-indexed state machine)
//! - Device facade (typed pass-through with status reporting)
//! - Bounded status log
//! - Tick-driven controller that dispatches commands
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod facade;
pub mod sequencer;
pub mod state;
pub mod status;
pub mod traits;

#[cfg(test)]
mod testing;

pub use controller::{Controller, RigError};
