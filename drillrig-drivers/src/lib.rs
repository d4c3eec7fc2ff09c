//! Simulated device implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in drillrig-core, backed by a simple kinematic simulation:
//!
//! - Pistons (velocity integration with travel limits)
//! - Merge blocks (scripted connection state)
//! - Projectors (blueprint with units consumed by welding)
//! - Welder groups (mixed block kinds)
//! - A named registry tying them together

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod merge;
pub mod piston;
pub mod projector;
pub mod rig;
pub mod welder;

pub use merge::SimMergeBlock;
pub use piston::{SimPiston, SimPistonConfig};
pub use projector::SimProjector;
pub use rig::{SimRig, SimRigConfig};
pub use welder::{SimBlock, SimWelderGroup, MAX_GROUP_MEMBERS};
