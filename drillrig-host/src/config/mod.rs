//! Configuration loading
//!
//! Rig configuration plus simulation parameters, read from a TOML file.
//! Every field is optional; missing fields take the rig defaults.

pub mod loader;

pub use loader::{load_config, HostConfig};
